//! `servlet/{DT,QT,GCT,IP,ST}Table` links.
//!
//! These carry a compound table name (`DEC_2010_SF1_P1`) instead of
//! separate fields. The name layout was never documented, so the result is
//! always flagged as low confidence.

use aff_model::{Caveat, DatasetKey, QueryParams, Result, TableServlet, TransformError};
use tracing::debug;

use super::{HandlerContext, HandlerOutput};
use crate::encode::{Endpoint, NewLink};
use crate::fields::{CompoundTableName, GeoId};

/// Query parameter carrying the compound name for each servlet.
fn name_param(servlet: TableServlet) -> &'static str {
    match servlet {
        TableServlet::Detailed | TableServlet::GeographicComparison => "-mt_name",
        TableServlet::Quick | TableServlet::Subject | TableServlet::Iterated => "-qr_name",
    }
}

/// Parameters a compound name is rebuilt from when the servlet omits it.
const SYNTHESIS_PARAMS: &[&str] = &["-ds_name", "-_box_head_nbr", "-format"];

fn compound_name(servlet: TableServlet, params: &QueryParams) -> Result<String> {
    let param = name_param(servlet);
    if let Some(name) = params.first_non_empty(param) {
        return Ok(name.to_string());
    }
    let parts: Vec<&str> = SYNTHESIS_PARAMS
        .iter()
        .filter_map(|key| params.first_non_empty(key))
        .collect();
    if parts.is_empty() {
        return Err(TransformError::MissingField { field: param });
    }
    Ok(parts.join("_"))
}

fn geographies(params: &QueryParams) -> Result<String> {
    let mut raw: Vec<&str> = params.all_non_empty("-geo_id").collect();
    if raw.is_empty() {
        raw = params.all_non_empty("geo_id").collect();
    }
    let ids = raw
        .into_iter()
        .map(|id| GeoId::parse(id).map(|geo| geo.to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(ids.join("_"))
}

pub(super) fn handle(
    servlet: TableServlet,
    params: &QueryParams,
    ctx: HandlerContext<'_>,
) -> Result<HandlerOutput> {
    let compound = compound_name(servlet, params)?;
    let name = CompoundTableName::parse(&compound)?;
    let key = DatasetKey::new(name.program, name.dataset, name.table).with_year(name.year);
    let mapping = ctx.resolvers.resolve(&key)?;
    debug!(
        servlet = servlet.endpoint(),
        compound = %compound,
        tid = %mapping.tid(),
        "interpreted compound table name"
    );

    let link = NewLink::new(Endpoint::Table)
        .param("g", geographies(params)?)
        .param("tid", mapping.tid())
        .param("y", mapping.year);
    Ok(HandlerOutput::low_confidence(
        link,
        Caveat::HeuristicTableName { compound },
    ))
}
