//! `bkmk/table/{version}/{lang}/{program}/{dataset}/{product}[/{geoids}[/{codes}]]`

use aff_model::{DatasetKey, PositionalFields, Result, TransformError};

use super::{HandlerContext, HandlerOutput, topics};
use crate::encode::{Endpoint, NewLink};
use crate::fields::pipe_to_underscore;

pub(super) fn handle(fields: &PositionalFields, ctx: HandlerContext<'_>) -> Result<HandlerOutput> {
    let required = |field: &'static str| {
        fields
            .non_empty(field)
            .ok_or(TransformError::MissingField { field })
    };
    let key = DatasetKey::new(
        required("program")?,
        required("dataset")?,
        required("product")?,
    );
    let mapping = ctx.resolvers.resolve(&key)?;

    let mut link = NewLink::new(Endpoint::Table)
        .param("tid", mapping.tid())
        .param("y", mapping.year.as_str());
    if let Some(geoids) = fields.non_empty("geoids") {
        link.set("g", pipe_to_underscore(geoids));
    }
    if let Some(codes) = fields.non_empty("codes") {
        link.set("t", topics::expand(codes, ctx.tables)?);
    }
    Ok(HandlerOutput::exact(link))
}
