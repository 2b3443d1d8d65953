//! `faces/.../productview.xhtml?pid=PROGRAM_DATASET_TABLE`

use aff_model::{DatasetKey, QueryParams, Result, TransformError};

use super::{HandlerContext, HandlerOutput};
use crate::encode::{Endpoint, NewLink};
use crate::fields::ProductId;

pub(super) fn handle(params: &QueryParams, ctx: HandlerContext<'_>) -> Result<HandlerOutput> {
    let pid = params
        .first_non_empty("pid")
        .ok_or(TransformError::MissingField { field: "pid" })?;
    let product = ProductId::parse(pid)?;
    let key = DatasetKey::new(product.program, product.dataset, product.table);
    let mapping = ctx.resolvers.resolve(&key)?;
    Ok(HandlerOutput::exact(
        NewLink::new(Endpoint::Table)
            .param("tid", mapping.tid())
            .param("y", mapping.year),
    ))
}
