//! `bkmk/cf/{version}/{lang}/{geo_type}/{geo_name}[/{topic}[/{object}]]`

use aff_model::{PositionalFields, Result, TransformError};

use super::HandlerOutput;
use crate::encode::{Endpoint, NewLink};

const ZIP_GEO_TYPE: &str = "zip";

pub(super) fn handle(fields: &PositionalFields) -> Result<HandlerOutput> {
    if fields.get("geo_type") == Some(ZIP_GEO_TYPE) {
        return Err(TransformError::unsupported(
            "zip code community facts are not available on the destination portal",
        ));
    }
    let name = fields
        .non_empty("geo_name")
        .ok_or(TransformError::MissingField { field: "geo_name" })?;
    Ok(HandlerOutput::exact(
        NewLink::new(Endpoint::Profile).param("q", name),
    ))
}
