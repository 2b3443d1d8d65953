//! `servlet/*Facts`, `servlet/SAFF*` and `servlet/ACSSAFF*` fact sheets.
//!
//! A geography id in `geo_id` (or `-geo_id`) opens the profile for that
//! geography. Without one, the fact sheet was a search: `_cityTown` plus an
//! optional `_state` become a free-text profile query.

use aff_model::{QueryParams, Result, TransformError};
use tracing::trace;

use super::{HandlerContext, HandlerOutput};
use crate::encode::{Endpoint, NewLink};
use crate::fields::{GeoId, state_code};

pub(super) fn handle(params: &QueryParams, ctx: HandlerContext<'_>) -> Result<HandlerOutput> {
    if let Some(raw) = params
        .first_non_empty("geo_id")
        .or_else(|| params.first_non_empty("-geo_id"))
    {
        let geo = GeoId::parse(raw)?;
        if geo.is_zip_code() {
            return Err(TransformError::unsupported(format!(
                "zip code geography {raw} is not available on the destination portal"
            )));
        }
        trace!(legacy = raw, geo = %geo, "translated fact sheet geography");
        return Ok(HandlerOutput::exact(
            NewLink::new(Endpoint::Profile).param("g", geo.to_string()),
        ));
    }

    if params.first_non_empty("_zip").is_some() {
        return Err(TransformError::unsupported(
            "zip code fact sheets are not available on the destination portal",
        ));
    }
    let city = params
        .first_non_empty("_cityTown")
        .ok_or(TransformError::MissingField { field: "_cityTown" })?;
    let query = match params.first_non_empty("_state") {
        Some(raw) => {
            let code = state_code(raw)?;
            let state = ctx
                .tables
                .state_name(code)
                .ok_or_else(|| TransformError::UnknownState {
                    code: code.to_string(),
                })?;
            format!("{city}, {state}")
        }
        None => city.to_string(),
    };
    Ok(HandlerOutput::exact(
        NewLink::new(Endpoint::Profile).param("q", query),
    ))
}
