//! Legacy URL decoding.
//!
//! Everything before the first `//` is the scheme; the first path segment
//! after it is the host and the second selects the legacy tool:
//!
//! - `bkmk` links are path-only. The third segment is the target and the
//!   remaining segments are positional fields (any query string is ignored).
//! - `servlet` and `faces` links are parsed as URLs. The final path segment
//!   names the servlet or document, and the query string becomes a
//!   multi-valued mapping.

use aff_model::{
    LegacyLink, LinkPayload, PositionalFields, QueryParams, Result, Route, TableServlet, Tool,
    TransformError,
};
use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

/// Positional fields of `bkmk/table` links.
pub const TABLE_FIELDS: &[&str] = &[
    "version", "lang", "program", "dataset", "product", "geoids", "codes",
];

/// Positional fields of `bkmk/cf` links.
pub const COMMUNITY_FACTS_FIELDS: &[&str] =
    &["version", "lang", "geo_type", "geo_name", "topic", "object"];

/// Servlets that render a fact sheet for one geography.
pub const FACTS_SERVLETS: &[&str] = &[
    "SAFFFacts",
    "ACSSAFFFacts",
    "SAFFPopulation",
    "SAFFHousing",
    "SAFFEconomies",
    "SAFFIteratedFacts",
    "ACSSAFFPopulation",
    "ACSSAFFHousing",
    "ACSSAFFEconomic",
];

/// Bookmark targets that exist but have no rule yet.
const PENDING_BOOKMARK_TARGETS: &[&str] = &["navigation", "qs", "sm", "select"];

const PRODUCT_VIEW_DOCUMENT: &str = "productview.xhtml";

/// Decodes a raw legacy URL and selects the handler route for it.
///
/// # Errors
///
/// - `NotAUrl` when there is no `//` separator.
/// - `NotStableDeepLink` for tools whose links carry no resource identity.
/// - `NotImplemented` for recognized tools with a target no rule covers.
pub fn decode(raw: &str) -> Result<LegacyLink> {
    let raw = raw.trim();
    let (scheme, rest) = raw.split_once("//").ok_or_else(|| TransformError::NotAUrl {
        input: raw.to_string(),
    })?;
    let path = rest.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/');
    let host = segments.next().unwrap_or_default();
    let tool_segment = segments.next().unwrap_or_default();
    let tool = Tool::from_segment(tool_segment).ok_or_else(|| {
        TransformError::not_stable(format!(
            "'{tool_segment}' links do not identify a resource"
        ))
    })?;

    let tail: Vec<&str> = segments.collect();
    if tail.iter().all(|segment| segment.is_empty()) {
        return Err(TransformError::not_stable(format!(
            "'{tool}' link has no target"
        )));
    }

    let link = if tool.is_query_bearing() {
        decode_query_bearing(scheme, rest, tool)?
    } else {
        decode_bookmark(scheme, host, tail)?
    };
    debug!(
        scheme = %link.scheme,
        host = %link.host,
        tool = %link.tool,
        target = %link.target,
        route = ?link.route,
        "decoded legacy link"
    );
    Ok(link)
}

fn decode_bookmark(scheme: &str, host: &str, segments: Vec<&str>) -> Result<LegacyLink> {
    let mut segments = segments.into_iter();
    let target = segments
        .next()
        .filter(|target| !target.is_empty())
        .ok_or_else(|| TransformError::not_stable("bookmark link has no target"))?;
    let (route, names) = match target {
        "table" => (Route::Table, TABLE_FIELDS),
        "cf" => (Route::CommunityFacts, COMMUNITY_FACTS_FIELDS),
        _ if PENDING_BOOKMARK_TARGETS.contains(&target) => {
            return Err(TransformError::not_implemented(format!(
                "no transformation rule for bookmark target '{target}' yet"
            )));
        }
        _ => {
            return Err(TransformError::not_implemented(format!(
                "no transformation rule for bookmark target '{target}'"
            )));
        }
    };
    let values = segments
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .map(|value| value.into_owned())
                .map_err(|_| TransformError::malformed("path", segment, "invalid percent-encoding"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LegacyLink {
        scheme: scheme.to_string(),
        host: host.to_string(),
        tool: Tool::Bookmark,
        target: target.to_string(),
        route,
        payload: LinkPayload::Positional(PositionalFields::zip(names, values)),
    })
}

/// Parses what follows `//`; the text before it is kept verbatim as the
/// scheme.
fn decode_query_bearing(scheme: &str, rest: &str, tool: Tool) -> Result<LegacyLink> {
    let url = Url::parse(&format!("http://{rest}"))
        .map_err(|_| TransformError::malformed("url", rest, "not a parseable URL"))?;
    let target = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
        .unwrap_or_default()
        .to_string();

    let route = match tool {
        Tool::Servlet => servlet_route(&target)?,
        Tool::Faces if target == PRODUCT_VIEW_DOCUMENT => Route::ProductView,
        Tool::Faces => {
            return Err(TransformError::not_stable(format!(
                "faces page '{target}' does not identify a resource"
            )));
        }
        Tool::Bookmark => {
            return Err(TransformError::not_stable("bookmark links carry no query"));
        }
    };
    let params: QueryParams = url.query_pairs().collect();

    Ok(LegacyLink {
        scheme: scheme.to_string(),
        host: url.host_str().unwrap_or_default().to_string(),
        tool,
        target,
        route,
        payload: LinkPayload::Query(params),
    })
}

fn servlet_route(endpoint: &str) -> Result<Route> {
    if FACTS_SERVLETS.contains(&endpoint) {
        return Ok(Route::FactsServlet);
    }
    TableServlet::from_endpoint(endpoint)
        .map(Route::TableServlet)
        .ok_or_else(|| {
            TransformError::not_implemented(format!(
                "no transformation rule for servlet '{endpoint}'"
            ))
        })
}

#[cfg(test)]
mod tests {
    use aff_model::ErrorKind;

    use super::*;

    #[test]
    fn rejects_strings_without_scheme_separator() {
        let err = decode("NotARealURL").unwrap_err();
        assert!(matches!(err, TransformError::NotAUrl { .. }));
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn decodes_bookmark_table_fields() {
        let link = decode(
            "https://factfinder.census.gov/bkmk/table/1.0/en/ACS/13_5YR/B07010/0100000US|0400000US01",
        )
        .unwrap();
        assert_eq!(link.scheme, "https:");
        assert_eq!(link.host, "factfinder.census.gov");
        assert_eq!(link.tool, Tool::Bookmark);
        assert_eq!(link.route, Route::Table);
        let fields = link.positional().unwrap();
        assert_eq!(fields.get("program"), Some("ACS"));
        assert_eq!(fields.get("dataset"), Some("13_5YR"));
        assert_eq!(fields.get("product"), Some("B07010"));
        assert_eq!(fields.get("geoids"), Some("0100000US|0400000US01"));
        assert_eq!(fields.get("codes"), None);
    }

    #[test]
    fn bookmark_segments_are_percent_decoded() {
        let link = decode(
            "http://factfinder.census.gov/bkmk/cf/1.0/en/place/Chicago%20city,%20Illinois/POPULATION",
        )
        .unwrap();
        assert_eq!(link.route, Route::CommunityFacts);
        let fields = link.positional().unwrap();
        assert_eq!(fields.get("geo_name"), Some("Chicago city, Illinois"));
        assert_eq!(fields.get("topic"), Some("POPULATION"));
    }

    #[test]
    fn bookmark_query_string_is_ignored() {
        let link =
            decode("https://factfinder.census.gov/bkmk/table/1.0/en/DEC/10_SF1/H10?lang=en")
                .unwrap();
        assert_eq!(link.positional().unwrap().get("product"), Some("H10"));
    }

    #[test]
    fn unknown_tool_is_not_a_stable_link() {
        let err = decode("https://factfinder.census.gov/nav/jsf/pages/index.xhtml").unwrap_err();
        assert!(matches!(err, TransformError::NotStableDeepLink { .. }));
    }

    #[test]
    fn host_only_link_is_not_a_stable_link() {
        let err = decode("https://factfinder.census.gov").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn tool_without_target_is_not_a_stable_link() {
        for raw in [
            "https://factfinder.census.gov/bkmk",
            "https://factfinder.census.gov/servlet/",
        ] {
            let err = decode(raw).unwrap_err();
            assert!(matches!(err, TransformError::NotStableDeepLink { .. }), "{raw}");
        }
    }

    #[test]
    fn unknown_bookmark_target_has_no_rule() {
        let err = decode("https://factfinder.census.gov/bkmk/sm/1.0/en/ACS/13_5YR").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        let err = decode("https://factfinder.census.gov/bkmk/chart/1.0/en").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }

    #[test]
    fn decodes_servlet_query() {
        let link = decode(
            "http://factfinder.census.gov/servlet/SAFFFacts?_event=Search&geo_id=16000US3546310\
             &_geoContext=01000US%7C04000US35&_zip=",
        )
        .unwrap();
        assert_eq!(link.route, Route::FactsServlet);
        assert_eq!(link.target, "SAFFFacts");
        let params = link.query().unwrap();
        assert_eq!(params.first("geo_id"), Some("16000US3546310"));
        assert_eq!(params.first("_geoContext"), Some("01000US|04000US35"));
        assert_eq!(params.first("_zip"), Some(""));
    }

    #[test]
    fn routes_table_servlets() {
        let link = decode(
            "http://factfinder.census.gov/servlet/DTTable?_bm=y&-geo_id=01000US&-mt_name=DEC_2000_SF1_U_P001",
        )
        .unwrap();
        assert_eq!(link.route, Route::TableServlet(TableServlet::Detailed));
    }

    #[test]
    fn unknown_servlet_has_no_rule() {
        let err = decode("http://factfinder.census.gov/servlet/MapItDrawServlet?geo_id=01000US")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }

    #[test]
    fn faces_navigation_pages_are_not_stable() {
        let err =
            decode("https://factfinder.census.gov/faces/nav/jsf/pages/index.xhtml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn servlet_links_keep_text_before_separator_as_scheme() {
        let link =
            decode("//factfinder.census.gov/servlet/SAFFPopulation?geo_id=04000US06").unwrap();
        assert_eq!(link.scheme, "");
        assert_eq!(link.host, "factfinder.census.gov");
        assert_eq!(link.route, Route::FactsServlet);

        let link = decode("[http://factfinder.census.gov/servlet/SAFFFacts?geo_id=04000US06").unwrap();
        assert_eq!(link.scheme, "[http:");
        assert_eq!(link.query().unwrap().first("geo_id"), Some("04000US06"));
    }

    #[test]
    fn routes_product_view() {
        let link = decode(
            "http://factfinder2.census.gov/faces/tableservices/jsf/pages/productview.xhtml?pid=ACS_10_1YR_S1701&prodType=table",
        )
        .unwrap();
        assert_eq!(link.tool, Tool::Faces);
        assert_eq!(link.route, Route::ProductView);
        assert_eq!(link.query().unwrap().first("pid"), Some("ACS_10_1YR_S1701"));
    }
}
