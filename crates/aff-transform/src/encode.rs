//! Destination URL construction.

use std::collections::BTreeMap;
use std::fmt;

use aff_model::{Result, TransformError};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Base path every destination URL starts with.
pub const BASE_URL: &str = "https://data.census.gov/cedsci/";

/// Query parameters the destination portal recognizes.
pub const ALLOWED_PARAMS: &[&str] = &[
    "q",     // free-text query
    "t",     // topics
    "g",     // geography ids, `_`-separated
    "y",     // year
    "d",     // dataset
    "n",     // NAICS code
    "p",     // product/service codes
    "table", // table id
    "tid",   // {survey}{year}.{table}
    "comm",  // commodity code
    // table view
    "hidePreview",
    "moe",
    "tp",
    // map view
    "layer",
    "cid",
    "palette",
    "break",
    "classification",
    "mode",
    "vintage",
];

/// Bytes escaped in query keys and values: everything except ASCII
/// alphanumerics and `-._~`. Spaces are then written as `+`.
const QUERY_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn form_encode(text: &str) -> String {
    // `%` itself is escaped, so every `%20` left here is an encoded space.
    utf8_percent_encode(text, QUERY_ESCAPES)
        .to_string()
        .replace("%20", "+")
}

/// Destination page a converted link opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Table,
    Profile,
    Map,
    All,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Profile => "profile",
            Self::Map => "map",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A destination link before encoding: endpoint plus query parameters.
///
/// Parameters are kept sorted by key, so insertion order never affects the
/// encoded URL. Setting a key twice keeps the last value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    endpoint: Endpoint,
    params: BTreeMap<String, String>,
}

impl NewLink {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

/// Encodes a link as `<BASE_URL><endpoint>?<query>`.
///
/// Empty parameters are dropped; the rest are form-encoded in key order,
/// escaping every byte outside `A-Za-z0-9-._~` and writing spaces as `+`.
///
/// # Errors
///
/// `DisallowedParameter` if any key is outside [`ALLOWED_PARAMS`]. That is
/// a bug in the caller, not a problem with user input, and nothing is built.
pub fn encode(link: &NewLink) -> Result<String> {
    if let Some(key) = link
        .params
        .keys()
        .find(|key| !ALLOWED_PARAMS.contains(&key.as_str()))
    {
        return Err(TransformError::DisallowedParameter { key: key.clone() });
    }
    let query = link
        .params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    Ok(format!("{BASE_URL}{}?{query}", link.endpoint))
}

#[cfg(test)]
mod tests {
    use aff_model::ErrorKind;

    use super::*;

    #[test]
    fn sorts_and_drops_empty_parameters() {
        let link = NewLink::new(Endpoint::Table)
            .param("y", "2010")
            .param("g", "")
            .param("tid", "DECENNIALSF12010.H10");
        assert_eq!(
            encode(&link).unwrap(),
            "https://data.census.gov/cedsci/table?tid=DECENNIALSF12010.H10&y=2010"
        );
    }

    #[test]
    fn form_encodes_values() {
        let link = NewLink::new(Endpoint::Profile).param("q", "Chicago city, Illinois");
        assert_eq!(
            encode(&link).unwrap(),
            "https://data.census.gov/cedsci/profile?q=Chicago+city%2C+Illinois"
        );
    }

    #[test]
    fn escapes_reserved_characters_but_not_tilde() {
        let link = NewLink::new(Endpoint::Profile).param("q", "A~B*C 100% é");
        assert_eq!(
            encode(&link).unwrap(),
            "https://data.census.gov/cedsci/profile?q=A~B%2AC+100%25+%C3%A9"
        );
    }

    #[test]
    fn rejects_unknown_parameters() {
        let link = NewLink::new(Endpoint::Table)
            .param("tid", "ACSDT5Y2013.B07010")
            .param("geo", "0100000US");
        let err = encode(&link).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Contract);
        assert_eq!(
            err,
            TransformError::DisallowedParameter {
                key: "geo".to_string()
            }
        );
    }

    #[test]
    fn unknown_empty_parameter_still_rejected() {
        let link = NewLink::new(Endpoint::Map).param("bogus", "");
        assert!(encode(&link).is_err());
    }

    #[test]
    fn last_value_wins() {
        let mut link = NewLink::new(Endpoint::All);
        link.set("q", "first");
        link.set("q", "second");
        assert_eq!(link.get("q"), Some("second"));
        assert_eq!(
            encode(&link).unwrap(),
            "https://data.census.gov/cedsci/all?q=second"
        );
    }
}
