//! Topic (population group) code expansion.

use aff_lookup::LookupTables;
use aff_model::{Result, TransformError};

/// Expands a `|`-separated list of topic codes into the destination's
/// `:`-joined labels.
///
/// An empty list expands to an empty string.
///
/// # Errors
///
/// `UnknownTopicCode` for the first code missing from the lookup table.
pub fn expand(codes: &str, tables: &LookupTables) -> Result<String> {
    codes
        .split('|')
        .filter(|code| !code.is_empty())
        .map(|code| {
            tables
                .topic(code)
                .ok_or_else(|| TransformError::UnknownTopicCode {
                    code: code.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()
        .map(|labels| labels.join(":"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn tables() -> LookupTables {
        let topics = BTreeMap::from([
            ("001".to_string(), "001 - Total population".to_string()),
            ("002".to_string(), "002 - White alone".to_string()),
        ]);
        LookupTables::new(topics, BTreeMap::new())
    }

    #[test]
    fn joins_labels_in_input_order() {
        assert_eq!(
            expand("002|001", &tables()).unwrap(),
            "002 - White alone:001 - Total population"
        );
    }

    #[test]
    fn empty_list_expands_to_nothing() {
        assert_eq!(expand("", &tables()).unwrap(), "");
    }

    #[test]
    fn unknown_code_fails() {
        assert_eq!(
            expand("001|999", &tables()).unwrap_err(),
            TransformError::UnknownTopicCode {
                code: "999".to_string()
            }
        );
    }
}
