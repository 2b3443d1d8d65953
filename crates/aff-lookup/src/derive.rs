//! Rebuilding the lookup document from upstream artifacts.
//!
//! Retrieval is someone else's job: these functions take a facet tree that
//! was already downloaded from the destination portal's search service and
//! the `|`-delimited state reference table, and turn them into the two
//! sections of the persisted document.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LookupError, Result};

/// Collects every string stored under a `code` key anywhere in `tree`.
///
/// Values under `code` are not descended into; non-string codes are skipped.
pub fn collect_facet_codes(tree: &Value) -> Vec<String> {
    let mut codes = Vec::new();
    collect_into(tree, &mut codes);
    codes
}

fn collect_into(item: &Value, codes: &mut Vec<String>) {
    match item {
        Value::Object(map) => {
            for (key, value) in map {
                if key == "code" {
                    if let Value::String(code) = value {
                        codes.push(code.clone());
                    }
                } else {
                    collect_into(value, codes);
                }
            }
        }
        Value::Array(items) => {
            for value in items {
                collect_into(value, codes);
            }
        }
        _ => {}
    }
}

/// Lookup key for a facet label such as `"001 - Total population"`.
///
/// The key is the text before the first hyphen. Labels that start with a
/// hyphen keep it and take the text up to the next hyphen instead.
pub fn topic_key(label: &str) -> String {
    match label.split_once('-') {
        Some(("", rest)) => {
            let head = rest.split_once('-').map_or(rest, |(head, _)| head);
            format!("-{head}").trim().to_string()
        }
        Some((head, _)) => head.trim().to_string(),
        None => label.trim().to_string(),
    }
}

/// Builds the `topics` section from a facet tree.
///
/// Later labels with the same key replace earlier ones.
pub fn topics_from_facets(tree: &Value) -> BTreeMap<String, String> {
    collect_facet_codes(tree)
        .into_iter()
        .map(|label| (topic_key(&label), label))
        .collect()
}

#[derive(Debug, Deserialize)]
struct StateRecord {
    #[serde(rename = "STATE")]
    code: String,
    #[serde(rename = "STATE_NAME")]
    name: String,
}

/// Builds the `states` section from the `|`-delimited state reference table.
///
/// The table must have `STATE` and `STATE_NAME` header columns; other
/// columns are ignored.
pub fn states_from_reference(content: &str, name: &str) -> Result<BTreeMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut states = BTreeMap::new();
    for record in reader.deserialize::<StateRecord>() {
        let record = record.map_err(|err| LookupError::Csv {
            name: name.to_string(),
            message: err.to_string(),
        })?;
        states.insert(record.code, record.name);
    }
    Ok(states)
}
