//! Bounds-checked decoders for packed legacy identifiers.
//!
//! Legacy links pack several values into single strings. Each decoder here
//! names one such format and the link shape it comes from, so callers never
//! slice raw character positions themselves.

use std::fmt;

use aff_model::{Result, TransformError};

/// Summary levels whose geographies are zip code tabulation areas.
pub const ZIP_SUMMARY_LEVELS: &[&str] = &["850", "860", "871"];

const GEO_MARKER: &str = "US";
const SHORT_GEO_PREFIX_LEN: usize = 5;
const GEO_PREFIX_LEN: usize = 7;
const DEFAULT_GEO_VARIANT: &str = "00";

/// Widens a two-digit year to four digits; four-digit years pass through.
pub fn widen_year(raw: &str, field: &'static str) -> Result<String> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransformError::malformed(field, raw, "year must be numeric"));
    }
    match raw.len() {
        2 => Ok(format!("20{raw}")),
        4 => Ok(raw.to_string()),
        _ => Err(TransformError::malformed(
            field,
            raw,
            "year must have two or four digits",
        )),
    }
}

/// Numeric value of a four-digit year.
pub fn year_number(year: &str) -> Result<u16> {
    year.parse()
        .map_err(|_| TransformError::malformed("year", year, "year must be numeric"))
}

/// Last two digits of a four-digit year.
pub fn short_year(year: &str) -> Result<&str> {
    year.get(2..4)
        .filter(|_| year.len() == 4)
        .ok_or_else(|| TransformError::malformed("year", year, "year must have four digits"))
}

/// Dataset code from bookmark table links and product-view ids.
///
/// Either `YY_TOKEN` (`13_5YR`, `10_SF1`) or a bare `TOKEN` when the year
/// travels separately, as in servlet compound names (`DEC_2000_SF1_...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedDataset<'a> {
    /// Two-digit year, when the code carries one.
    pub year: Option<&'a str>,
    /// Span or suffix token.
    pub token: &'a str,
}

impl<'a> PackedDataset<'a> {
    pub fn parse(code: &'a str) -> Self {
        match code.split_once('_') {
            Some((year, token))
                if year.len() == 2 && year.bytes().all(|b| b.is_ascii_digit()) =>
            {
                Self {
                    year: Some(year),
                    token,
                }
            }
            _ => Self {
                year: None,
                token: code,
            },
        }
    }

    /// The last three characters of the token (`SF1`, `113`, `5YR`).
    pub fn suffix(&self) -> Option<&'a str> {
        let start = self.token.len().checked_sub(3)?;
        self.token.get(start..)
    }

    /// Four-digit year: the explicit year if given, else the packed one.
    pub fn resolve_year(&self, explicit: Option<&str>) -> Result<String> {
        match (explicit, self.year) {
            (Some(year), _) => widen_year(year, "year"),
            (None, Some(packed)) => widen_year(packed, "dataset"),
            (None, None) => Err(TransformError::malformed(
                "dataset",
                self.token,
                "dataset code carries no year",
            )),
        }
    }
}

/// Geography id, in either the legacy or the destination encoding.
///
/// Legacy ids put a five-character level prefix before the `US` marker
/// (`16000US3546310`); the destination expects seven characters, the extra
/// two being a variant component that defaults to `00` (`1600000US3546310`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoId {
    prefix: String,
    component: String,
}

impl GeoId {
    pub fn parse(raw: &str) -> Result<Self> {
        let (prefix, component) = raw
            .split_once(GEO_MARKER)
            .ok_or_else(|| TransformError::malformed("geo_id", raw, "missing US marker"))?;
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TransformError::malformed(
                "geo_id",
                raw,
                "geography level prefix must be numeric",
            ));
        }
        let prefix = match prefix.len() {
            SHORT_GEO_PREFIX_LEN => format!("{prefix}{DEFAULT_GEO_VARIANT}"),
            GEO_PREFIX_LEN => prefix.to_string(),
            _ => {
                return Err(TransformError::malformed(
                    "geo_id",
                    raw,
                    "geography level prefix must have five or seven digits",
                ));
            }
        };
        Ok(Self {
            prefix,
            component: component.to_string(),
        })
    }

    /// Three-digit summary level.
    pub fn summary_level(&self) -> &str {
        &self.prefix[..3]
    }

    pub fn is_zip_code(&self) -> bool {
        ZIP_SUMMARY_LEVELS.contains(&self.summary_level())
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{GEO_MARKER}{}", self.prefix, self.component)
    }
}

/// Two-digit state code from a facts link `_state` parameter.
///
/// The parameter holds a state geography id (`04000US12`); a bare code
/// (`12`) is accepted as well.
pub fn state_code(raw: &str) -> Result<&str> {
    let code = raw
        .split_once(GEO_MARKER)
        .map_or(raw, |(_, component)| component);
    if code.len() == 2 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(TransformError::malformed(
            "_state",
            raw,
            "state must be a two-digit code",
        ))
    }
}

/// Compound table name from legacy table servlets.
///
/// Layout `PROGRAM_YEAR_DATASET_TABLE[_...]`, e.g. `DEC_2010_SF1_P1`. A `U`
/// in the TABLE slot is a format marker and the table follows it
/// (`DEC_2000_SF1_U_P001`). Trailing fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundTableName<'a> {
    pub program: &'a str,
    pub year: &'a str,
    pub dataset: &'a str,
    pub table: &'a str,
}

impl<'a> CompoundTableName<'a> {
    const FORMAT_MARKER: &'static str = "U";
    const TABLE_SLOT: usize = 3;

    pub fn parse(compound: &'a str) -> Result<Self> {
        let fields: Vec<&str> = compound.split('_').collect();
        let field = |index: usize, name: &'static str| {
            fields
                .get(index)
                .copied()
                .filter(|value| !value.is_empty())
                .ok_or(TransformError::MissingField { field: name })
        };
        let mut table_slot = Self::TABLE_SLOT;
        if fields.get(table_slot).copied() == Some(Self::FORMAT_MARKER) {
            table_slot += 1;
        }
        Ok(Self {
            program: field(0, "program")?,
            year: field(1, "year")?,
            dataset: field(2, "dataset")?,
            table: field(table_slot, "table")?,
        })
    }
}

/// Product id from product-view links: `PROGRAM_DATASET..._TABLE`.
///
/// The middle fields are rejoined with `_` to form the dataset code
/// (`ACS_13_5YR_B07010` → `ACS`, `13_5YR`, `B07010`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductId<'a> {
    pub program: &'a str,
    pub dataset: String,
    pub table: &'a str,
}

impl<'a> ProductId<'a> {
    pub fn parse(pid: &'a str) -> Result<Self> {
        let fields: Vec<&str> = pid.split('_').collect();
        match fields.as_slice() {
            [program, middle @ .., table]
                if !middle.is_empty()
                    && !program.is_empty()
                    && !table.is_empty()
                    && middle.iter().all(|field| !field.is_empty()) =>
            {
                Ok(Self {
                    program: *program,
                    dataset: middle.join("_"),
                    table: *table,
                })
            }
            _ => Err(TransformError::malformed(
                "pid",
                pid,
                "expected PROGRAM_DATASET_TABLE",
            )),
        }
    }
}

/// Converts a legacy `|`-separated list into the destination `_` form.
pub fn pipe_to_underscore(list: &str) -> String {
    list.replace('|', "_")
}

#[cfg(test)]
mod tests {
    use aff_model::ErrorKind;

    use super::*;

    #[test]
    fn widens_two_digit_years() {
        assert_eq!(widen_year("13", "dataset").unwrap(), "2013");
        assert_eq!(widen_year("2016", "dataset").unwrap(), "2016");
        assert!(widen_year("201", "dataset").is_err());
        assert!(widen_year("20x6", "dataset").is_err());
    }

    #[test]
    fn short_year_requires_four_digits() {
        assert_eq!(short_year("2016").unwrap(), "16");
        assert!(short_year("16").is_err());
    }

    #[test]
    fn packed_dataset_with_year() {
        let packed = PackedDataset::parse("13_5YR");
        assert_eq!(packed.year, Some("13"));
        assert_eq!(packed.token, "5YR");
        assert_eq!(packed.resolve_year(None).unwrap(), "2013");
        assert_eq!(packed.resolve_year(Some("2009")).unwrap(), "2009");
    }

    #[test]
    fn packed_dataset_without_year() {
        let packed = PackedDataset::parse("SF1");
        assert_eq!(packed.year, None);
        assert_eq!(packed.suffix(), Some("SF1"));
        let err = packed.resolve_year(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(packed.resolve_year(Some("00")).unwrap(), "2000");
    }

    #[test]
    fn packed_dataset_suffix_is_bounds_checked() {
        assert_eq!(PackedDataset::parse("10_SF1").suffix(), Some("SF1"));
        assert_eq!(PackedDataset::parse("10_X").suffix(), None);
    }

    #[test]
    fn geo_id_short_prefix_gets_default_variant() {
        let geo = GeoId::parse("16000US3546310").unwrap();
        assert_eq!(geo.to_string(), "1600000US3546310");
        assert_eq!(geo.summary_level(), "160");
        assert!(!geo.is_zip_code());
    }

    #[test]
    fn geo_id_full_prefix_is_unchanged() {
        let geo = GeoId::parse("0400000US06").unwrap();
        assert_eq!(geo.to_string(), "0400000US06");
        let nation = GeoId::parse("01000US").unwrap();
        assert_eq!(nation.to_string(), "0100000US");
    }

    #[test]
    fn geo_id_rejects_other_prefix_lengths() {
        let err = GeoId::parse("160000US0644000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(GeoId::parse("3546310").is_err());
    }

    #[test]
    fn geo_id_detects_zip_levels() {
        assert!(GeoId::parse("86000US78516").unwrap().is_zip_code());
        assert!(GeoId::parse("8710000US0178516").unwrap().is_zip_code());
    }

    #[test]
    fn state_code_from_geo_id() {
        assert_eq!(state_code("04000US12").unwrap(), "12");
        assert_eq!(state_code("35").unwrap(), "35");
        assert!(state_code("04000US").is_err());
    }

    #[test]
    fn compound_name_plain_layout() {
        let name = CompoundTableName::parse("DEC_2010_SF1_P1").unwrap();
        assert_eq!(name.program, "DEC");
        assert_eq!(name.year, "2010");
        assert_eq!(name.dataset, "SF1");
        assert_eq!(name.table, "P1");
    }

    #[test]
    fn compound_name_shifted_by_format_marker() {
        let name = CompoundTableName::parse("DEC_2000_SF1_U_P001").unwrap();
        assert_eq!(name.table, "P001");
    }

    #[test]
    fn compound_name_missing_table() {
        let err = CompoundTableName::parse("DEC_2000_SF1_U").unwrap_err();
        assert_eq!(err, TransformError::MissingField { field: "table" });
        assert!(CompoundTableName::parse("DEC").is_err());
    }

    #[test]
    fn product_id_joins_middle_fields() {
        let pid = ProductId::parse("ACS_13_5YR_B07010").unwrap();
        assert_eq!(pid.program, "ACS");
        assert_eq!(pid.dataset, "13_5YR");
        assert_eq!(pid.table, "B07010");
        assert!(ProductId::parse("ACS_B07010").is_err());
        assert!(ProductId::parse("ACS__B07010").is_err());
    }

    #[test]
    fn pipes_become_underscores() {
        assert_eq!(
            pipe_to_underscore("0100000US|0400000US01|0500000US01001"),
            "0100000US_0400000US01_0500000US01001"
        );
        assert_eq!(pipe_to_underscore("0100000US"), "0100000US");
    }
}
