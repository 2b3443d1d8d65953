//! Dataset mapping through the default registry.

use aff_model::{DatasetKey, ErrorKind, SurveyMapping, TransformError};
use aff_transform::{SupportStatus, default_registry, resolve};

fn key(program: &str, dataset: &str, table: &str) -> DatasetKey {
    DatasetKey::new(program, dataset, table)
}

#[test]
fn resolves_supported_programs() {
    let cases = [
        (key("ACS", "13_5YR", "B07010"), "ACSDT5Y", "2013", "B07010"),
        (key("ACS", "17_1YR", "DP05"), "ACSDP1Y", "2017", "DP05"),
        (key("ACS", "15_3YR", "CP03"), "ACSCP3Y", "2015", "CP03"),
        (key("ACS", "16_1YR", "S0201"), "ACSSPP1Y", "2016", "S0201"),
        (key("DEC", "10_113", "H1"), "DECENNIALCD113", "2010", "H1"),
        (key("DEC", "10_115", "P1"), "DECENNIALCD115", "2010", "P1"),
        (key("DEC", "10_SF1", "H10"), "DECENNIALSF1", "2010", "H10"),
        (key("NES", "2016", "00A1"), "NONEMP", "2016", "NS1600NONEMP"),
        (key("SBO", "2012", "00CSA01"), "SBOCS", "2012", "SB1200CSA01"),
    ];
    for (key, survey, year, table) in cases {
        assert_eq!(
            resolve(&key).unwrap(),
            SurveyMapping::new(survey, year, table),
            "{key}"
        );
    }
}

#[test]
fn explicit_year_overrides_dataset_year() {
    let key = key("DEC", "SF1", "P1").with_year("2010");
    assert_eq!(resolve(&key).unwrap().tid(), "DECENNIALSF12010.P1");
}

#[test]
fn rejects_unmigrated_data() {
    let cases = [
        key("DEC", "10_SF2", "PCT1"),
        key("DEC", "10_SF1", "GCT-PH1"),
        key("DEC", "00_SF1", "P001"),
        key("ACS", "09_1YR", "B01001"),
        key("ACS", "13_ACSPR", "B01001"),
        key("NES", "2011", "00A1"),
        key("SBO", "2012", "00CSB01"),
        key("SBO", "2012", "A1"),
        key("EEO", "10_5YR", "EEO-ALL01W"),
        key("AHS", "2013", "C01AH"),
    ];
    for key in cases {
        let err = resolve(&key).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedData, "{key}: {err}");
    }
}

#[test]
fn pending_programs_have_no_rule() {
    for program in ["ECN", "BP"] {
        let err = resolve(&key(program, "2012", "00A1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented, "{program}");
    }
}

#[test]
fn unknown_program_is_unresolvable() {
    let err = resolve(&key("foo", "bar", "baz")).unwrap_err();
    assert_eq!(
        err,
        TransformError::Unresolvable {
            program: "foo".to_string(),
            dataset: "bar".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn malformed_years_are_input_errors() {
    for key in [key("NES", "16", "00A1").with_year("201"), key("SBO", "x12", "00CSA01")] {
        assert_eq!(resolve(&key).unwrap_err().kind(), ErrorKind::Input, "{key}");
    }
}

#[test]
fn registry_lists_every_program_once() {
    let registry = default_registry();
    let codes: Vec<&str> = registry.iter().map(|r| r.program_code()).collect();
    let mut sorted = codes.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(codes, sorted);
    assert_eq!(registry.len(), 19);
    assert_eq!(
        registry.get("PEP").map(|r| r.status()),
        Some(SupportStatus::NeverMigrated)
    );
    assert_eq!(
        registry.get("ACS").map(|r| r.status()),
        Some(SupportStatus::Partial)
    );
}
