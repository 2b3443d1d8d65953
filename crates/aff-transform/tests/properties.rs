//! Properties that hold for every input, not just the known links.

use aff_lookup::LookupTables;
use aff_model::{DatasetKey, ErrorKind};
use aff_transform::resolve::NEVER_MIGRATED;
use aff_transform::{ALLOWED_PARAMS, BASE_URL, Endpoint, NewLink, Transformer, encode, resolve};
use proptest::prelude::*;
use proptest::sample::{select, subsequence};

proptest! {
    #[test]
    fn never_migrated_programs_always_fail(
        program in select(NEVER_MIGRATED),
        dataset in "[0-9A-Z_]{0,10}",
        table in "[0-9A-Z]{0,8}",
        year in proptest::option::of("[0-9]{2,4}"),
    ) {
        let mut key = DatasetKey::new(program, dataset, table);
        key.year = year;
        let err = resolve(&key).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::UnsupportedData);
    }

    #[test]
    fn encoding_ignores_insertion_order(
        pairs in subsequence(ALLOWED_PARAMS, 0..=ALLOWED_PARAMS.len())
            .prop_flat_map(|keys| {
                let n = keys.len();
                (Just(keys), proptest::collection::vec(".{0,12}", n))
            })
            .prop_flat_map(|(keys, values)| {
                let pairs: Vec<(&str, String)> = keys.into_iter().zip(values).collect();
                Just(pairs).prop_shuffle()
            }),
    ) {
        let forward = pairs
            .iter()
            .fold(NewLink::new(Endpoint::Table), |link, (k, v)| link.param(*k, v.as_str()));
        let backward = pairs
            .iter()
            .rev()
            .fold(NewLink::new(Endpoint::Table), |link, (k, v)| link.param(*k, v.as_str()));
        let encoded = encode(&forward).unwrap();
        prop_assert_eq!(&encoded, &encode(&backward).unwrap());
        prop_assert!(encoded.starts_with(BASE_URL));
    }

    #[test]
    fn strings_without_scheme_separator_are_input_errors(raw in "[^/]*(/[^/]+)*") {
        let tables = LookupTables::embedded().unwrap();
        let err = Transformer::new(&tables).convert(&raw).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn conversion_never_panics(raw in "https?://[a-z.]{0,20}/(bkmk|servlet|faces)/[ -~]{0,60}") {
        let tables = LookupTables::embedded().unwrap();
        if let Ok(conversion) = Transformer::new(&tables).convert(&raw) {
            prop_assert!(conversion.url.starts_with(BASE_URL));
        }
    }
}
