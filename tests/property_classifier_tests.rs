use proptest::prelude::*;
use storychart::data::records::UserSelection;
use storychart::data::tables::ReferenceTables;
use storychart::geo::classifier::{ClassifyOutcome, classify, quintile_from_decile};

proptest! {
    #[test]
    fn quintiles_stay_in_domain(decile in 1u8..=10) {
        let quintile = quintile_from_decile(decile);
        prop_assert!((1..=5).contains(&quintile));
        prop_assert_eq!(quintile, decile.div_ceil(2));
    }

    #[test]
    fn classification_always_picks_the_max_ratio_area(
        ratios in proptest::collection::vec(0.01f64..=1.0, 1..6),
        decile in 1u8..=10,
        region in 1u8..=6
    ) {
        let mut tables = ReferenceTables::new();

        let mappings: Vec<String> = ratios
            .iter()
            .enumerate()
            .map(|(index, ratio)| {
                format!(
                    r#"{{"postcode": "3000", "area_code": "a{index}", "ratio": {ratio}}}"#
                )
            })
            .collect();
        tables
            .load_postcode_to_area(&format!("[{}]", mappings.join(",")))
            .expect("load mappings");
        tables
            .load_postcode_to_decile(&format!(r#"{{"3000": {decile}}}"#))
            .expect("load deciles");

        let regions: Vec<String> = (0..ratios.len())
            .map(|index| format!(r#""a{index}": {region}"#))
            .collect();
        tables
            .load_area_to_region(&format!("{{{}}}", regions.join(",")))
            .expect("load regions");

        let outcome = classify(&tables, &UserSelection::postcode("3000"));
        prop_assert!(matches!(outcome, ClassifyOutcome::Classified(_)));
        let classification = outcome.classification().expect("classified").clone();

        let max_ratio = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!((classification.resolved_area.ratio - max_ratio).abs() < 1e-12);
        prop_assert_eq!(classification.quintile, quintile_from_decile(decile));
        prop_assert_eq!(classification.region, region);
    }

    #[test]
    fn unmapped_postcodes_never_classify(postcode in "[0-9]{4}") {
        let mut tables = ReferenceTables::new();
        tables
            .load_postcode_to_area(r#"[{"postcode": "XXXX", "area_code": "a0", "ratio": 1.0}]"#)
            .expect("load mappings");
        tables
            .load_postcode_to_decile(r#"{"XXXX": 5}"#)
            .expect("load deciles");
        tables
            .load_area_to_region(r#"{"a0": 3}"#)
            .expect("load regions");

        // No numeric postcode can match the sentinel key.
        let outcome = classify(&tables, &UserSelection::postcode(&postcode));
        prop_assert_eq!(outcome, ClassifyOutcome::NoMatch);
    }
}
