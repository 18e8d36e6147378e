use bf_block::*;
use proptest::prelude::*;

fn valid_record() -> BlockRecord {
    let mut record = BlockRecord::default();
    for (field, text) in [
        (FieldName::Name, "North block"),
        (FieldName::Size, "4"),
        (FieldName::NoRows, "20"),
        (FieldName::RowSpacing, "2"),
        (FieldName::TreeSpacing, "1"),
        (FieldName::NoTrees, "19500"),
        (FieldName::DateOfPlanting, "19 / 10 / 2024"),
        (FieldName::FarmStatus, "planting"),
        (FieldName::Comments, "Drip irrigated"),
    ] {
        record.apply(FieldUpdate::from_text(field, text).expect("textual field"));
    }
    record.toggle_crop(Crop::Apples);
    record
}

fn cleared(field: FieldName) -> BlockRecord {
    let mut record = valid_record();
    match field {
        FieldName::Crops => record.apply(FieldUpdate::Crops(Default::default())),
        _ => record.apply(FieldUpdate::from_text(field, "").expect("textual field")),
    }
    record
}

#[test]
fn valid_record_has_no_errors() {
    assert!(validate_record(&valid_record()).is_empty());
}

#[test]
fn each_empty_field_reports_exactly_one_missing_error() {
    for field in FieldName::ALL {
        let errors = validate_record(&cleared(field));
        assert_eq!(
            errors,
            vec![FieldError::MissingField { field }],
            "clearing {field}"
        );
    }
}

#[test]
fn whitespace_counts_as_empty() {
    let mut record = valid_record();
    record.apply(FieldUpdate::Comments("   \n".to_string()));
    assert_eq!(
        validate_record(&record),
        vec![FieldError::MissingField {
            field: FieldName::Comments
        }]
    );
}

#[test]
fn zero_and_negative_numbers_are_invalid_not_missing() {
    let numeric = [
        FieldName::Size,
        FieldName::NoRows,
        FieldName::RowSpacing,
        FieldName::TreeSpacing,
        FieldName::NoTrees,
    ];
    for field in numeric {
        for text in ["0", "-2.5", "ten"] {
            let mut record = valid_record();
            record.apply(FieldUpdate::from_text(field, text).unwrap());
            let errors = validate_record(&record);
            assert_eq!(
                errors,
                vec![FieldError::InvalidFormat {
                    field,
                    rule: FormatRule::PositiveNumber
                }],
                "{field} = {text:?}"
            );
            assert_eq!(errors[0].to_string(), format!("{} should be positive float!", field.label()));
        }
    }
}

#[test]
fn malformed_date_is_invalid_format() {
    let mut record = valid_record();
    record.apply(FieldUpdate::DateOfPlanting("2024-10-19".to_string()));
    let errors = validate_record(&record);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(), FieldName::DateOfPlanting);
    assert_eq!(errors[0].to_string(), "Date should be formatted as DD/MM/YYYY!");
}

#[test]
fn three_missing_fields_in_declaration_order() {
    let mut record = valid_record();
    record.apply(FieldUpdate::Comments(String::new()));
    record.apply(FieldUpdate::Name(String::new()));
    record.apply(FieldUpdate::FarmStatus(None));

    let fields: Vec<FieldName> = validate_record(&record).iter().map(FieldError::field).collect();
    assert_eq!(
        fields,
        vec![FieldName::Name, FieldName::FarmStatus, FieldName::Comments]
    );
}

#[test]
fn format_errors_follow_all_missing_errors() {
    let mut record = valid_record();
    record.apply(FieldUpdate::Size("0".to_string()));
    record.apply(FieldUpdate::Comments(String::new()));
    record.apply(FieldUpdate::TreeSpacing("-1".to_string()));

    let errors = validate_record(&record);
    assert_eq!(
        errors,
        vec![
            FieldError::MissingField {
                field: FieldName::Comments
            },
            FieldError::InvalidFormat {
                field: FieldName::Size,
                rule: FormatRule::PositiveNumber
            },
            FieldError::InvalidFormat {
                field: FieldName::TreeSpacing,
                rule: FormatRule::PositiveNumber
            },
        ]
    );
}

#[test]
fn messages_are_distinct_per_field() {
    let mut record = BlockRecord::default();
    record.apply(FieldUpdate::DateOfPlanting("soon".to_string()));
    let messages: Vec<String> = validate_record(&record).iter().map(ToString::to_string).collect();
    let mut unique = messages.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), messages.len());
}

proptest! {
    #[test]
    fn toggling_twice_restores_crops(
        start in prop::collection::btree_set(prop::sample::select(Crop::ALL.to_vec()), 0..5),
        crop in prop::sample::select(Crop::ALL.to_vec()),
    ) {
        let mut record = BlockRecord::default();
        record.apply(FieldUpdate::Crops(start.clone()));
        record.toggle_crop(crop);
        prop_assert_ne!(&record.crops, &start);
        record.toggle_crop(crop);
        prop_assert_eq!(&record.crops, &start);
    }

    #[test]
    fn positive_sizes_pass(size in 0.001_f64..1.0e6) {
        let mut record = valid_record();
        record.apply(FieldUpdate::Size(size.to_string()));
        prop_assert!(validate_record(&record).is_empty());
    }

    #[test]
    fn non_positive_sizes_fail_once(size in -1.0e6_f64..=0.0) {
        let mut record = valid_record();
        record.apply(FieldUpdate::Size(size.to_string()));
        let errors = validate_record(&record);
        prop_assert_eq!(errors.len(), 1);
        prop_assert!(!errors[0].is_missing());
    }
}
