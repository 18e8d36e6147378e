//! End-to-end submit behaviour of the field store.

use bf_app::{AppError, AppResult, BlockForm, BlockSink, FinalizedBlock, SubmitOutcome};
use bf_block::{Crop, FieldError, FieldName, FieldUpdate, FixedClock, FormatRule};
use chrono::NaiveDate;

fn clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}

fn filled_form() -> BlockForm {
    let mut form = BlockForm::new();
    for (name, text) in [
        ("name", "North block"),
        ("size", "4"),
        ("noRows", "25"),
        ("rowSpacing", "2"),
        ("treeSpacing", "1"),
        ("noTrees", "19800"),
        ("dateOfPlanting", "19 / 10 / 2024"),
        ("farmStatus", "growing"),
        ("comments", "Planted on trellis"),
    ] {
        form.set_field_text(name, text).expect("known field");
    }
    form.toggle_crop(Crop::Apples);
    form.toggle_crop(Crop::TableGrape);
    form
}

fn accepted(outcome: SubmitOutcome) -> FinalizedBlock {
    match outcome {
        SubmitOutcome::Accepted(block) => block,
        SubmitOutcome::Rejected(errors) => panic!("unexpected errors: {errors:?}"),
    }
}

#[test]
fn valid_submit_derives_metrics() {
    let mut form = filled_form();
    let block = accepted(form.submit(&clock()).unwrap());

    let derived = form.record().derived.expect("metrics applied");
    assert_eq!(derived.trees_per_hectare.to_string(), "5000.000");
    assert_eq!(derived.trees_per_vine.to_string(), "20000.000");
    assert_eq!(derived.age.to_string(), "2");
    assert!(form.errors().is_empty());
    assert_eq!(block.record, *form.record());
    assert_eq!(block.submitted_at, "2026-10-19T00:00:00");
}

#[test]
fn failed_submit_keeps_previous_metrics() {
    let mut form = filled_form();
    form.submit(&clock()).unwrap();
    let before = form.record().derived;

    form.set_field(FieldUpdate::RowSpacing("4".to_string()));
    form.set_field(FieldUpdate::Name("  ".to_string()));
    let outcome = form.submit(&clock()).unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(vec![FieldError::MissingField {
            field: FieldName::Name
        }])
    );
    assert_eq!(form.record().derived, before);
    assert_eq!(form.errors().len(), 1);
    assert_eq!(
        form.error_for(FieldName::Name).map(ToString::to_string).as_deref(),
        Some("Block name is required!")
    );
}

#[test]
fn blank_form_never_derives() {
    let mut form = BlockForm::new();
    let outcome = form.submit(&clock()).unwrap();
    assert!(!outcome.is_accepted());
    assert!(form.record().derived.is_none());
    assert_eq!(form.errors().len(), 10);
}

#[test]
fn fixing_errors_then_resubmitting_clears_them() {
    let mut form = filled_form();
    form.set_field(FieldUpdate::NoTrees("0".to_string()));
    assert!(!form.submit(&clock()).unwrap().is_accepted());
    assert!(!form.errors().is_empty());

    form.set_field(FieldUpdate::NoTrees("19800".to_string()));
    assert!(form.submit(&clock()).unwrap().is_accepted());
    assert!(form.errors().is_empty());
}

#[test]
fn metrics_beyond_float_range_are_rejected_by_validation() {
    let mut form = filled_form();
    form.set_field(FieldUpdate::Comments(String::new()));
    assert!(!form.submit(&clock()).unwrap().is_accepted());

    form.set_field(FieldUpdate::Comments("fixed".to_string()));
    form.set_field(FieldUpdate::Size("1e305".to_string()));
    let outcome = form.submit(&clock()).unwrap();

    let expected = vec![FieldError::InvalidFormat {
        field: FieldName::Size,
        rule: FormatRule::ComputableRange,
    }];
    assert_eq!(outcome, SubmitOutcome::Rejected(expected.clone()));
    assert_eq!(form.errors(), expected.as_slice());
    assert!(form.record().derived.is_none());

    form.set_field(FieldUpdate::Size("4".to_string()));
    form.set_field(FieldUpdate::RowSpacing("1e-320".to_string()));
    form.submit(&clock()).unwrap();
    assert_eq!(
        form.errors().iter().map(FieldError::field).collect::<Vec<_>>(),
        vec![FieldName::RowSpacing]
    );
}

#[test]
fn submit_is_idempotent() {
    let mut form = filled_form();
    let first = accepted(form.submit(&clock()).unwrap());
    let second = accepted(form.submit(&clock()).unwrap());
    assert_eq!(first, second);
    assert!(form.errors().is_empty());
}

#[test]
fn payload_is_flat_key_value() {
    let mut form = filled_form();
    let block = accepted(form.submit(&clock()).unwrap());
    let payload = block.to_payload().unwrap();

    assert_eq!(payload["name"], "North block");
    assert_eq!(payload["rowSpacing"], "2");
    assert_eq!(payload["farmStatus"], "growing");
    assert_eq!(payload["crops"], serde_json::json!(["Apples", "Table Grape"]));
    assert_eq!(payload["treesPerHectare"], "5000.000");
    assert_eq!(payload["treesPerVine"], "20000.000");
    assert_eq!(payload["age"], "2");
    assert_eq!(payload["errors"], serde_json::json!([]));
}

#[test]
fn sink_receives_only_accepted_blocks() {
    let mut sink: Vec<FinalizedBlock> = Vec::new();

    let mut blank = BlockForm::new();
    blank.submit_to(&clock(), &mut sink).unwrap();
    assert!(sink.is_empty());

    let mut form = filled_form();
    form.submit_to(&clock(), &mut sink).unwrap();
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].record.name, "North block");
}

struct RefusingSink;

impl BlockSink for RefusingSink {
    fn accept(&mut self, _block: &FinalizedBlock) -> AppResult<()> {
        Err(AppError::Io(std::io::Error::other("disk full")))
    }
}

#[test]
fn sink_failure_surfaces_as_error() {
    let mut form = filled_form();
    let err = form.submit_to(&clock(), &mut RefusingSink).unwrap_err();
    assert!(matches!(err, AppError::Sink { .. }));
    // the store still holds the validated, derived record
    assert!(form.record().derived.is_some());
}

#[test]
fn draft_with_bad_entry_leaves_form_untouched() {
    let yaml = "fields:\n  name: Half block\n  farmStatus: harvesting\ncrops: [Pears]\n";
    let draft: bf_block::BlockDraft = serde_yaml::from_str(yaml).unwrap();

    let mut form = BlockForm::new();
    let err = form.apply_draft(&draft).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert_eq!(form.record(), &bf_block::BlockRecord::default());
}

#[test]
fn draft_replay_fills_the_form() {
    let yaml = "fields:\n  name: Draft block\n  size: '1'\n  noRows: '3'\n  rowSpacing: '4'\n  treeSpacing: '2.5'\n  noTrees: '900'\n  dateOfPlanting: 19/10/2023\n  farmStatus: planting\n  comments: from draft\ncrops: [Pears, Kiwi, Citrus, Pears]\n";
    let draft: bf_block::BlockDraft = serde_yaml::from_str(yaml).unwrap();

    let mut form = BlockForm::new();
    form.apply_draft(&draft).unwrap();
    assert_eq!(
        form.record().crops.iter().copied().collect::<Vec<_>>(),
        vec![Crop::Citrus]
    );

    let block = accepted(form.submit(&clock()).unwrap());
    let derived = block.record.derived.unwrap();
    assert_eq!(derived.trees_per_hectare.to_string(), "1000.000");
    assert_eq!(derived.trees_per_vine.to_string(), "1000.000");
    assert_eq!(derived.age.to_string(), "3");
}
