//! Field store: the single in-progress block record.

use bf_block::schema::{BlockRecord, Crop, FieldName, FieldUpdate};
use bf_block::{BlockDraft, DerivedMetrics, FieldError};
use tracing::{debug, warn};

use crate::error::AppResult;

/// Owns the record being edited. All mutation of the record goes through
/// here; validation and derivation only ever see snapshots.
#[derive(Debug, Clone, Default)]
pub struct BlockForm {
    record: BlockRecord,
}

impl BlockForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, for display.
    pub fn record(&self) -> &BlockRecord {
        &self.record
    }

    /// Detached copy for validation and derivation to work on.
    pub fn snapshot(&self) -> BlockRecord {
        self.record.clone()
    }

    /// Replace one field. No validation happens until submit.
    pub fn set_field(&mut self, update: FieldUpdate) {
        debug!(field = %update.field(), "field updated");
        self.record.apply(update);
    }

    /// Replace one field from its input name and the text the input holds.
    pub fn set_field_text(&mut self, name: &str, text: &str) -> AppResult<()> {
        let field: FieldName = name.parse()?;
        self.set_field(FieldUpdate::from_text(field, text)?);
        Ok(())
    }

    pub fn toggle_crop(&mut self, crop: Crop) {
        let selected = self.record.toggle_crop(crop);
        debug!(%crop, selected, "crop toggled");
    }

    /// Toggle a crop by its catalog label. Labels outside the catalog are
    /// ignored; returns whether anything changed.
    pub fn toggle_crop_tag(&mut self, tag: &str) -> bool {
        match tag.parse::<Crop>() {
            Ok(crop) => {
                self.toggle_crop(crop);
                true
            }
            Err(_) => {
                warn!(tag, "ignoring crop outside the catalog");
                false
            }
        }
    }

    pub fn replace_errors(&mut self, errors: Vec<FieldError>) {
        self.record.errors = errors;
    }

    pub fn apply_derived(&mut self, metrics: DerivedMetrics) {
        self.record.derived = Some(metrics);
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.record.errors
    }

    /// The message to render under `field`, if the last submit flagged it.
    pub fn error_for(&self, field: FieldName) -> Option<&FieldError> {
        self.record.errors.iter().find(|err| err.field() == field)
    }

    /// Back to the blank form.
    pub fn reset(&mut self) {
        self.record = BlockRecord::default();
    }

    /// Replay a draft: field entries in declaration order, then crop clicks.
    /// Nothing is applied if any entry fails to parse.
    pub fn apply_draft(&mut self, draft: &BlockDraft) -> AppResult<()> {
        let updates = draft
            .fields
            .iter()
            .map(|(field, text)| FieldUpdate::from_text(*field, text))
            .collect::<Result<Vec<_>, _>>()?;
        for update in updates {
            self.set_field(update);
        }
        for tag in &draft.crops {
            self.toggle_crop_tag(tag);
        }
        Ok(())
    }
}
