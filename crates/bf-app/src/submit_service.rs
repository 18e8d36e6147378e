//! Submit flow: validate, derive, hand off.

use bf_block::schema::BlockRecord;
use bf_block::{Clock, FieldError, derive_metrics, validate_record};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::form_service::BlockForm;

/// Timestamp layout for `submitted_at`.
const SUBMITTED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A record that passed validation and carries its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedBlock {
    #[serde(flatten)]
    pub record: BlockRecord,
    pub submitted_at: String,
}

impl FinalizedBlock {
    /// Flat key-value view of the block.
    pub fn to_payload(&self) -> AppResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected(Vec<FieldError>),
    Accepted(FinalizedBlock),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Receives finalized blocks, e.g. a persistence layer.
pub trait BlockSink {
    fn accept(&mut self, block: &FinalizedBlock) -> AppResult<()>;
}

impl BlockSink for Vec<FinalizedBlock> {
    fn accept(&mut self, block: &FinalizedBlock) -> AppResult<()> {
        self.push(block.clone());
        Ok(())
    }
}

impl BlockForm {
    /// Validate the current record; on success derive the metrics, clear the
    /// errors and return the finalized block. On failure only the error list
    /// changes.
    pub fn submit(&mut self, clock: &dyn Clock) -> AppResult<SubmitOutcome> {
        let snapshot = self.snapshot();
        let errors = validate_record(&snapshot);
        if !errors.is_empty() {
            warn!(count = errors.len(), "block submission rejected");
            self.replace_errors(errors.clone());
            return Ok(SubmitOutcome::Rejected(errors));
        }

        self.replace_errors(Vec::new());
        let metrics = derive_metrics(&snapshot, clock)?;
        self.apply_derived(metrics);

        let block = FinalizedBlock {
            record: self.snapshot(),
            submitted_at: clock.now().format(SUBMITTED_AT_FORMAT).to_string(),
        };
        info!(
            name = %block.record.name,
            trees_per_hectare = %metrics.trees_per_hectare,
            age = %metrics.age,
            "block submitted"
        );
        Ok(SubmitOutcome::Accepted(block))
    }

    /// Submit and pass an accepted block on to `sink`.
    pub fn submit_to(
        &mut self,
        clock: &dyn Clock,
        sink: &mut dyn BlockSink,
    ) -> AppResult<SubmitOutcome> {
        let outcome = self.submit(clock)?;
        if let SubmitOutcome::Accepted(block) = &outcome {
            sink.accept(block).map_err(|e| AppError::Sink {
                message: e.to_string(),
            })?;
        }
        Ok(outcome)
    }
}
