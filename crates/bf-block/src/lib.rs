//! bf-block: block record schema, validation and derived metrics.

pub mod age;
pub mod clock;
pub mod draft;
pub mod metrics;
pub mod schema;
pub mod validate;

pub use age::{AgeUnit, RelativeAge};
pub use clock::{Clock, FixedClock, SystemClock};
pub use draft::BlockDraft;
pub use metrics::{DeriveError, DerivedMetrics, METRIC_PLACES, derive_metrics, stocking};
pub use schema::*;
pub use validate::{FieldError, FormatRule, validate_record};

pub type BlockResult<T> = Result<T, BlockError>;

#[derive(thiserror::Error, Debug)]
pub enum BlockError {
    #[error("Unsupported draft format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_draft_yaml(path: &std::path::Path) -> BlockResult<BlockDraft> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

pub fn save_draft_yaml(path: &std::path::Path, draft: &BlockDraft) -> BlockResult<()> {
    let content = serde_yaml::to_string(draft)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_draft_json(path: &std::path::Path) -> BlockResult<BlockDraft> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_draft_json(path: &std::path::Path, draft: &BlockDraft) -> BlockResult<()> {
    let content = serde_json::to_string_pretty(draft)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Pick the loader from the file extension (`.yaml`/`.yml` or `.json`).
pub fn load_draft(path: &std::path::Path) -> BlockResult<BlockDraft> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_draft_yaml(path),
        Some("json") => load_draft_json(path),
        _ => Err(BlockError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}
