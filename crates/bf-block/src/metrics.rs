//! Derived agronomic metrics.

use bf_core::{CoreError, Fixed, grid_density, ha, m, parse_decimal};
use chrono::NaiveTime;
use serde::Serialize;

use crate::age::RelativeAge;
use crate::clock::Clock;
use crate::schema::{BlockRecord, FieldName, parse_planting_date};

/// Decimal places kept on the density metrics.
pub const METRIC_PLACES: usize = 3;

#[derive(thiserror::Error, Debug)]
pub enum DeriveError {
    #[error("Cannot derive from {field}: {source}")]
    Input {
        field: FieldName,
        #[source]
        source: CoreError,
    },

    #[error("Planting date {text:?} is not a DD/MM/YYYY date")]
    PlantingDate { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub trees_per_hectare: Fixed,
    pub trees_per_vine: Fixed,
    pub age: RelativeAge,
}

fn number(record: &BlockRecord, field: FieldName) -> Result<f64, DeriveError> {
    let text = record.text(field).unwrap_or_default();
    parse_decimal(text, field.key()).map_err(|source| DeriveError::Input { field, source })
}

/// Trees per hectare and trees per block, both rounded.
///
/// When a result does not fit in a finite float the error names the input
/// that pushed it out of range.
pub fn stocking(size: f64, row_spacing: f64, tree_spacing: f64) -> Result<(Fixed, Fixed), DeriveError> {
    let density = grid_density(ha(1.0), m(row_spacing), m(tree_spacing));
    let trees_per_hectare =
        Fixed::round(density, METRIC_PLACES, "treesPerHectare").map_err(|source| {
            let per_row = grid_density(ha(1.0), m(row_spacing), m(1.0));
            let field = if per_row.is_finite() {
                FieldName::TreeSpacing
            } else {
                FieldName::RowSpacing
            };
            DeriveError::Input { field, source }
        })?;
    let trees_per_vine = Fixed::round(
        size * trees_per_hectare.value(),
        METRIC_PLACES,
        "treesPerVine",
    )
    .map_err(|source| DeriveError::Input {
        field: FieldName::Size,
        source,
    })?;
    Ok((trees_per_hectare, trees_per_vine))
}

/// Compute the metrics for a record that passed validation.
///
/// `trees_per_vine` is computed from the already rounded density so the two
/// displayed values agree with each other.
pub fn derive_metrics(record: &BlockRecord, clock: &dyn Clock) -> Result<DerivedMetrics, DeriveError> {
    let size = number(record, FieldName::Size)?;
    let row_spacing = number(record, FieldName::RowSpacing)?;
    let tree_spacing = number(record, FieldName::TreeSpacing)?;

    let (trees_per_hectare, trees_per_vine) = stocking(size, row_spacing, tree_spacing)?;

    let planted = parse_planting_date(&record.date_of_planting).map_err(|_| {
        DeriveError::PlantingDate {
            text: record.date_of_planting.clone(),
        }
    })?;
    let age = RelativeAge::between(planted.and_time(NaiveTime::MIN), clock.now());

    Ok(DerivedMetrics {
        trees_per_hectare,
        trees_per_vine,
        age,
    })
}
