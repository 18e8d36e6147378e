//! Block record schema definitions.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::DerivedMetrics;
use crate::validate::FieldError;

/// Format the date picker emits, minus the padding around the slashes.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("Unknown field: {0:?}")]
    UnknownField(String),

    #[error("Unknown option for {field}: {value:?}")]
    UnknownOption { field: FieldName, value: String },

    #[error("Field {0} cannot be set from text")]
    NotTextual(FieldName),
}

/// User-editable fields of a block record, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Name,
    Size,
    Crops,
    NoRows,
    RowSpacing,
    TreeSpacing,
    NoTrees,
    DateOfPlanting,
    FarmStatus,
    Comments,
}

/// How a field's value is held, which decides how emptiness is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    CropSet,
    Date,
    Choice,
}

impl FieldName {
    pub const ALL: [FieldName; 10] = [
        FieldName::Name,
        FieldName::Size,
        FieldName::Crops,
        FieldName::NoRows,
        FieldName::RowSpacing,
        FieldName::TreeSpacing,
        FieldName::NoTrees,
        FieldName::DateOfPlanting,
        FieldName::FarmStatus,
        FieldName::Comments,
    ];

    /// Input name used by the rendering layer.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Size => "size",
            FieldName::Crops => "crops",
            FieldName::NoRows => "noRows",
            FieldName::RowSpacing => "rowSpacing",
            FieldName::TreeSpacing => "treeSpacing",
            FieldName::NoTrees => "noTrees",
            FieldName::DateOfPlanting => "dateOfPlanting",
            FieldName::FarmStatus => "farmStatus",
            FieldName::Comments => "comments",
        }
    }

    /// Label shown next to the input. Every error message for the field
    /// contains it, and no label is a substring of another.
    pub fn label(self) -> &'static str {
        match self {
            FieldName::Name => "Block name",
            FieldName::Size => "Block's size",
            FieldName::Crops => "Crops",
            FieldName::NoRows => "No. Rows",
            FieldName::RowSpacing => "Row spacing",
            FieldName::TreeSpacing => "Tree spacing",
            FieldName::NoTrees => "No. of Trees",
            FieldName::DateOfPlanting => "Date",
            FieldName::FarmStatus => "Farm Status",
            FieldName::Comments => "Comments",
        }
    }

    pub fn missing_message(self) -> &'static str {
        match self {
            FieldName::Name => "Block name is required!",
            FieldName::Size => "Block's size is required!",
            FieldName::Crops => "Crops are required!",
            FieldName::NoRows => "No. Rows is required!",
            FieldName::RowSpacing => "Row spacing is required!",
            FieldName::TreeSpacing => "Tree spacing is required!",
            FieldName::NoTrees => "No. of Trees is required!",
            FieldName::DateOfPlanting => "Date is required!",
            FieldName::FarmStatus => "Farm Status is required!",
            FieldName::Comments => "Comments is required!",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldName::Name | FieldName::Comments => FieldKind::Text,
            FieldName::Size
            | FieldName::NoRows
            | FieldName::RowSpacing
            | FieldName::TreeSpacing
            | FieldName::NoTrees => FieldKind::Number,
            FieldName::Crops => FieldKind::CropSet,
            FieldName::DateOfPlanting => FieldKind::Date,
            FieldName::FarmStatus => FieldKind::Choice,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for FieldName {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FieldParseError::UnknownField(s.to_string()))
    }
}

/// Fixed crop catalog, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Crop {
    Apples,
    Pears,
    #[serde(rename = "Stone Fruits")]
    StoneFruits,
    #[serde(rename = "Table Grape")]
    TableGrape,
    Citrus,
}

impl Crop {
    pub const ALL: [Crop; 5] = [
        Crop::Apples,
        Crop::Pears,
        Crop::StoneFruits,
        Crop::TableGrape,
        Crop::Citrus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Crop::Apples => "Apples",
            Crop::Pears => "Pears",
            Crop::StoneFruits => "Stone Fruits",
            Crop::TableGrape => "Table Grape",
            Crop::Citrus => "Citrus",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Crop {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Crop::ALL
            .into_iter()
            .find(|crop| crop.label() == s)
            .ok_or_else(|| FieldParseError::UnknownOption {
                field: FieldName::Crops,
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FarmStatus {
    Planting,
    Growing,
}

impl FarmStatus {
    pub const ALL: [FarmStatus; 2] = [FarmStatus::Planting, FarmStatus::Growing];

    /// Submitted value.
    pub fn value(self) -> &'static str {
        match self {
            FarmStatus::Planting => "planting",
            FarmStatus::Growing => "growing",
        }
    }

    /// Option text.
    pub fn text(self) -> &'static str {
        match self {
            FarmStatus::Planting => "Planting",
            FarmStatus::Growing => "Growing",
        }
    }
}

impl FromStr for FarmStatus {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FarmStatus::ALL
            .into_iter()
            .find(|status| status.value() == s)
            .ok_or_else(|| FieldParseError::UnknownOption {
                field: FieldName::FarmStatus,
                value: s.to_string(),
            })
    }
}

/// Borrowed view of one field, typed by how the field is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Crops(&'a BTreeSet<Crop>),
    Choice(Option<FarmStatus>),
}

/// Replacement value for exactly one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    Size(String),
    Crops(BTreeSet<Crop>),
    NoRows(String),
    RowSpacing(String),
    TreeSpacing(String),
    NoTrees(String),
    DateOfPlanting(String),
    FarmStatus(Option<FarmStatus>),
    Comments(String),
}

impl FieldUpdate {
    /// Build an update from the text an input produced. A blank farm status
    /// clears the selection.
    pub fn from_text(field: FieldName, text: &str) -> Result<Self, FieldParseError> {
        let text_owned = text.to_string();
        Ok(match field {
            FieldName::Name => FieldUpdate::Name(text_owned),
            FieldName::Size => FieldUpdate::Size(text_owned),
            FieldName::NoRows => FieldUpdate::NoRows(text_owned),
            FieldName::RowSpacing => FieldUpdate::RowSpacing(text_owned),
            FieldName::TreeSpacing => FieldUpdate::TreeSpacing(text_owned),
            FieldName::NoTrees => FieldUpdate::NoTrees(text_owned),
            FieldName::DateOfPlanting => FieldUpdate::DateOfPlanting(text_owned),
            FieldName::Comments => FieldUpdate::Comments(text_owned),
            FieldName::FarmStatus if text.trim().is_empty() => FieldUpdate::FarmStatus(None),
            FieldName::FarmStatus => FieldUpdate::FarmStatus(Some(text.trim().parse()?)),
            FieldName::Crops => return Err(FieldParseError::NotTextual(field)),
        })
    }

    pub fn field(&self) -> FieldName {
        match self {
            FieldUpdate::Name(_) => FieldName::Name,
            FieldUpdate::Size(_) => FieldName::Size,
            FieldUpdate::Crops(_) => FieldName::Crops,
            FieldUpdate::NoRows(_) => FieldName::NoRows,
            FieldUpdate::RowSpacing(_) => FieldName::RowSpacing,
            FieldUpdate::TreeSpacing(_) => FieldName::TreeSpacing,
            FieldUpdate::NoTrees(_) => FieldName::NoTrees,
            FieldUpdate::DateOfPlanting(_) => FieldName::DateOfPlanting,
            FieldUpdate::FarmStatus(_) => FieldName::FarmStatus,
            FieldUpdate::Comments(_) => FieldName::Comments,
        }
    }
}

/// The in-progress block registration.
///
/// Numeric inputs are held as the text the user typed; they are parsed by
/// validation and derivation, never on entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub name: String,
    pub size: String,
    pub crops: BTreeSet<Crop>,
    pub no_rows: String,
    pub row_spacing: String,
    pub tree_spacing: String,
    pub no_trees: String,
    pub date_of_planting: String,
    pub farm_status: Option<FarmStatus>,
    pub comments: String,
    #[serde(flatten)]
    pub derived: Option<DerivedMetrics>,
    pub errors: Vec<FieldError>,
}

impl Default for BlockRecord {
    fn default() -> Self {
        let zero = || "0".to_string();
        Self {
            name: String::new(),
            size: zero(),
            crops: BTreeSet::new(),
            no_rows: zero(),
            row_spacing: zero(),
            tree_spacing: zero(),
            no_trees: zero(),
            date_of_planting: String::new(),
            farm_status: None,
            comments: String::new(),
            derived: None,
            errors: Vec::new(),
        }
    }
}

impl BlockRecord {
    pub fn value(&self, field: FieldName) -> FieldValue<'_> {
        match field {
            FieldName::Name => FieldValue::Text(&self.name),
            FieldName::Size => FieldValue::Text(&self.size),
            FieldName::Crops => FieldValue::Crops(&self.crops),
            FieldName::NoRows => FieldValue::Text(&self.no_rows),
            FieldName::RowSpacing => FieldValue::Text(&self.row_spacing),
            FieldName::TreeSpacing => FieldValue::Text(&self.tree_spacing),
            FieldName::NoTrees => FieldValue::Text(&self.no_trees),
            FieldName::DateOfPlanting => FieldValue::Text(&self.date_of_planting),
            FieldName::FarmStatus => FieldValue::Choice(self.farm_status),
            FieldName::Comments => FieldValue::Text(&self.comments),
        }
    }

    /// Raw text of a text-held field, `None` for crops and farm status.
    pub fn text(&self, field: FieldName) -> Option<&str> {
        match self.value(field) {
            FieldValue::Text(text) => Some(text),
            FieldValue::Crops(_) | FieldValue::Choice(_) => None,
        }
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Size(v) => self.size = v,
            FieldUpdate::Crops(v) => self.crops = v,
            FieldUpdate::NoRows(v) => self.no_rows = v,
            FieldUpdate::RowSpacing(v) => self.row_spacing = v,
            FieldUpdate::TreeSpacing(v) => self.tree_spacing = v,
            FieldUpdate::NoTrees(v) => self.no_trees = v,
            FieldUpdate::DateOfPlanting(v) => self.date_of_planting = v,
            FieldUpdate::FarmStatus(v) => self.farm_status = v,
            FieldUpdate::Comments(v) => self.comments = v,
        }
    }

    /// Flip membership of `crop`; returns whether it is now selected.
    pub fn toggle_crop(&mut self, crop: Crop) -> bool {
        if self.crops.remove(&crop) {
            false
        } else {
            self.crops.insert(crop);
            true
        }
    }
}

/// Parse a planting date as entered, tolerating the picker's
/// `DD / MM / YYYY` spacing.
pub fn parse_planting_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    NaiveDate::parse_from_str(&compact, DATE_FORMAT)
}

pub fn format_planting_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
