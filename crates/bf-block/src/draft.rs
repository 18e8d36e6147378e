//! Draft files: a recorded sequence of form inputs.
//!
//! ```yaml
//! fields:
//!   name: North block
//!   size: "4"
//!   dateOfPlanting: 19 / 10 / 2023
//! crops: [Apples, Stone Fruits]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::FieldName;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDraft {
    /// Text entered per field, replayed in declaration order.
    #[serde(default)]
    pub fields: BTreeMap<FieldName, String>,
    /// Crop option clicks, replayed in order. Tags outside the catalog are
    /// kept so the replay can skip them.
    #[serde(default)]
    pub crops: Vec<String>,
}
