// Inventory record entity
// One tracked physical item, keyed by its barcode

use serde::{Deserialize, Serialize};

use crate::value_objects::PersonId;

pub const DEFAULT_QUANTITY: u32 = 1;
pub const DEFAULT_PRICE: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub shape: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<PersonId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

fn default_quantity() -> u32 {
    DEFAULT_QUANTITY
}

impl InventoryRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            unit: String::new(),
            quantity: DEFAULT_QUANTITY,
            price: DEFAULT_PRICE,
            color: String::new(),
            size: String::new(),
            shape: String::new(),
            notes: String::new(),
            entry_timestamp: None,
            person_id: None,
            saved_at: None,
        }
    }
}

/// Payload for a manual create-or-replace of a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDraft {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub shape: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub entry_timestamp: Option<String>,
    #[serde(default)]
    pub person_id: Option<PersonId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordListQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
}
