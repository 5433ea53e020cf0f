//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity (directory record, read-only to the order core)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Restaurant {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_open: bool,
    #[serde(default = "default_true")]
    pub delivery_available: bool,
}

fn default_true() -> bool {
    true
}
