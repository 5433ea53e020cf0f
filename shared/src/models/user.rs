//! User Model

use super::actor::Role;
use serde::{Deserialize, Serialize};

/// User profile (directory record, read-only to the order core)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub role: Role,
    /// Owned restaurant (restaurant owners only)
    #[serde(default)]
    pub restaurant_id: Option<String>,
}
