//! Actor Model
//!
//! The authenticated role + identity under which every core operation runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// End user placing orders (legacy claim value: `user`)
    #[serde(alias = "user")]
    Customer,
    /// Owner of exactly one restaurant (legacy claim value: `restaurant`)
    #[serde(alias = "restaurant")]
    RestaurantOwner,
    Admin,
}

impl Role {
    /// Parse a role claim, accepting legacy aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" | "user" => Some(Self::Customer),
            "restaurant_owner" | "restaurant" => Some(Self::RestaurantOwner),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::RestaurantOwner => "restaurant_owner",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit actor context passed into cart and order operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub role: Role,
    pub id: String,
    /// Owned restaurant (restaurant owners only)
    pub restaurant_id: Option<String>,
}

impl Actor {
    pub fn customer(id: impl Into<String>) -> Self {
        Self {
            role: Role::Customer,
            id: id.into(),
            restaurant_id: None,
        }
    }

    pub fn owner(id: impl Into<String>, restaurant_id: impl Into<String>) -> Self {
        Self {
            role: Role::RestaurantOwner,
            id: id.into(),
            restaurant_id: Some(restaurant_id.into()),
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            id: id.into(),
            restaurant_id: None,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
