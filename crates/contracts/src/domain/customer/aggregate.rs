use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    Published,
    Archived,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Published => "PUBLISHED",
            CustomerStatus::Archived => "ARCHIVED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CustomerStatus::Published => "Active",
            CustomerStatus::Archived => "Archived",
        }
    }

    pub fn all() -> &'static [CustomerStatus] {
        &[CustomerStatus::Published, CustomerStatus::Archived]
    }
}

/// Customer row as returned by the customer search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub external_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
}
