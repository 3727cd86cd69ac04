//! User domain models.

use serde::{Deserialize, Serialize};

/// Role assigned to owners created on first use. The full set of role labels
/// is an identity-provider concern; the store only records the label.
pub const DEFAULT_ROLE: &str = "SALES";

/// Domain model representing a salesperson known to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Subject id issued by the external identity provider; unique, and the
    /// lookup key for inbound requests.
    pub clerk_id: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Input model for creating a user the first time a request references an
/// unknown external identity id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub clerk_id: String,
    pub email: String,
    pub role: String,
}
