//! Leads domain models.

use serde::{Deserialize, Serialize};

use crate::users::User;

/// Domain model representing a sales lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub owner_id: String,
    pub created_at: String,
}

/// A lead together with its owning user, as returned by the create and
/// listing operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadWithOwner {
    #[serde(flatten)]
    pub lead: Lead,
    pub owner: User,
}

/// Input model for creating a new lead.
///
/// `owner_clerk_id` references the owning user by external identity id;
/// `owner_email` seeds the user record when that id has never been seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub owner_clerk_id: String,
    pub owner_email: Option<String>,
}
