//! Database models for leads.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::users::UserDB;

/// Database model for leads
#[derive(
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = owner_id))]
#[diesel(table_name = crate::schema::leads)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct LeadDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub owner_id: String,
    pub created_at: String,
}

/// Database model for creating a new lead
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::leads)]
#[serde(rename_all = "camelCase")]
pub struct NewLeadDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub owner_id: String,
    pub created_at: String,
}

// Conversion to domain models
impl From<LeadDB> for leadhub_core::leads::Lead {
    fn from(db: LeadDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            phone: db.phone,
            notes: db.notes,
            owner_id: db.owner_id,
            created_at: db.created_at,
        }
    }
}
