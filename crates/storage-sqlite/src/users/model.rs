//! Database models for users.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for users
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub clerk_id: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Database model for creating a new user
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[serde(rename_all = "camelCase")]
pub struct NewUserDB {
    pub id: String,
    pub clerk_id: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

// Conversion to domain models
impl From<UserDB> for leadhub_core::users::User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            clerk_id: db.clerk_id,
            email: db.email,
            role: db.role,
            created_at: db.created_at,
        }
    }
}
