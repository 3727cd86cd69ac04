use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use leadhub_core::changes::ChangeNotification;
use leadhub_core::leads::{Lead, LeadRepositoryTrait, LeadWithOwner, NewLead};
use leadhub_core::Result;

use super::model::{LeadDB, NewLeadDB};
use crate::changes::SqliteChangeFeed;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{leads, users};
use crate::users::UserDB;

pub struct LeadRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    change_feed: Arc<SqliteChangeFeed>,
}

impl LeadRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, change_feed: Arc<SqliteChangeFeed>) -> Self {
        LeadRepository {
            pool,
            writer,
            change_feed,
        }
    }
}

#[async_trait]
impl LeadRepositoryTrait for LeadRepository {
    fn load_leads_with_owners(&self) -> Result<Vec<LeadWithOwner>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = leads::table
            .inner_join(users::table)
            .order(leads::created_at.desc())
            .select((LeadDB::as_select(), UserDB::as_select()))
            .load::<(LeadDB, UserDB)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(lead_db, owner_db)| LeadWithOwner {
                lead: lead_db.into(),
                owner: owner_db.into(),
            })
            .collect())
    }

    async fn insert_new_lead(&self, new_lead: NewLead, owner_id: String) -> Result<Lead> {
        let row = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<LeadDB> {
                let new_lead_db = NewLeadDB {
                    id: Uuid::new_v4().to_string(),
                    name: new_lead.name,
                    email: new_lead.email,
                    phone: new_lead.phone,
                    notes: new_lead.notes,
                    owner_id,
                    created_at: Utc::now().to_rfc3339(),
                };

                let result_db = diesel::insert_into(leads::table)
                    .values(&new_lead_db)
                    .returning(LeadDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db)
            })
            .await?;

        // Published only after the transaction committed: listeners learn
        // about the row through the change feed, independent of the request
        // that produced it.
        match serde_json::to_value(&row) {
            Ok(state) => self.change_feed.publish(ChangeNotification::insert(state)),
            Err(e) => log::error!("Failed to serialize lead change notification: {}", e),
        }

        Ok(Lead::from(row))
    }
}
