//! Lead service: validation, owner resolution, and persistence.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{Result, ValidationError};
use crate::leads::{LeadRepositoryTrait, LeadServiceTrait, LeadWithOwner, NewLead};
use crate::users::{NewUser, User, UserRepositoryTrait, DEFAULT_ROLE};

pub struct LeadService {
    lead_repository: Arc<dyn LeadRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl LeadService {
    pub fn new(
        lead_repository: Arc<dyn LeadRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            lead_repository,
            user_repository,
        }
    }

    /// Resolve the owning user for a lead, creating one on first use.
    ///
    /// Read-then-create: two concurrent requests for the same unseen clerk id
    /// may both attempt creation. The unique constraint on the clerk id is
    /// the backstop; a violation surfaces as a database error.
    async fn resolve_owner(&self, new_lead: &NewLead) -> Result<User> {
        if let Some(owner) = self
            .user_repository
            .find_by_clerk_id(&new_lead.owner_clerk_id)?
        {
            return Ok(owner);
        }
        let email = new_lead
            .owner_email
            .clone()
            .unwrap_or_else(|| format!("{}@unknown", new_lead.owner_clerk_id));
        self.user_repository
            .insert_new_user(NewUser {
                clerk_id: new_lead.owner_clerk_id.clone(),
                email,
                role: DEFAULT_ROLE.to_string(),
            })
            .await
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field).into());
    }
    Ok(())
}

#[async_trait]
impl LeadServiceTrait for LeadService {
    fn get_leads(&self) -> Result<Vec<LeadWithOwner>> {
        self.lead_repository.load_leads_with_owners()
    }

    async fn create_lead(&self, new_lead: NewLead) -> Result<LeadWithOwner> {
        require_non_empty(&new_lead.name, "name")?;
        require_non_empty(&new_lead.email, "email")?;
        require_non_empty(&new_lead.owner_clerk_id, "ownerClerkId")?;

        let owner = self.resolve_owner(&new_lead).await?;
        let lead = self
            .lead_repository
            .insert_new_lead(new_lead, owner.id.clone())
            .await?;
        Ok(LeadWithOwner { lead, owner })
    }
}
