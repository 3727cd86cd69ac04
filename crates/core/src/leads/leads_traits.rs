use crate::errors::Result;
use crate::leads::{Lead, LeadWithOwner, NewLead};
use async_trait::async_trait;

/// Trait for lead repository operations
#[async_trait]
pub trait LeadRepositoryTrait: Send + Sync {
    /// Load all leads with their owners, newest first.
    fn load_leads_with_owners(&self) -> Result<Vec<LeadWithOwner>>;
    async fn insert_new_lead(&self, new_lead: NewLead, owner_id: String) -> Result<Lead>;
}

/// Trait for lead service operations
#[async_trait]
pub trait LeadServiceTrait: Send + Sync {
    fn get_leads(&self) -> Result<Vec<LeadWithOwner>>;
    async fn create_lead(&self, new_lead: NewLead) -> Result<LeadWithOwner>;
}
