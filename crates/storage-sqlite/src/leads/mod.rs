//! SQLite storage implementation for leads.

mod model;
mod repository;

pub use model::{LeadDB, NewLeadDB};
pub use repository::LeadRepository;
