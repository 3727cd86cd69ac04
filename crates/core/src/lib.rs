//! Database-agnostic domain layer for the LeadHub CRM backend.
//!
//! This crate defines the domain models, service and repository traits, and
//! the error tree. It knows nothing about the storage engine or the web
//! framework: the storage crate implements the repository and change-feed
//! traits, the server crate drives the services.

pub mod changes;
pub mod errors;
pub mod leads;
pub mod users;

pub use errors::{DatabaseError, Error, Result, ValidationError};
