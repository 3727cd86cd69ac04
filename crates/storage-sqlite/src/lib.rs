//! SQLite storage implementation for LeadHub.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository and change-feed traits defined
//! in `leadhub-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users and leads
//! - The change feed publishing committed row changes
//!
//! This is the only place in the application where Diesel dependencies
//! exist. All other crates are database-agnostic and work with traits.

pub mod changes;
pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod leads;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

pub use changes::SqliteChangeFeed;
pub use leads::LeadRepository;
pub use users::UserRepository;
