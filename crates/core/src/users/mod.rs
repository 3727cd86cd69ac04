//! Users module - domain models and traits.

mod users_model;
mod users_traits;

pub use users_model::{NewUser, User, DEFAULT_ROLE};
pub use users_traits::UserRepositoryTrait;
