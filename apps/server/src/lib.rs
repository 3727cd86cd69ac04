pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod realtime;
pub mod subscriber;
mod main_lib;

pub use api::app_router;
pub use config::Config;
pub use main_lib::{build_state, init_tracing, AppState};
pub use subscriber::spawn_change_subscriber;
