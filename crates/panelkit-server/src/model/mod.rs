//! Server-side models: configuration, shared state and response envelope

pub mod app_state;
pub mod config;
pub mod response;

pub use app_state::{AppState, PageCacheKey};
pub use config::{Cli, Configuration};
