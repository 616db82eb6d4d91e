//! Server startup: logging, state construction and the HTTP server

pub mod http;
pub mod logging;
pub mod state;

pub use http::{configure, main_server};
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};
pub use state::build_state;
