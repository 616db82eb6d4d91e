//! Panelkit server library
//!
//! HTTP surface of the admin-panel builder: configuration documents,
//! registry listing, server-side rendering and the external API proxy.

pub mod api;
pub mod error;
pub mod middleware;
pub mod model;
pub mod service;
pub mod startup;

pub use error::AppError;
pub use model::{AppState, Configuration};
