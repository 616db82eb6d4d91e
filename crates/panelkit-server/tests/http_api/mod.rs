//! HTTP API integration tests
//!
//! Config documents, resources, sidebar, registry listing, rendering and
//! the external API proxy.

pub mod lists_api_test;
pub mod pages_api_test;
pub mod proxy_api_test;
pub mod registry_api_test;
pub mod render_api_test;
pub mod resources_api_test;
pub mod show_api_test;
pub mod sidebar_api_test;
