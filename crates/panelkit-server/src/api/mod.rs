//! HTTP handlers
//!
//! - `/config/pages`, `/config/lists`, `/config/show`, `/config/resources`,
//!   `/config/sidebar`: configuration documents
//! - `/registry`: registered unit definitions and their schemas
//! - `/render`: server-side page rendering
//! - `{proxy.base_path}`: reverse proxy to the external REST API

pub mod health;
pub mod lists;
pub mod pages;
pub mod proxy;
pub mod registry;
pub mod render;
pub mod resources;
pub mod show;
pub mod sidebar;

use actix_web::{Scope, web};

/// Configuration document routes mounted under `/config`
pub fn config_routes() -> Scope {
    web::scope("/config")
        .service(pages::routes())
        .service(lists::routes())
        .service(show::routes())
        .service(resources::routes())
        .service(sidebar::routes())
}
