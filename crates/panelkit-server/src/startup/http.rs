//! HTTP server setup

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::{
    api,
    error::{json_error_handler, path_error_handler, query_error_handler},
    middleware::RequestTracing,
    model::AppState,
};

/// Register shared state, extractor error handlers and every route.
///
/// Used by [`main_server`] and by the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig, app_state: Arc<AppState>) {
    let context_path = app_state.configuration.server_context_path();
    let proxy_base = app_state.configuration.proxy_base_path();

    cfg.app_data(web::Data::from(app_state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope(&context_path)
                .service(api::health::routes())
                .service(api::config_routes())
                .service(api::registry::routes())
                .service(api::render::routes())
                .service(api::proxy::routes(&proxy_base)),
        );
}

/// Creates and binds the main HTTP server.
pub fn main_server(app_state: Arc<AppState>, address: String, port: u16) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        let state = app_state.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(RequestTracing)
            .configure(move |cfg| configure(cfg, state))
    })
    .bind((address, port))?
    .run())
}
