//! Main entry point for the Panelkit server.

use panelkit_server::{model::Configuration, startup};
use tracing::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new()?;

    let logging_config = configuration.logging_config();
    let _logging_guard = startup::init_logging(&logging_config)?;

    let address = configuration.server_address();
    let port = configuration.server_port();
    let context_path = configuration.server_context_path();

    let app_state = startup::build_state(configuration).await?;

    match app_state.configuration.external_api_base() {
        Some(base) => info!(
            "Proxying {} to {}",
            app_state.configuration.proxy_base_path(),
            base
        ),
        None => info!("No external API base configured; proxy requests will fail with 502"),
    }

    info!(
        "Starting Panelkit server on {}:{}{}",
        address, port, context_path
    );
    startup::main_server(app_state, address, port)?.await?;

    info!("Panelkit server stopped");
    Ok(())
}
