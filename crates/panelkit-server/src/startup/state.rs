//! Application state construction

use std::sync::Arc;

use panelkit_persistence::create_store;
use panelkit_registry::Registry;
use tracing::info;

use crate::model::{AppState, Configuration};

/// Build the registry (built-ins plus configured extensions), open the
/// configured store and assemble the shared state.
pub async fn build_state(configuration: Configuration) -> anyhow::Result<Arc<AppState>> {
    let registry = Registry::with_builtins();
    let extensions = configuration.registry_extensions()?;
    let applied = registry.apply_extensions(&extensions)?;
    if applied > 0 {
        info!("Registered {} consumer units from configuration", applied);
    }

    let storage_mode = configuration.storage_mode()?;
    let store = create_store(storage_mode, configuration.data_dir()).await?;

    let state = AppState::new(configuration, store, Arc::new(registry))?;
    Ok(Arc::new(state))
}
