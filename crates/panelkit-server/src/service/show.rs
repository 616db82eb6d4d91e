//! Show page layout service (`/config/show`)

use panelkit_api::validation::Check;
use panelkit_api::{ShowConfig, ShowConfigPatch};
use panelkit_common::generate_id;
use panelkit_persistence::{collections, get_as, put_as};

use crate::model::AppState;

const SHOW_ID_PREFIX: &str = "show";

pub async fn get_show(state: &AppState, resource_id: &str) -> anyhow::Result<ShowConfig> {
    let stored: Option<ShowConfig> = get_as(state.store.as_ref(), collections::SHOW_CONFIGS, resource_id).await?;
    Ok(stored.unwrap_or_else(|| ShowConfig::empty(resource_id)))
}

/// Replace the tab layout of a show page
pub async fn patch_show(state: &AppState, resource_id: &str, patch: ShowConfigPatch) -> anyhow::Result<ShowConfig> {
    let mut config = get_show(state, resource_id).await?;
    config.resource_id = resource_id.to_string();
    config.tabs = patch.tabs;
    config.check()?;
    if config.id.is_none() {
        config.id = Some(generate_id(SHOW_ID_PREFIX));
    }

    put_as(state.store.as_ref(), collections::SHOW_CONFIGS, resource_id, &config).await?;
    Ok(config)
}
