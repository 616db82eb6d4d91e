//! Sidebar configuration service

use panelkit_api::SidebarConfig;
use panelkit_api::validation::Check;
use panelkit_common::SIDEBAR_ID;
use panelkit_persistence::{collections, get_as, put_as};

use super::resource::list_resources;
use crate::model::AppState;

/// Stored sidebar, or one group listing every resource
pub async fn get_sidebar(state: &AppState) -> anyhow::Result<SidebarConfig> {
    if let Some(sidebar) = get_as::<SidebarConfig>(state.store.as_ref(), collections::SIDEBAR, SIDEBAR_ID).await? {
        return Ok(sidebar);
    }
    let resources = list_resources(state).await?;
    Ok(SidebarConfig::from_resources(&resources))
}

pub async fn put_sidebar(state: &AppState, mut sidebar: SidebarConfig) -> anyhow::Result<SidebarConfig> {
    sidebar.id = SIDEBAR_ID.to_string();
    sidebar.check()?;
    put_as(state.store.as_ref(), collections::SIDEBAR, SIDEBAR_ID, &sidebar).await?;
    Ok(sidebar)
}
