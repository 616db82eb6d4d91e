//! List configuration service (`/config/lists`)

use panelkit_api::validation::Check;
use panelkit_api::{ColumnConfig, FilterConfig, ListConfig, ListConfigPatch};
use panelkit_common::generate_id;
use panelkit_page::editor::{delete_by_id, move_to, submit_column, submit_filter};
use panelkit_page::{ColumnDraft, FilterDraft};
use panelkit_persistence::{collections, get_as, put_as};

use crate::model::AppState;

const LIST_ID_PREFIX: &str = "list";

/// Stored list configuration, or an unsaved empty one
pub async fn get_list(state: &AppState, resource_id: &str) -> anyhow::Result<ListConfig> {
    let stored: Option<ListConfig> = match get_as(state.store.as_ref(), collections::LISTS, resource_id).await {
        Ok(stored) => stored,
        Err(e) => {
            if e.downcast_ref::<serde_json::Error>().is_none() {
                return Err(e);
            }
            tracing::warn!("Stored list config for '{}' is malformed: {}", resource_id, e);
            None
        }
    };
    Ok(stored.unwrap_or_else(|| ListConfig::empty(resource_id)))
}

pub async fn patch_list(state: &AppState, resource_id: &str, patch: ListConfigPatch) -> anyhow::Result<ListConfig> {
    let mut config = get_list(state, resource_id).await?;
    patch.apply_to(&mut config);
    save(state, resource_id, config).await
}

pub async fn delete_list(state: &AppState, resource_id: &str) -> anyhow::Result<bool> {
    state.store.delete(collections::LISTS, resource_id).await
}

/// Create or replace a column, returning the saved config and the column id
pub async fn submit_list_column(
    state: &AppState,
    resource_id: &str,
    draft: ColumnDraft,
) -> anyhow::Result<(ListConfig, String)> {
    let mut config = get_list(state, resource_id).await?;
    let (columns, id) = submit_column(&config.columns, draft)?;
    config.columns = columns;
    Ok((save(state, resource_id, config).await?, id))
}

pub async fn delete_list_column(state: &AppState, resource_id: &str, column_id: &str) -> anyhow::Result<ListConfig> {
    let mut config = get_list(state, resource_id).await?;
    config.columns = delete_by_id::<ColumnConfig>(&config.columns, column_id)?;
    save(state, resource_id, config).await
}

pub async fn move_list_column(
    state: &AppState,
    resource_id: &str,
    column_id: &str,
    to: usize,
) -> anyhow::Result<ListConfig> {
    let mut config = get_list(state, resource_id).await?;
    config.columns = move_to::<ColumnConfig>(&config.columns, column_id, to)?;
    save(state, resource_id, config).await
}

/// Create or replace a filter, returning the saved config and the filter id
pub async fn submit_list_filter(
    state: &AppState,
    resource_id: &str,
    draft: FilterDraft,
) -> anyhow::Result<(ListConfig, String)> {
    let mut config = get_list(state, resource_id).await?;
    let (filters, id) = submit_filter(&config.filters, draft)?;
    config.filters = filters;
    Ok((save(state, resource_id, config).await?, id))
}

pub async fn delete_list_filter(state: &AppState, resource_id: &str, filter_id: &str) -> anyhow::Result<ListConfig> {
    let mut config = get_list(state, resource_id).await?;
    config.filters = delete_by_id::<FilterConfig>(&config.filters, filter_id)?;
    save(state, resource_id, config).await
}

pub async fn move_list_filter(
    state: &AppState,
    resource_id: &str,
    filter_id: &str,
    to: usize,
) -> anyhow::Result<ListConfig> {
    let mut config = get_list(state, resource_id).await?;
    config.filters = move_to::<FilterConfig>(&config.filters, filter_id, to)?;
    save(state, resource_id, config).await
}

async fn save(state: &AppState, resource_id: &str, mut config: ListConfig) -> anyhow::Result<ListConfig> {
    config.resource_id = resource_id.to_string();
    config.check()?;
    if config.id.is_none() {
        config.id = Some(generate_id(LIST_ID_PREFIX));
    }
    put_as(state.store.as_ref(), collections::LISTS, resource_id, &config).await?;
    Ok(config)
}

