//! Page configuration service
//!
//! Reads go through the page cache and the resolver; writes validate every
//! block against the registry, persist the whole document in one store call
//! and invalidate exactly the `(resourceId, pageType)` cache entry.
//!
//! Every write bumps the entry's epoch before evicting it. A read that
//! missed the cache only keeps its result if the epoch it started from is
//! still current after the insert, so a slow read never re-caches a page
//! that a write has already replaced.

use panelkit_api::validation::Check;
use panelkit_api::{PageConfig, PageType, PatchPageRequest};
use panelkit_common::generate_id;
use panelkit_page::{PageKey, replace_block_config, resolve_document, validate_block_config};
use serde_json::{Map, Value};

use crate::model::{AppState, PageCacheKey};

const PAGE_ID_PREFIX: &str = "page";

/// Resolved page configuration; never fails for a missing document
pub async fn get_page(state: &AppState, resource_id: &str, page_type: PageType) -> anyhow::Result<PageConfig> {
    let cache_key = (resource_id.to_string(), page_type);
    if let Some(page) = state.page_cache.get(&cache_key).await {
        return Ok(page);
    }

    let epoch = page_epoch(state, &cache_key);
    let page = load_page(state, resource_id, page_type).await?;
    fill_cache(state, cache_key, epoch, page.clone()).await;
    Ok(page)
}

async fn load_page(state: &AppState, resource_id: &str, page_type: PageType) -> anyhow::Result<PageConfig> {
    let key = PageKey::new(resource_id, page_type);
    let raw = state.store.get(key.collection(), &key.key).await?;
    Ok(resolve_document(resource_id, page_type, raw.as_ref()).config)
}

fn page_epoch(state: &AppState, key: &PageCacheKey) -> u64 {
    state.page_epochs.get(key).map_or(0, |epoch| *epoch)
}

/// Cache a page read at `epoch` unless a write has landed since
async fn fill_cache(state: &AppState, key: PageCacheKey, epoch: u64, page: PageConfig) {
    if page_epoch(state, &key) != epoch {
        return;
    }
    state.page_cache.insert(key.clone(), page).await;
    // a write between the check and the insert
    if page_epoch(state, &key) != epoch {
        state.page_cache.invalidate(&key).await;
    }
}

/// Replace the whole blocks array of a page
pub async fn patch_page(
    state: &AppState,
    resource_id: &str,
    page_type: PageType,
    request: PatchPageRequest,
) -> anyhow::Result<PageConfig> {
    request.check()?;
    let ctx = state.render_context();
    for block in &request.blocks {
        validate_block_config(&ctx, &block.slug, &block.config)?;
    }

    let key = PageKey::new(resource_id, page_type);
    let id = stored_id(state, &key).await?.unwrap_or_else(|| generate_id(PAGE_ID_PREFIX));
    let page = PageConfig {
        id: Some(id),
        resource_id: resource_id.to_string(),
        blocks: request.blocks,
    };

    state
        .store
        .put(key.collection(), &key.key, serde_json::to_value(&page)?)
        .await?;
    invalidate(state, resource_id, page_type).await;

    tracing::info!(
        "Saved {} page for '{}' with {} blocks",
        page_type,
        resource_id,
        page.blocks.len()
    );
    Ok(page)
}

/// Replace one block's config and persist the updated blocks array
pub async fn put_block_config(
    state: &AppState,
    resource_id: &str,
    page_type: PageType,
    block_id: &str,
    config: Map<String, Value>,
) -> anyhow::Result<PageConfig> {
    let current = get_page(state, resource_id, page_type).await?;
    let blocks = replace_block_config(&current.blocks, block_id, config)?;
    patch_page(state, resource_id, page_type, PatchPageRequest { blocks }).await
}

/// Remove the stored document; the next read yields the default template
pub async fn delete_page(state: &AppState, resource_id: &str, page_type: PageType) -> anyhow::Result<bool> {
    let key = PageKey::new(resource_id, page_type);
    let deleted = state.store.delete(key.collection(), &key.key).await?;
    invalidate(state, resource_id, page_type).await;
    Ok(deleted)
}

async fn stored_id(state: &AppState, key: &PageKey) -> anyhow::Result<Option<String>> {
    let raw = state.store.get(key.collection(), &key.key).await?;
    Ok(raw
        .as_ref()
        .and_then(|doc| doc.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string))
}

async fn invalidate(state: &AppState, resource_id: &str, page_type: PageType) {
    let key = (resource_id.to_string(), page_type);
    *state.page_epochs.entry(key.clone()).or_insert(0) += 1;
    state.page_cache.invalidate(&key).await;
}
