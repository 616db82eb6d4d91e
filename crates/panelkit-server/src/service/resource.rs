//! Resource registry service
//!
//! Resource names are globally unique. Writes hold `AppState::resource_lock`
//! so the uniqueness check and the store write cannot interleave.

use panelkit_api::validation::Check;
use panelkit_api::{CreateResourceRequest, Resource, UpdateResourceRequest};
use panelkit_common::{PanelError, generate_id};
use panelkit_persistence::{collections, get_as, list_as, put_as};

use crate::model::AppState;

const RESOURCE_ID_PREFIX: &str = "res";

/// All resources ordered by name
pub async fn list_resources(state: &AppState) -> anyhow::Result<Vec<Resource>> {
    let mut resources: Vec<Resource> = list_as(state.store.as_ref(), collections::RESOURCES).await?;
    resources.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(resources)
}

pub async fn get_resource(state: &AppState, id: &str) -> anyhow::Result<Resource> {
    get_as(state.store.as_ref(), collections::RESOURCES, id)
        .await?
        .ok_or_else(|| PanelError::NotFound(format!("resource '{}'", id)).into())
}

/// Look a resource up by id first, then by name
pub async fn find_resource(state: &AppState, id_or_name: &str) -> anyhow::Result<Option<Resource>> {
    if let Some(resource) = get_as::<Resource>(state.store.as_ref(), collections::RESOURCES, id_or_name).await? {
        return Ok(Some(resource));
    }
    Ok(list_resources(state)
        .await?
        .into_iter()
        .find(|r| r.name == id_or_name))
}

pub async fn create_resource(state: &AppState, request: CreateResourceRequest) -> anyhow::Result<Resource> {
    request.check()?;
    let _guard = state.resource_lock.lock().await;

    let existing = list_resources(state).await?;
    ensure_name_available(&existing, &request.name, None)?;

    let id = loop {
        let candidate = generate_id(RESOURCE_ID_PREFIX);
        if !existing.iter().any(|r| r.id == candidate) {
            break candidate;
        }
    };
    let resource = request.into_resource(id);
    put_as(state.store.as_ref(), collections::RESOURCES, &resource.id, &resource).await?;

    tracing::info!("Created resource '{}' ({})", resource.name, resource.id);
    Ok(resource)
}

pub async fn update_resource(
    state: &AppState,
    id: &str,
    request: UpdateResourceRequest,
) -> anyhow::Result<Resource> {
    request.check()?;
    let _guard = state.resource_lock.lock().await;

    let mut resource = get_resource(state, id).await?;
    if let Some(name) = &request.name {
        let existing = list_resources(state).await?;
        ensure_name_available(&existing, name, Some(id))?;
    }
    request.apply_to(&mut resource);
    put_as(state.store.as_ref(), collections::RESOURCES, id, &resource).await?;
    Ok(resource)
}

/// Page configurations referencing the resource are left in place
pub async fn delete_resource(state: &AppState, id: &str) -> anyhow::Result<()> {
    let _guard = state.resource_lock.lock().await;
    if !state.store.delete(collections::RESOURCES, id).await? {
        return Err(PanelError::NotFound(format!("resource '{}'", id)).into());
    }
    tracing::info!("Deleted resource {}", id);
    Ok(())
}

fn ensure_name_available(existing: &[Resource], name: &str, except_id: Option<&str>) -> Result<(), PanelError> {
    let taken = existing
        .iter()
        .any(|r| r.name == name && Some(r.id.as_str()) != except_id);
    if taken {
        return Err(PanelError::Duplicate(format!(
            "resource name '{}' already exists",
            name
        )));
    }
    Ok(())
}
