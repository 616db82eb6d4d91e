//! Server-side page rendering

use panelkit_api::{PageConfig, PageType};
use panelkit_page::{RuntimeProps, render_page};
use panelkit_registry::View;
use serde::Serialize;
use serde_json::{Map, Value, json};

use super::page::get_page;
use super::resource::find_resource;
use crate::model::AppState;

/// A resolved page together with its rendered tree
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub page_type: PageType,
    pub edit_mode: bool,
    pub page: PageConfig,
    pub view: View,
}

/// Resolve and render a page.
///
/// `data` carries live values such as `records`, `record`, `total` or `page`;
/// it reaches every block as runtime props and is never persisted.
pub async fn render_resource_page(
    state: &AppState,
    resource_id: &str,
    page_type: PageType,
    edit_mode: bool,
    data: Map<String, Value>,
) -> anyhow::Result<RenderedPage> {
    let page = get_page(state, resource_id, page_type).await?;
    let runtime = runtime_props(state, resource_id, page_type, data).await?;

    let ctx = state.render_context().with_edit_mode(edit_mode);
    let view = render_page(&page.blocks, &ctx, &runtime);

    Ok(RenderedPage {
        page_type,
        edit_mode,
        page,
        view,
    })
}

async fn runtime_props(
    state: &AppState,
    resource_id: &str,
    page_type: PageType,
    data: Map<String, Value>,
) -> anyhow::Result<RuntimeProps> {
    let resource = find_resource(state, resource_id).await?;
    let (name, label) = match &resource {
        Some(r) => (r.name.as_str(), r.label.as_str()),
        None => (resource_id, resource_id),
    };

    let mut runtime = RuntimeProps::new()
        .shared("resourceId", json!(resource_id))
        .shared("resourceLabel", json!(label))
        .shared("pageType", json!(page_type))
        .shared("createHref", json!(format!("/{}/create", name)))
        .shared("backHref", json!(format!("/{}", name)));

    if let Some(id) = data.get("record").and_then(|r| r.get("id")) {
        let id = match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        runtime = runtime.shared("editHref", json!(format!("/{}/{}/edit", name, id)));
    }

    runtime.shared.extend(data);
    Ok(runtime)
}
