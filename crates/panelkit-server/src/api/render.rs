//! Server-side rendering endpoints
//!
//! `GET /render/{resourceId}/{pageType}` renders the resolved page without
//! live data; `POST` accepts a JSON object of runtime props (`records`,
//! `record`, `total`, `page`, ...) that reach every block.

use actix_web::{HttpResponse, Scope, get, post, web};
use panelkit_api::PageType;
use panelkit_common::PanelError;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{error::AppError, model::AppState, service::render};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RenderFormat {
    #[default]
    Json,
    Html,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderQuery {
    #[serde(default)]
    edit_mode: bool,
    #[serde(default)]
    format: RenderFormat,
}

async fn respond(
    data: &AppState,
    resource_id: &str,
    page_type: &str,
    query: &RenderQuery,
    runtime: Map<String, Value>,
) -> Result<HttpResponse, AppError> {
    let page_type: PageType = page_type.parse().map_err(PanelError::validation)?;
    let rendered =
        render::render_resource_page(data, resource_id, page_type, query.edit_mode, runtime).await?;

    Ok(match query.format {
        RenderFormat::Json => HttpResponse::Ok().json(rendered),
        RenderFormat::Html => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered.view.to_html()),
    })
}

/// GET /render/{resourceId}/{pageType}
#[get("/{resource_id}/{page_type}")]
async fn render_page(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<RenderQuery>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, page_type) = path.into_inner();
    respond(&data, &resource_id, &page_type, &query, Map::new()).await
}

/// POST /render/{resourceId}/{pageType}
#[post("/{resource_id}/{page_type}")]
async fn render_page_with_data(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<RenderQuery>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, page_type) = path.into_inner();
    respond(&data, &resource_id, &page_type, &query, body.into_inner()).await
}

pub fn routes() -> Scope {
    web::scope("/render")
        .service(render_page)
        .service(render_page_with_data)
}
