//! Page configuration endpoints
//!
//! `/config/pages/{resourceId}` addresses the list page; the optional
//! `/{pageType}` segment selects `show`, `edit` or `create`. A missing
//! document is answered with the default template (`id: null`).

use actix_web::{HttpResponse, Scope, delete, get, patch, put, web};
use panelkit_api::{PageType, PatchPageRequest};
use panelkit_common::PanelError;
use serde_json::{Map, Value};

use crate::{error::AppError, model::AppState, service::page};

fn parse_page_type(raw: &str) -> Result<PageType, PanelError> {
    raw.parse().map_err(PanelError::validation)
}

/// GET /config/pages/{resourceId}
#[get("/{resource_id}")]
async fn get_list_page(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let config = page::get_page(&data, &path, PageType::List).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// GET /config/pages/{resourceId}/{pageType}
#[get("/{resource_id}/{page_type}")]
async fn get_typed_page(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, page_type) = path.into_inner();
    let config = page::get_page(&data, &resource_id, parse_page_type(&page_type)?).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// PATCH /config/pages/{resourceId}
#[patch("/{resource_id}")]
async fn patch_list_page(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PatchPageRequest>,
) -> Result<HttpResponse, AppError> {
    let config = page::patch_page(&data, &path, PageType::List, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// PATCH /config/pages/{resourceId}/{pageType}
#[patch("/{resource_id}/{page_type}")]
async fn patch_typed_page(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<PatchPageRequest>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, page_type) = path.into_inner();
    let config = page::patch_page(
        &data,
        &resource_id,
        parse_page_type(&page_type)?,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(config))
}

/// DELETE /config/pages/{resourceId}
#[delete("/{resource_id}")]
async fn delete_list_page(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    page::delete_page(&data, &path, PageType::List).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /config/pages/{resourceId}/{pageType}
#[delete("/{resource_id}/{page_type}")]
async fn delete_typed_page(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, page_type) = path.into_inner();
    page::delete_page(&data, &resource_id, parse_page_type(&page_type)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /config/pages/{resourceId}/blocks/{blockId}
#[put("/{resource_id}/blocks/{block_id}")]
async fn put_list_block(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, block_id) = path.into_inner();
    let config =
        page::put_block_config(&data, &resource_id, PageType::List, &block_id, body.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(config))
}

/// PUT /config/pages/{resourceId}/{pageType}/blocks/{blockId}
#[put("/{resource_id}/{page_type}/blocks/{block_id}")]
async fn put_typed_block(
    data: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, page_type, block_id) = path.into_inner();
    let config = page::put_block_config(
        &data,
        &resource_id,
        parse_page_type(&page_type)?,
        &block_id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(config))
}

pub fn routes() -> Scope {
    web::scope("/pages")
        .service(get_list_page)
        .service(get_typed_page)
        .service(patch_list_page)
        .service(patch_typed_page)
        .service(delete_list_page)
        .service(delete_typed_page)
        .service(put_list_block)
        .service(put_typed_block)
}
