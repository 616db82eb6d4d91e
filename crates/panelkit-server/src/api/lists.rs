//! List configuration endpoints (`/config/lists/{resourceId}`)
//!
//! Besides whole-document reads and patches, the column and filter editors
//! submit, delete and reorder single entries.

use actix_web::{HttpResponse, Scope, delete, get, patch, post, web};
use panelkit_api::{ListConfig, ListConfigPatch};
use panelkit_page::{ColumnDraft, FilterDraft};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, model::AppState, service::list};

/// Result of an editor submission: the entry id and the saved document
#[derive(Debug, Serialize)]
struct SubmitResponse {
    id: String,
    config: ListConfig,
}

#[derive(Debug, Deserialize)]
struct MoveParams {
    to: usize,
}

/// GET /config/lists/{resourceId}
#[get("/{resource_id}")]
async fn get_list(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let config = list::get_list(&data, &path).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// PATCH /config/lists/{resourceId}
#[patch("/{resource_id}")]
async fn patch_list(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ListConfigPatch>,
) -> Result<HttpResponse, AppError> {
    let config = list::patch_list(&data, &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// DELETE /config/lists/{resourceId}
#[delete("/{resource_id}")]
async fn delete_list(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    list::delete_list(&data, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /config/lists/{resourceId}/columns
#[post("/{resource_id}/columns")]
async fn submit_column(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ColumnDraft>,
) -> Result<HttpResponse, AppError> {
    let (config, id) = list::submit_list_column(&data, &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SubmitResponse { id, config }))
}

/// DELETE /config/lists/{resourceId}/columns/{columnId}
#[delete("/{resource_id}/columns/{column_id}")]
async fn delete_column(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, column_id) = path.into_inner();
    let config = list::delete_list_column(&data, &resource_id, &column_id).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// POST /config/lists/{resourceId}/columns/{columnId}/move?to={index}
#[post("/{resource_id}/columns/{column_id}/move")]
async fn move_column(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    params: web::Query<MoveParams>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, column_id) = path.into_inner();
    let config = list::move_list_column(&data, &resource_id, &column_id, params.to).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// POST /config/lists/{resourceId}/filters
#[post("/{resource_id}/filters")]
async fn submit_filter(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<FilterDraft>,
) -> Result<HttpResponse, AppError> {
    let (config, id) = list::submit_list_filter(&data, &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SubmitResponse { id, config }))
}

/// DELETE /config/lists/{resourceId}/filters/{filterId}
#[delete("/{resource_id}/filters/{filter_id}")]
async fn delete_filter(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, filter_id) = path.into_inner();
    let config = list::delete_list_filter(&data, &resource_id, &filter_id).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// POST /config/lists/{resourceId}/filters/{filterId}/move?to={index}
#[post("/{resource_id}/filters/{filter_id}/move")]
async fn move_filter(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    params: web::Query<MoveParams>,
) -> Result<HttpResponse, AppError> {
    let (resource_id, filter_id) = path.into_inner();
    let config = list::move_list_filter(&data, &resource_id, &filter_id, params.to).await?;
    Ok(HttpResponse::Ok().json(config))
}

pub fn routes() -> Scope {
    web::scope("/lists")
        .service(get_list)
        .service(patch_list)
        .service(delete_list)
        .service(submit_column)
        .service(delete_column)
        .service(move_column)
        .service(submit_filter)
        .service(delete_filter)
        .service(move_filter)
}
