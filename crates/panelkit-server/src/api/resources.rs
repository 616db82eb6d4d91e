//! Resource registry endpoints (`/config/resources`)

use actix_web::{HttpResponse, Scope, delete, get, patch, post, web};
use panelkit_api::{CreateResourceRequest, UpdateResourceRequest};

use crate::{error::AppError, model::AppState, service::resource};

/// GET /config/resources
#[get("")]
async fn list_resources(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let resources = resource::list_resources(&data).await?;
    Ok(HttpResponse::Ok().json(resources))
}

/// POST /config/resources
#[post("")]
async fn create_resource(
    data: web::Data<AppState>,
    body: web::Json<CreateResourceRequest>,
) -> Result<HttpResponse, AppError> {
    let created = resource::create_resource(&data, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /config/resources/{id}
#[get("/{id}")]
async fn get_resource(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let found = resource::get_resource(&data, &path).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// PATCH /config/resources/{id}
#[patch("/{id}")]
async fn update_resource(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateResourceRequest>,
) -> Result<HttpResponse, AppError> {
    let updated = resource::update_resource(&data, &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /config/resources/{id}
#[delete("/{id}")]
async fn delete_resource(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    resource::delete_resource(&data, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn routes() -> Scope {
    web::scope("/resources")
        .service(list_resources)
        .service(create_resource)
        .service(get_resource)
        .service(update_resource)
        .service(delete_resource)
}
