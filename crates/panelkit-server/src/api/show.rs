//! Show page layout endpoints (`/config/show/{resourceId}`)

use actix_web::{HttpResponse, Scope, get, patch, web};
use panelkit_api::ShowConfigPatch;

use crate::{error::AppError, model::AppState, service::show};

/// GET /config/show/{resourceId}
#[get("/{resource_id}")]
async fn get_show(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let config = show::get_show(&data, &path).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// PATCH /config/show/{resourceId}
#[patch("/{resource_id}")]
async fn patch_show(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ShowConfigPatch>,
) -> Result<HttpResponse, AppError> {
    let config = show::patch_show(&data, &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(config))
}

pub fn routes() -> Scope {
    web::scope("/show").service(get_show).service(patch_show)
}
