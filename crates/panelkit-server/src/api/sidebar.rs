//! Sidebar configuration endpoints (`/config/sidebar`)

use actix_web::{HttpResponse, Scope, get, put, web};
use panelkit_api::SidebarConfig;

use crate::{error::AppError, model::AppState, service::sidebar};

/// GET /config/sidebar
#[get("")]
async fn get_sidebar(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let config = sidebar::get_sidebar(&data).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// PUT /config/sidebar
#[put("")]
async fn put_sidebar(
    data: web::Data<AppState>,
    body: web::Json<SidebarConfig>,
) -> Result<HttpResponse, AppError> {
    let config = sidebar::put_sidebar(&data, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(config))
}

pub fn routes() -> Scope {
    web::scope("/sidebar").service(get_sidebar).service(put_sidebar)
}
