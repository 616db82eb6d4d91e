//! Registry listing endpoints
//!
//! Editors use these to offer the available block, column, filter and field
//! types together with their configuration schemas.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, Scope, get, web};
use panelkit_common::{PanelError, UnitKind};
use panelkit_registry::UnitSummary;

use crate::{error::AppError, model::AppState};

/// GET /registry
#[get("")]
async fn list_all(data: web::Data<AppState>) -> HttpResponse {
    let all: BTreeMap<&str, Vec<UnitSummary>> = UnitKind::ALL
        .iter()
        .map(|kind| (kind.as_str(), data.registry.list(*kind)))
        .collect();
    HttpResponse::Ok().json(all)
}

/// GET /registry/{kind}
#[get("/{kind}")]
async fn list_kind(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let kind: UnitKind = path.parse().map_err(PanelError::validation)?;
    Ok(HttpResponse::Ok().json(data.registry.list(kind)))
}

/// GET /registry/{kind}/{slug}
#[get("/{kind}/{slug}")]
async fn get_unit(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (kind, slug) = path.into_inner();
    let kind: UnitKind = kind.parse().map_err(PanelError::validation)?;
    let summary = data
        .registry
        .list(kind)
        .into_iter()
        .find(|unit| unit.slug == slug)
        .ok_or_else(|| PanelError::NotFound(format!("{} '{}'", kind, slug)))?;
    Ok(HttpResponse::Ok().json(summary))
}

pub fn routes() -> Scope {
    web::scope("/registry")
        .service(list_all)
        .service(list_kind)
        .service(get_unit)
}
