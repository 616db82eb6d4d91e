//! Reverse proxy to the external REST API.
//!
//! `{proxy.base_path}/{path}?{query}` is forwarded with the same method and
//! body to `{proxy.external_api_base}/{path}?{query}`. The token found in
//! the configured request header becomes an `Authorization: Bearer` header.
//! The upstream status is relayed unchanged; the body is returned as JSON
//! when it parses, as plain text otherwise.

use actix_web::{
    HttpRequest, HttpResponse, Scope,
    http::{StatusCode, header},
    web,
};
use panelkit_common::PanelError;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::AppError, model::AppState};

const FORWARDED_HEADERS: [header::HeaderName; 2] = [header::CONTENT_TYPE, header::ACCEPT];

fn upstream_url(base: &str, path: &str, query: &str) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

async fn forward(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let configuration = &data.configuration;
    let base = configuration.external_api_base().ok_or_else(|| {
        PanelError::Transport("external API base is not configured".to_string())
    })?;

    let url = upstream_url(&base, &path, req.query_string());
    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|e| PanelError::validation(e.to_string()))?;

    let mut outbound = data.http_client.request(method.clone(), &url);

    let token_header = configuration.proxy_token_header();
    if let Some(token) = req
        .headers()
        .get(token_header.as_str())
        .and_then(|v| v.to_str().ok())
        .filter(|t| !t.is_empty())
    {
        outbound = outbound.bearer_auth(token);
    }
    for name in &FORWARDED_HEADERS {
        if let Some(value) = req.headers().get(name).and_then(|v| v.to_str().ok()) {
            outbound = outbound.header(name.as_str(), value);
        }
    }
    if !body.is_empty() {
        outbound = outbound.body(body.to_vec());
    }

    debug!("Proxying {} {}", method, url);
    let response = outbound.send().await.map_err(|e| {
        warn!("Proxy request {} {} failed: {}", method, url, e);
        PanelError::Transport(e.to_string())
    })?;

    let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let text = response
        .text()
        .await
        .map_err(|e| PanelError::Transport(e.to_string()))?;
    debug!("Upstream answered {} for {} {}", status, method, url);

    Ok(match serde_json::from_str::<Value>(&text) {
        Ok(json) => HttpResponse::build(status).json(json),
        Err(_) => HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(text),
    })
}

pub fn routes(base_path: &str) -> Scope {
    web::scope(base_path).route("/{path:.*}", web::route().to(forward))
}
