//! Reverse proxy integration tests
//!
//! Tests for /proxy/* against a throwaway upstream bound to an ephemeral port

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, http::StatusCode, test, web};
use serde_json::{Value, json};

use crate::common::{test_state, yaml_state};

async fn upstream_posts(req: HttpRequest) -> HttpResponse {
    let auth = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    HttpResponse::Ok().json(json!({"auth": auth, "query": req.query_string()}))
}

async fn upstream_echo(body: web::Json<Value>) -> HttpResponse {
    HttpResponse::Created().json(json!({"received": body.into_inner()}))
}

async fn upstream_plain() -> HttpResponse {
    HttpResponse::NotFound().content_type("text/plain").body("nothing here")
}

/// Start the upstream and return its base URL
fn spawn_upstream() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route("/posts", web::get().to(upstream_posts))
            .route("/echo", web::post().to(upstream_echo))
            .route("/plain", web::get().to(upstream_plain))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("upstream should bind");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

fn proxied_state(base: &str) -> std::sync::Arc<panelkit_server::AppState> {
    yaml_state(&format!(
        "proxy:\n  external_api_base: \"{}/\"\n  timeout_ms: 5000\n",
        base
    ))
}

#[actix_web::test]
async fn test_proxy_without_base_is_bad_gateway() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/proxy/posts"));

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 23000);
}

#[actix_web::test]
async fn test_proxy_unreachable_upstream_is_bad_gateway() {
    let state = proxied_state("http://127.0.0.1:1");
    let app = init_app!(state);

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/proxy/posts"));

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 23000);
}

#[actix_web::test]
async fn test_proxy_forwards_query_and_token() {
    let base = spawn_upstream();
    let state = proxied_state(&base);
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::get()
            .uri("/proxy/posts?page=2&sort=title")
            .insert_header(("x-api-token", "secret"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["auth"], "Bearer secret");
    assert_eq!(body["query"], "page=2&sort=title");

    let (_, anonymous) = call_json!(app, test::TestRequest::get().uri("/proxy/posts"));
    assert!(anonymous["auth"].is_null());
}

#[actix_web::test]
async fn test_proxy_relays_body_and_status() {
    let base = spawn_upstream();
    let state = proxied_state(&base);
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/proxy/echo")
            .set_json(json!({"title": "Hello"}))
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"received": {"title": "Hello"}}));
}

#[actix_web::test]
async fn test_proxy_passes_through_non_json_errors() {
    let base = spawn_upstream();
    let state = proxied_state(&base);
    let app = init_app!(state);

    let (status, content_type, text) =
        call_text!(app, test::TestRequest::get().uri("/proxy/plain"));

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(text, "nothing here");
}
