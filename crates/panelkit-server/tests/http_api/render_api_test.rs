//! Rendering API integration tests
//!
//! Tests for /render/* endpoints

use actix_web::{http::StatusCode, test};
use panelkit_persistence::collections;
use serde_json::json;

use crate::common::{POSTS, test_state};

#[actix_web::test]
async fn test_render_default_page_as_json() {
    let state = test_state();
    let app = init_app!(state);

    let (status, rendered) = call_json!(app, test::TestRequest::get().uri("/render/posts/list"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(rendered["pageType"], "list");
    assert_eq!(rendered["editMode"], false);
    assert_eq!(rendered["page"]["resourceId"], POSTS);
    assert_eq!(rendered["view"]["kind"], "element");
    assert_eq!(rendered["view"]["attrs"]["data-edit-mode"], "false");
}

#[actix_web::test]
async fn test_render_html_uses_resource_label_and_links() {
    let state = test_state();
    let app = init_app!(state);
    call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/resources")
            .set_json(json!({"name": "posts", "label": "Articles", "endpoint": "/api/posts"}))
    );

    let (status, content_type, html) =
        call_text!(app, test::TestRequest::get().uri("/render/posts/list?format=html"));

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(html.contains("data-slug=\"list-table\""));
    assert!(html.contains("Articles"));
    assert!(html.contains("href=\"/posts/create\""));
    assert!(!html.contains("data-action=\"open-editor\""));
}

#[actix_web::test]
async fn test_render_edit_mode_marks_blocks_selectable() {
    let state = test_state();
    let app = init_app!(state);

    let (status, _, html) = call_text!(
        app,
        test::TestRequest::get().uri("/render/posts/list?format=html&editMode=true")
    );

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("data-edit-mode=\"true\""));
    assert_eq!(html.matches("data-action=\"open-editor\"").count(), 4);
}

#[actix_web::test]
async fn test_render_with_records() {
    let state = test_state();
    let app = init_app!(state);
    call_json!(
        app,
        test::TestRequest::patch().uri("/config/pages/posts").set_json(json!({"blocks": [
            {"id": "t", "slug": "list-table", "config": {"columns": [
                {"id": "c1", "field": "title", "label": "Title", "type": "text"}
            ]}}
        ]}))
    );

    let (status, _, html) = call_text!(
        app,
        test::TestRequest::post()
            .uri("/render/posts/list?format=html")
            .set_json(json!({"records": [{"id": 7, "title": "Fish & Chips"}], "total": 1}))
    );

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Fish &amp; Chips"));
    assert!(html.contains("data-column=\"c1\""));
    assert!(!html.contains("No records found"));
}

#[actix_web::test]
async fn test_render_tolerates_unknown_block_slug() {
    let state = test_state();
    state
        .store
        .put(
            collections::PAGES,
            POSTS,
            json!({"id": "p1", "resourceId": POSTS, "blocks": [
                {"id": "x", "slug": "does-not-exist", "config": {}},
                {"id": "h", "slug": "list-header", "config": {"title": "Still here"}}
            ]}),
        )
        .await
        .unwrap();
    let app = init_app!(state);

    let (status, _, html) =
        call_text!(app, test::TestRequest::get().uri("/render/posts/list?format=html"));

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Unknown block type: does-not-exist"));
    assert!(html.contains("Still here"));
}

#[actix_web::test]
async fn test_render_clamps_stored_number_decimals() {
    let state = test_state();
    state
        .store
        .put(
            collections::PAGES,
            POSTS,
            json!({"id": "p1", "resourceId": POSTS, "blocks": [
                {"id": "t", "slug": "list-table", "config": {"columns": [
                    {"id": "n", "field": "views", "type": "number", "decimals": 100000}
                ]}}
            ]}),
        )
        .await
        .unwrap();
    let app = init_app!(state);

    let (status, _, html) = call_text!(
        app,
        test::TestRequest::post()
            .uri("/render/posts/list?format=html")
            .set_json(json!({"records": [{"id": 1, "views": 1.5}], "total": 1}))
    );

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("1.5000000000"));
}

#[actix_web::test]
async fn test_render_rejects_bad_page_type_and_format() {
    let state = test_state();
    let app = init_app!(state);

    let (status, _) = call_json!(app, test::TestRequest::get().uri("/render/posts/detail"));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call_json!(app, test::TestRequest::get().uri("/render/posts/list?format=pdf"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
