//! Sidebar API integration tests
//!
//! Tests for /config/sidebar

use actix_web::{http::StatusCode, test};
use serde_json::json;

use crate::common::test_state;

#[actix_web::test]
async fn test_default_sidebar_lists_resources_by_label() {
    let state = test_state();
    let app = init_app!(state);

    let (_, empty) = call_json!(app, test::TestRequest::get().uri("/config/sidebar"));
    assert_eq!(empty["groups"][0]["id"], "resources");
    assert_eq!(empty["groups"][0]["items"], json!([]));

    for (name, label) in [("users", "Users"), ("posts", "Articles")] {
        call_json!(
            app,
            test::TestRequest::post().uri("/config/resources").set_json(json!({
                "name": name,
                "label": label,
                "endpoint": format!("/api/{}", name)
            }))
        );
    }

    let (status, sidebar) = call_json!(app, test::TestRequest::get().uri("/config/sidebar"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sidebar["id"], "sidebar");
    let items = &sidebar["groups"][0]["items"];
    assert_eq!(
        items[0],
        json!({"type": "resource", "id": "resource-posts", "resource": "posts", "label": "Articles"})
    );
    assert_eq!(items[1]["resource"], "users");
}

#[actix_web::test]
async fn test_put_sidebar_replaces_default() {
    let state = test_state();
    let app = init_app!(state);

    let custom = json!({"groups": [
        {"id": "content", "title": "Content", "items": [
            {"type": "resource", "id": "posts", "resource": "posts"},
            {"type": "group", "id": "more", "label": "More", "items": [
                {"type": "link", "id": "docs", "label": "Docs", "href": "https://example.com", "external": true}
            ]}
        ]}
    ]});

    let (status, saved) = call_json!(
        app,
        test::TestRequest::put().uri("/config/sidebar").set_json(&custom)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["id"], "sidebar");

    let (_, sidebar) = call_json!(app, test::TestRequest::get().uri("/config/sidebar"));
    assert_eq!(sidebar, saved);
    assert_eq!(sidebar["groups"][0]["items"][1]["items"][0]["href"], "https://example.com");
}

#[actix_web::test]
async fn test_put_sidebar_rejects_invalid_documents() {
    let state = test_state();
    let app = init_app!(state);

    let duplicate_groups = json!({"groups": [
        {"id": "a", "items": []},
        {"id": "a", "items": []}
    ]});
    let nested_groups = json!({"groups": [
        {"id": "a", "items": [
            {"type": "group", "id": "outer", "label": "Outer", "items": [
                {"type": "group", "id": "inner", "label": "Inner", "items": []}
            ]}
        ]}
    ]});

    for body in [duplicate_groups, nested_groups] {
        let (status, error) = call_json!(
            app,
            test::TestRequest::put().uri("/config/sidebar").set_json(&body)
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], 20002);
    }
}
