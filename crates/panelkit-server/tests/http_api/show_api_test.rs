//! Show layout API integration tests
//!
//! Tests for /config/show/* endpoints

use actix_web::{http::StatusCode, test};
use serde_json::json;

use crate::common::{POSTS, test_state};

#[actix_web::test]
async fn test_get_empty_show_config() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/config/show/posts"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": null, "resourceId": POSTS, "tabs": []}));
}

#[actix_web::test]
async fn test_patch_show_layout_applies_defaults() {
    let state = test_state();
    let app = init_app!(state);

    let (status, saved) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/show/posts").set_json(json!({"tabs": [
            {"id": "general", "label": "General", "groups": [
                {"id": "main", "items": [
                    {"id": "title", "field": "title", "label": "Title"},
                    {"id": "body", "field": "body", "type": "richtext", "colspan": 2}
                ]}
            ]}
        ]}))
    );

    assert_eq!(status, StatusCode::OK);
    assert!(saved["id"].as_str().is_some_and(|id| id.starts_with("show_")));
    let group = &saved["tabs"][0]["groups"][0];
    assert_eq!(group["columns"], 2);
    assert_eq!(group["items"][0]["type"], "text");
    assert_eq!(group["items"][0]["colspan"], 1);
    assert_eq!(group["items"][1]["type"], "richtext");

    let (_, reread) = call_json!(app, test::TestRequest::get().uri("/config/show/posts"));
    assert_eq!(reread, saved);
}

#[actix_web::test]
async fn test_patch_show_rejects_invalid_layout() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/show/posts").set_json(json!({"tabs": [
            {"id": "general", "label": "General", "groups": [
                {"id": "main", "items": [{"id": "title", "field": "title", "colspan": 13}]}
            ]}
        ]}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20002);

    let (status, _) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/show/posts").set_json(json!({"tabs": [
            {"id": "dup", "label": "One"},
            {"id": "dup", "label": "Two"}
        ]}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, current) = call_json!(app, test::TestRequest::get().uri("/config/show/posts"));
    assert!(current["id"].is_null());
}
