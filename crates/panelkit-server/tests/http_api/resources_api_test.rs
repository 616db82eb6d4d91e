//! Resource API integration tests
//!
//! Tests for /config/resources/* endpoints

use actix_web::{http::StatusCode, test};
use serde_json::json;

use crate::common::test_state;

// ========== Create ==========

#[actix_web::test]
async fn test_create_and_get_resource() {
    let state = test_state();
    let app = init_app!(state);

    let (status, created) = call_json!(
        app,
        test::TestRequest::post().uri("/config/resources").set_json(json!({
            "name": "blog-posts",
            "label": "Blog posts",
            "endpoint": "/api/posts",
            "methods": ["GET", "POST"]
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("res_"));
    assert_eq!(created["methods"], json!(["GET", "POST"]));

    let (status, fetched) = call_json!(
        app,
        test::TestRequest::get().uri(&format!("/config/resources/{}", id))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn test_create_rejects_duplicate_name() {
    let state = test_state();
    let app = init_app!(state);
    let body = json!({"name": "posts", "label": "Posts", "endpoint": "/api/posts"});

    let (status, _) = call_json!(
        app,
        test::TestRequest::post().uri("/config/resources").set_json(&body)
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = call_json!(
        app,
        test::TestRequest::post().uri("/config/resources").set_json(&body)
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], 20005);

    let (_, all) = call_json!(app, test::TestRequest::get().uri("/config/resources"));
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_create_rejects_invalid_fields() {
    let state = test_state();
    let app = init_app!(state);

    for body in [
        json!({"name": "Not Kebab", "label": "Bad", "endpoint": "/api/bad"}),
        json!({"name": "ok-name", "label": "", "endpoint": "/api/ok"}),
        json!({"name": "ok-name", "label": "Ok", "endpoint": "api/relative"}),
    ] {
        let (status, error) = call_json!(
            app,
            test::TestRequest::post().uri("/config/resources").set_json(&body)
        );
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(error["code"], 20002);
    }
}

// ========== Update and delete ==========

#[actix_web::test]
async fn test_update_resource() {
    let state = test_state();
    let app = init_app!(state);

    let (_, posts) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/resources")
            .set_json(json!({"name": "posts", "label": "Posts", "endpoint": "/api/posts"}))
    );
    call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/resources")
            .set_json(json!({"name": "users", "label": "Users", "endpoint": "/api/users"}))
    );
    let uri = format!("/config/resources/{}", posts["id"].as_str().unwrap());

    let (status, updated) = call_json!(
        app,
        test::TestRequest::patch().uri(&uri).set_json(json!({"label": "Articles"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["label"], "Articles");
    assert_eq!(updated["name"], "posts");

    let (status, _) = call_json!(
        app,
        test::TestRequest::patch().uri(&uri).set_json(json!({"name": "posts"}))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call_json!(
        app,
        test::TestRequest::patch().uri(&uri).set_json(json!({"name": "users"}))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call_json!(
        app,
        test::TestRequest::patch()
            .uri("/config/resources/res_missing")
            .set_json(json!({"label": "Nope"}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_resource() {
    let state = test_state();
    let app = init_app!(state);

    let (_, created) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/resources")
            .set_json(json!({"name": "posts", "label": "Posts", "endpoint": "/api/posts"}))
    );
    let uri = format!("/config/resources/{}", created["id"].as_str().unwrap());

    let (status, body) = call_json!(app, test::TestRequest::delete().uri(&uri));
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = call_json!(app, test::TestRequest::get().uri(&uri));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, error) = call_json!(app, test::TestRequest::delete().uri(&uri));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], 20004);
}

#[actix_web::test]
async fn test_list_resources_sorted_by_name() {
    let state = test_state();
    let app = init_app!(state);

    for name in ["users", "comments", "posts"] {
        call_json!(
            app,
            test::TestRequest::post().uri("/config/resources").set_json(json!({
                "name": name,
                "label": name.to_uppercase(),
                "endpoint": format!("/api/{}", name)
            }))
        );
    }

    let (status, all) = call_json!(app, test::TestRequest::get().uri("/config/resources"));
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(names, ["comments", "posts", "users"]);
}
