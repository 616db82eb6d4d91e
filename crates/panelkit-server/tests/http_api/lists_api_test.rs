//! List config API integration tests
//!
//! Tests for /config/lists/* endpoints, including the column and filter
//! editor submissions

use actix_web::{http::StatusCode, test};
use panelkit_persistence::collections;
use serde_json::{Value, json};

use crate::common::{POSTS, test_state};

fn ids(entries: &Value) -> Vec<String> {
    entries
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|e| e["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_get_empty_list_config() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/config/lists/posts"));

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].is_null());
    assert_eq!(body["resourceId"], POSTS);
    assert_eq!(body["columns"], json!([]));
    assert_eq!(body["filters"], json!([]));
}

#[actix_web::test]
async fn test_patch_list_config() {
    let state = test_state();
    let app = init_app!(state);

    let (status, saved) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/lists/posts").set_json(json!({
            "meta": {"title": "Posts"},
            "columns": [{"id": "c1", "field": "title", "type": "text"}]
        }))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(saved["id"].as_str().is_some_and(|id| id.starts_with("list_")));
    assert_eq!(saved["columns"][0]["enabledByDefault"], true);

    let (_, partial) = call_json!(
        app,
        test::TestRequest::patch()
            .uri("/config/lists/posts")
            .set_json(json!({"filters": [{"id": "f1", "field": "status", "type": "select"}]}))
    );
    assert_eq!(partial["id"], saved["id"]);
    assert_eq!(ids(&partial["columns"]), ["c1"]);
    assert_eq!(partial["filters"][0]["operator"], "eq");
    assert_eq!(partial["meta"]["title"], "Posts");
}

#[actix_web::test]
async fn test_patch_rejects_unknown_column_type() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/lists/posts").set_json(json!({
            "columns": [{"id": "c1", "field": "views", "type": "sparkline"}]
        }))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("columns[0].type"));
    assert!(state.store.get(collections::LISTS, POSTS).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_malformed_stored_list_reads_as_empty() {
    let state = test_state();
    state
        .store
        .put(collections::LISTS, POSTS, json!({"columns": "broken"}))
        .await
        .unwrap();
    let app = init_app!(state);

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/config/lists/posts"));

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].is_null());
    assert_eq!(body["columns"], json!([]));
}

// ========== Column editor ==========

#[actix_web::test]
async fn test_submit_delete_and_move_columns() {
    let state = test_state();
    let app = init_app!(state);

    let mut created = Vec::new();
    for field in ["title", "status", "createdAt"] {
        let (status, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri("/config/lists/posts/columns")
                .set_json(json!({"field": field, "type": "text"}))
        );
        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("col_"));
        created.push(id);
    }

    let (_, config) = call_json!(app, test::TestRequest::get().uri("/config/lists/posts"));
    assert_eq!(ids(&config["columns"]), created);
    assert_eq!(config["columns"][0]["enabledByDefault"], true);
    assert_eq!(config["columns"][0]["sortable"], true);

    let (status, moved) = call_json!(
        app,
        test::TestRequest::post().uri(&format!("/config/lists/posts/columns/{}/move?to=0", created[2]))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&moved["columns"]),
        [created[2].clone(), created[0].clone(), created[1].clone()]
    );

    let (status, deleted) = call_json!(
        app,
        test::TestRequest::delete().uri(&format!("/config/lists/posts/columns/{}", created[0]))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&deleted["columns"]), [created[2].clone(), created[1].clone()]);

    let (status, _) = call_json!(
        app,
        test::TestRequest::delete().uri("/config/lists/posts/columns/col_missing")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_resubmitted_column_keeps_position_and_flags() {
    let state = test_state();
    let app = init_app!(state);

    let (_, first) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/lists/posts/columns")
            .set_json(json!({"field": "title", "type": "text", "sortable": false}))
    );
    call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/lists/posts/columns")
            .set_json(json!({"field": "status", "type": "badge"}))
    );
    let id = first["id"].as_str().unwrap();

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/lists/posts/columns")
            .set_json(json!({"id": id, "field": "headline", "label": "Headline", "type": "text"}))
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    let column = &body["config"]["columns"][0];
    assert_eq!(column["id"], id);
    assert_eq!(column["field"], "headline");
    assert_eq!(column["sortable"], false);
    assert_eq!(body["config"]["columns"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_submit_column_with_unknown_id_is_not_found() {
    let state = test_state();
    let app = init_app!(state);

    let (status, _) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/lists/posts/columns")
            .set_json(json!({"id": "ghost", "field": "title", "type": "text"}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call_json!(app, test::TestRequest::get().uri("/config/lists/posts"));
    assert!(body["id"].is_null());
    assert_eq!(body["columns"], json!([]));
}

#[actix_web::test]
async fn test_submit_column_rejects_unknown_type() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/lists/posts/columns")
            .set_json(json!({"field": "views", "type": "sparkline"}))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20002);
}

// ========== Filter editor ==========

#[actix_web::test]
async fn test_submit_and_move_filters() {
    let state = test_state();
    let app = init_app!(state);

    let (status, first) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/lists/posts/filters")
            .set_json(json!({"field": "title", "type": "input", "placeholder": "Search"}))
    );
    assert_eq!(status, StatusCode::OK);
    let first_id = first["id"].as_str().unwrap().to_string();
    assert!(first_id.starts_with("flt_"));
    assert_eq!(first["config"]["filters"][0]["operator"], "eq");

    let (_, second) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/config/lists/posts/filters")
            .set_json(json!({
                "field": "status",
                "type": "select",
                "operator": "in",
                "options": [{"label": "Draft", "value": "draft"}]
            }))
    );
    let second_id = second["id"].as_str().unwrap().to_string();

    let (_, moved) = call_json!(
        app,
        test::TestRequest::post()
            .uri(&format!("/config/lists/posts/filters/{}/move?to=0", second_id))
    );
    assert_eq!(ids(&moved["filters"]), [second_id.clone(), first_id.clone()]);
    assert_eq!(moved["filters"][0]["operator"], "in");

    let (_, deleted) = call_json!(
        app,
        test::TestRequest::delete().uri(&format!("/config/lists/posts/filters/{}", second_id))
    );
    assert_eq!(ids(&deleted["filters"]), [first_id]);
}

#[actix_web::test]
async fn test_move_requires_target_index() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri("/config/lists/posts/filters/f1/move")
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20002);
}
