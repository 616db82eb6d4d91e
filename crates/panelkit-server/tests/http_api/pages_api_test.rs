//! Page config API integration tests
//!
//! Tests for /config/pages/* endpoints

use actix_web::{http::StatusCode, test};
use panelkit_persistence::collections;
use serde_json::json;

use crate::common::{POSTS, file_state, slugs, test_state};

const LIST_SLUGS: [&str; 4] = ["list-header", "list-filters", "list-table", "list-pagination"];

// ========== Defaults and legacy documents ==========

#[actix_web::test]
async fn test_default_list_template() {
    let state = test_state();
    let app = init_app!(state);

    let (status, page) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));

    assert_eq!(status, StatusCode::OK);
    assert!(page["id"].is_null());
    assert_eq!(page["resourceId"], POSTS);
    assert_eq!(slugs(&page), LIST_SLUGS);
    assert_eq!(page["blocks"][1]["config"], json!({"filters": []}));
    assert_eq!(page["blocks"][2]["config"], json!({"columns": []}));
    assert_eq!(
        page["blocks"][3]["config"],
        json!({"pageSize": 10, "pageSizeOptions": [10, 25, 50, 100]})
    );
}

#[actix_web::test]
async fn test_default_templates_per_page_type() {
    let state = test_state();
    let app = init_app!(state);

    let (_, show) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts/show"));
    assert_eq!(slugs(&show), ["show-header", "show-content"]);

    let (_, edit) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts/edit"));
    assert_eq!(slugs(&edit), ["show-header", "grid"]);
    assert_eq!(edit["blocks"][0]["config"]["showEditButton"], false);
}

#[actix_web::test]
async fn test_invalid_page_type() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts/detail"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20002);
}

#[actix_web::test]
async fn test_legacy_document_is_converted_not_rewritten() {
    let state = test_state();
    let legacy = json!({
        "id": "legacy-1",
        "meta": {"title": "Posts"},
        "columns": [{"id": "c1", "field": "title", "type": "text"}]
    });
    state
        .store
        .put(collections::PAGES, POSTS, legacy.clone())
        .await
        .unwrap();
    let app = init_app!(state);

    let (status, page) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["id"], "legacy-1");
    assert_eq!(slugs(&page), ["list-header", "list-table", "list-pagination"]);
    assert_eq!(page["blocks"][0]["config"]["title"], "Posts");
    assert_eq!(page["blocks"][1]["config"]["columns"][0]["id"], "c1");
    assert_eq!(page["blocks"][2]["config"]["pageSize"], 10);

    let stored = state.store.get(collections::PAGES, POSTS).await.unwrap();
    assert_eq!(stored, Some(legacy));
}

#[actix_web::test]
async fn test_malformed_document_falls_back_to_default() {
    let state = test_state();
    state
        .store
        .put(collections::PAGES, POSTS, json!({"blocks": "nope"}))
        .await
        .unwrap();
    let app = init_app!(state);

    let (status, page) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));

    assert_eq!(status, StatusCode::OK);
    assert!(page["id"].is_null());
    assert_eq!(slugs(&page), LIST_SLUGS);
}

// ========== Writes ==========

#[actix_web::test]
async fn test_patch_default_blocks_round_trip() {
    let state = test_state();
    let app = init_app!(state);

    let (_, default_page) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));
    let (status, saved) = call_json!(
        app,
        test::TestRequest::patch()
            .uri("/config/pages/posts")
            .set_json(json!({"blocks": default_page["blocks"]}))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(saved["id"].as_str().is_some_and(|id| id.starts_with("page_")));

    let (_, reread) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));
    assert_eq!(reread["blocks"], default_page["blocks"]);
    assert_eq!(reread["id"], saved["id"]);
}

#[actix_web::test]
async fn test_patch_replaces_blocks_verbatim_and_keeps_id() {
    let state = test_state();
    let app = init_app!(state);

    let first = json!({"blocks": [
        {"id": "h", "slug": "list-header", "config": {"title": "Articles"}},
        {"id": "t", "slug": "list-table", "config": {"columns": [
            {"id": "c1", "field": "title", "label": "Title", "type": "text"}
        ]}, "order": 1}
    ]});
    let (_, saved) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/pages/posts").set_json(&first)
    );
    let id = saved["id"].clone();
    assert_eq!(saved["blocks"], first["blocks"]);
    assert_eq!(saved["blocks"][1]["order"].to_string(), "1");

    let second = json!({"blocks": [
        {"id": "p", "slug": "list-pagination", "config": {"pageSize": 25}, "visible": false}
    ]});
    let (status, resaved) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/pages/posts").set_json(&second)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resaved["id"], id);

    let (_, page) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));
    assert_eq!(page["blocks"], second["blocks"]);
    assert_eq!(page["id"], id);
}

#[actix_web::test]
async fn test_patch_rejects_unknown_slug() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::patch()
            .uri("/config/pages/posts")
            .set_json(json!({"blocks": [{"id": "x", "slug": "does-not-exist", "config": {}}]}))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 21000);
    assert!(state.store.get(collections::PAGES, POSTS).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_patch_rejects_duplicate_block_ids() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/pages/posts").set_json(json!({"blocks": [
            {"id": "a", "slug": "list-header", "config": {}},
            {"id": "a", "slug": "list-table", "config": {}}
        ]}))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20002);
}

#[actix_web::test]
async fn test_patch_rejects_column_options_outside_column_schema() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/pages/posts").set_json(json!({"blocks": [
            {"id": "t", "slug": "list-table", "config": {"columns": [
                {"id": "n", "field": "views", "type": "number", "decimals": 100000}
            ]}}
        ]}))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20002);
    assert!(body["message"].as_str().unwrap().contains("decimals"));
    assert!(state.store.get(collections::PAGES, POSTS).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_malformed_json_body() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::patch()
            .uri("/config/pages/posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"blocks\": [")
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 20002);
}

#[actix_web::test]
async fn test_put_block_config() {
    let state = test_state();
    let app = init_app!(state);

    let (status, page) = call_json!(
        app,
        test::TestRequest::put()
            .uri("/config/pages/posts/blocks/list-header")
            .set_json(json!({"title": "Articles"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(page["id"].is_string());
    assert_eq!(page["blocks"][0]["config"], json!({"title": "Articles"}));
    assert_eq!(slugs(&page), LIST_SLUGS);

    let (_, reread) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));
    assert_eq!(reread, page);

    let (status, _) = call_json!(
        app,
        test::TestRequest::put()
            .uri("/config/pages/posts/blocks/missing")
            .set_json(json!({}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_put_block_config_validates_schema() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = call_json!(
        app,
        test::TestRequest::put()
            .uri("/config/pages/posts/blocks/list-pagination")
            .set_json(json!({"pageSize": 0}))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("pageSize"));
    assert!(state.store.get(collections::PAGES, POSTS).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_delete_restores_default_template() {
    let state = test_state();
    let app = init_app!(state);

    call_json!(
        app,
        test::TestRequest::put()
            .uri("/config/pages/posts/blocks/list-header")
            .set_json(json!({"title": "Articles"}))
    );
    let (status, _) = call_json!(app, test::TestRequest::delete().uri("/config/pages/posts"));
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, page) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));
    assert!(page["id"].is_null());
    assert_eq!(page["blocks"][0]["config"], json!({}));
}

// ========== Partitions ==========

#[actix_web::test]
async fn test_page_types_are_stored_separately() {
    let state = test_state();
    let app = init_app!(state);

    let show = json!({"blocks": [{"id": "sh", "slug": "show-header", "config": {"title": "Post"}}]});
    let (status, _) = call_json!(
        app,
        test::TestRequest::patch().uri("/config/pages/posts/show").set_json(&show)
    );
    assert_eq!(status, StatusCode::OK);

    let create = json!({"blocks": [{"id": "g", "slug": "grid", "config": {"columns": 3, "items": []}}]});
    call_json!(
        app,
        test::TestRequest::patch().uri("/config/pages/posts/create").set_json(&create)
    );

    let (_, list) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));
    assert!(list["id"].is_null());
    assert_eq!(slugs(&list), LIST_SLUGS);

    let (_, saved_show) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts/show"));
    assert_eq!(saved_show["blocks"], show["blocks"]);

    let (_, saved_create) =
        call_json!(app, test::TestRequest::get().uri("/config/pages/posts/create"));
    assert_eq!(saved_create["blocks"], create["blocks"]);

    assert!(
        state
            .store
            .get(collections::SHOW_PAGES, POSTS)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        state
            .store
            .get(collections::PAGES, "posts/create")
            .await
            .unwrap()
            .is_some()
    );
}

#[actix_web::test]
async fn test_saved_page_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let blocks = json!({"blocks": [{"id": "h", "slug": "list-header", "config": {"title": "Kept"}}]});

    {
        let state = file_state(dir.path()).await;
        let app = init_app!(state);
        let (status, _) = call_json!(
            app,
            test::TestRequest::patch().uri("/config/pages/posts").set_json(&blocks)
        );
        assert_eq!(status, StatusCode::OK);
    }

    let state = file_state(dir.path()).await;
    let app = init_app!(state);
    let (_, page) = call_json!(app, test::TestRequest::get().uri("/config/pages/posts"));
    assert_eq!(page["blocks"], blocks["blocks"]);
    assert!(page["id"].is_string());
}
