//! Registry listing API integration tests
//!
//! Tests for /registry/* endpoints

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use crate::common::{test_state, yaml_state};

fn slugs_of(units: &Value) -> Vec<&str> {
    units
        .as_array()
        .map(|list| list.iter().filter_map(|u| u["slug"].as_str()).collect())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_list_all_kinds() {
    let state = test_state();
    let app = init_app!(state);

    let (status, all) = call_json!(app, test::TestRequest::get().uri("/registry"));

    assert_eq!(status, StatusCode::OK);
    for kind in ["block", "column", "filter", "field-type"] {
        assert!(all[kind].as_array().is_some_and(|units| !units.is_empty()), "{}", kind);
    }
}

#[actix_web::test]
async fn test_list_builtin_blocks_and_columns() {
    let state = test_state();
    let app = init_app!(state);

    let (status, blocks) = call_json!(app, test::TestRequest::get().uri("/registry/block"));
    assert_eq!(status, StatusCode::OK);
    let block_slugs = slugs_of(&blocks);
    for slug in [
        "list-header",
        "list-filters",
        "list-table",
        "list-pagination",
        "show-header",
        "show-content",
        "tabs",
        "grid",
    ] {
        assert!(block_slugs.contains(&slug), "missing block {}", slug);
    }

    let (_, columns) = call_json!(app, test::TestRequest::get().uri("/registry/column"));
    let column_slugs = slugs_of(&columns);
    for slug in ["text", "date", "number", "badge", "boolean", "json"] {
        assert!(column_slugs.contains(&slug), "missing column {}", slug);
    }
    assert!(columns.as_array().unwrap().iter().all(|c| c["builtin"] == true));
}

#[actix_web::test]
async fn test_get_single_unit() {
    let state = test_state();
    let app = init_app!(state);

    let (status, unit) = call_json!(app, test::TestRequest::get().uri("/registry/block/list-pagination"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unit["kind"], "block");
    assert_eq!(unit["slug"], "list-pagination");
    assert!(!unit["schema"].is_null());

    let (status, error) = call_json!(app, test::TestRequest::get().uri("/registry/column/sparkline"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], 20004);
}

#[actix_web::test]
async fn test_unknown_kind() {
    let state = test_state();
    let app = init_app!(state);

    let (status, error) = call_json!(app, test::TestRequest::get().uri("/registry/widget"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], 20002);
}

#[actix_web::test]
async fn test_configured_extension_is_listed() {
    let state = yaml_state(
        r#"
registry:
  extensions:
    - kind: column
      slug: price
      component: number
      label: Price
      defaults:
        prefix: "$"
"#,
    );
    let app = init_app!(state);

    let (status, unit) = call_json!(app, test::TestRequest::get().uri("/registry/column/price"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(unit["label"], "Price");
    assert_eq!(unit["builtin"], false);
}
