//! Page configuration resolver
//!
//! Turns whatever is stored for a `(resourceId, pageType)` pair into a
//! normalized [`PageConfig`]. Nothing here touches storage: callers fetch the
//! raw document and hand it to [`resolve_document`].

use panelkit_api::validation::Check;
use panelkit_api::{BlockInstance, LegacyListDocument, PageConfig, PageType, PatchPageRequest};
use panelkit_common::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
use panelkit_registry::BuiltinBlock;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Storage partition holding a page document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagePartition {
    /// list, edit and create pages
    Pages,
    ShowPages,
}

impl PagePartition {
    pub fn collection(self) -> &'static str {
        match self {
            PagePartition::Pages => "pages",
            PagePartition::ShowPages => "show_pages",
        }
    }
}

/// Where a page document lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub partition: PagePartition,
    pub key: String,
}

impl PageKey {
    /// List and show pages are keyed by resource id alone; edit and create
    /// pages share the list partition under `{resourceId}/{pageType}`.
    pub fn new(resource_id: &str, page_type: PageType) -> Self {
        match page_type {
            PageType::List => Self {
                partition: PagePartition::Pages,
                key: resource_id.to_string(),
            },
            PageType::Show => Self {
                partition: PagePartition::ShowPages,
                key: resource_id.to_string(),
            },
            PageType::Edit | PageType::Create => Self {
                partition: PagePartition::Pages,
                key: format!("{}/{}", resource_id, page_type),
            },
        }
    }

    pub fn collection(&self) -> &'static str {
        self.partition.collection()
    }
}

/// How a resolved page was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    Stored,
    Legacy,
    Default,
    /// A document existed but failed shape validation
    Malformed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPage {
    pub config: PageConfig,
    pub source: PageSource,
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn block(slug: BuiltinBlock, index: usize, config: Value) -> BlockInstance {
    BlockInstance::new(slug.as_str(), slug.as_str(), object(config)).with_order(index)
}

fn pagination_config() -> Value {
    json!({
        "pageSize": DEFAULT_PAGE_SIZE,
        "pageSizeOptions": DEFAULT_PAGE_SIZE_OPTIONS,
    })
}

/// Fixed block list used when nothing usable is stored
pub fn default_template(resource_id: &str, page_type: PageType) -> PageConfig {
    let slugs: Vec<(BuiltinBlock, Value)> = match page_type {
        PageType::List => vec![
            (BuiltinBlock::ListHeader, json!({})),
            (BuiltinBlock::ListFilters, json!({"filters": []})),
            (BuiltinBlock::ListTable, json!({"columns": []})),
            (BuiltinBlock::ListPagination, pagination_config()),
        ],
        PageType::Show => vec![
            (BuiltinBlock::ShowHeader, json!({})),
            (BuiltinBlock::ShowContent, json!({"tabs": []})),
        ],
        PageType::Edit | PageType::Create => vec![
            (BuiltinBlock::ShowHeader, json!({"showEditButton": false})),
            (BuiltinBlock::Grid, json!({"columns": 2, "items": []})),
        ],
    };
    let blocks = slugs
        .into_iter()
        .enumerate()
        .map(|(index, (slug, config))| block(slug, index, config))
        .collect();
    PageConfig::unsaved(resource_id, blocks)
}

/// Derive a block list from a pre-block-model list document.
///
/// Header when the meta carries a title or description, filters when any
/// are configured, then the table and pagination unconditionally.
pub fn legacy_to_blocks(document: &LegacyListDocument) -> Vec<BlockInstance> {
    let mut parts: Vec<(BuiltinBlock, Value)> = Vec::with_capacity(4);

    if let Some(meta) = &document.meta
        && (meta.title.is_some() || meta.description.is_some())
    {
        let mut config = Map::new();
        if let Some(title) = &meta.title {
            config.insert("title".to_string(), json!(title));
        }
        if let Some(description) = &meta.description {
            config.insert("description".to_string(), json!(description));
        }
        parts.push((BuiltinBlock::ListHeader, Value::Object(config)));
    }
    if !document.filters.is_empty() {
        parts.push((BuiltinBlock::ListFilters, json!({"filters": document.filters})));
    }
    parts.push((BuiltinBlock::ListTable, json!({"columns": document.columns})));
    parts.push((BuiltinBlock::ListPagination, pagination_config()));

    parts
        .into_iter()
        .enumerate()
        .map(|(index, (slug, config))| block(slug, index, config))
        .collect()
}

fn fallback(resource_id: &str, page_type: PageType, source: PageSource) -> ResolvedPage {
    ResolvedPage {
        config: default_template(resource_id, page_type),
        source,
    }
}

/// Normalize a raw stored document.
///
/// Absent or malformed documents yield the default template; documents with
/// a `blocks` array pass through; list documents without one go through the
/// legacy conversion. The stored document itself is never rewritten.
pub fn resolve_document(resource_id: &str, page_type: PageType, raw: Option<&Value>) -> ResolvedPage {
    let Some(raw) = raw else {
        debug!("No stored {} page for '{}', using default template", page_type, resource_id);
        return fallback(resource_id, page_type, PageSource::Default);
    };

    let Some(document) = raw.as_object() else {
        warn!("Stored {} page for '{}' is not an object", page_type, resource_id);
        return fallback(resource_id, page_type, PageSource::Malformed);
    };
    let id = document.get("id").and_then(Value::as_str).map(str::to_string);

    if document.contains_key("blocks") {
        let blocks = document
            .get("blocks")
            .cloned()
            .map(serde_json::from_value::<Vec<BlockInstance>>);
        return match blocks {
            Some(Ok(blocks)) => {
                let request = PatchPageRequest { blocks };
                if let Err(e) = request.check() {
                    warn!("Stored {} page for '{}' is invalid: {}", page_type, resource_id, e);
                    return fallback(resource_id, page_type, PageSource::Malformed);
                }
                ResolvedPage {
                    config: PageConfig {
                        id,
                        resource_id: resource_id.to_string(),
                        blocks: request.blocks,
                    },
                    source: PageSource::Stored,
                }
            }
            _ => {
                warn!("Stored {} page for '{}' has malformed blocks", page_type, resource_id);
                fallback(resource_id, page_type, PageSource::Malformed)
            }
        };
    }

    if page_type != PageType::List {
        warn!("Stored {} page for '{}' has no blocks", page_type, resource_id);
        return fallback(resource_id, page_type, PageSource::Malformed);
    }

    match serde_json::from_value::<LegacyListDocument>(raw.clone()) {
        Ok(legacy) => {
            debug!("Converting legacy list document for '{}'", resource_id);
            ResolvedPage {
                config: PageConfig {
                    id,
                    resource_id: resource_id.to_string(),
                    blocks: legacy_to_blocks(&legacy),
                },
                source: PageSource::Legacy,
            }
        }
        Err(e) => {
            warn!("Stored list page for '{}' is malformed: {}", resource_id, e);
            fallback(resource_id, page_type, PageSource::Malformed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slugs(config: &PageConfig) -> Vec<&str> {
        config.blocks.iter().map(|b| b.slug.as_str()).collect()
    }

    #[test]
    fn test_page_key_partitions() {
        assert_eq!(PageKey::new("posts", PageType::List).collection(), "pages");
        assert_eq!(PageKey::new("posts", PageType::Show).collection(), "show_pages");
        let edit = PageKey::new("posts", PageType::Edit);
        assert_eq!(edit.collection(), "pages");
        assert_eq!(edit.key, "posts/edit");
    }

    #[test]
    fn test_missing_list_page_uses_default_template() {
        let resolved = resolve_document("posts", PageType::List, None);
        assert_eq!(resolved.source, PageSource::Default);
        assert_eq!(resolved.config.id, None);
        assert_eq!(
            slugs(&resolved.config),
            vec!["list-header", "list-filters", "list-table", "list-pagination"]
        );
        let blocks = &resolved.config.blocks;
        assert_eq!(blocks[1].config, object(json!({"filters": []})));
        assert_eq!(blocks[2].config, object(json!({"columns": []})));
        assert_eq!(
            blocks[3].config,
            object(json!({"pageSize": 10, "pageSizeOptions": [10, 25, 50, 100]}))
        );
    }

    #[test]
    fn test_show_default_template() {
        let resolved = resolve_document("posts", PageType::Show, None);
        assert_eq!(slugs(&resolved.config), vec!["show-header", "show-content"]);
    }

    #[test]
    fn test_stored_blocks_pass_through() {
        let raw = json!({
            "id": "p1",
            "resourceId": "posts",
            "blocks": [{"id": "b1", "slug": "grid", "config": {"columns": 3}, "visible": false}]
        });
        let resolved = resolve_document("posts", PageType::List, Some(&raw));
        assert_eq!(resolved.source, PageSource::Stored);
        assert_eq!(resolved.config.id.as_deref(), Some("p1"));
        assert_eq!(resolved.config.blocks[0].visible, Some(false));
    }

    #[test]
    fn test_legacy_example() {
        let raw = json!({
            "meta": {"title": "Posts"},
            "columns": [{"id": "c1", "field": "title", "label": "Title", "type": "text",
                         "enabledByDefault": true, "sortable": true}],
            "filters": []
        });
        let before = raw.clone();
        let resolved = resolve_document("posts", PageType::List, Some(&raw));
        assert_eq!(resolved.source, PageSource::Legacy);
        assert_eq!(
            slugs(&resolved.config),
            vec!["list-header", "list-table", "list-pagination"]
        );
        assert_eq!(resolved.config.blocks[0].config, object(json!({"title": "Posts"})));
        assert_eq!(resolved.config.blocks[1].config["columns"][0]["id"], json!("c1"));
        assert_eq!(raw, before);
    }

    #[test]
    fn test_legacy_with_filters_and_no_meta() {
        let legacy: LegacyListDocument = serde_json::from_value(json!({
            "filters": [{"id": "f1", "field": "status", "type": "select"}]
        }))
        .unwrap();
        let blocks = legacy_to_blocks(&legacy);
        let names: Vec<&str> = blocks.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(names, vec!["list-filters", "list-table", "list-pagination"]);
        assert_eq!(blocks[1].config, object(json!({"columns": []})));
    }

    #[test]
    fn test_malformed_documents_fall_back() {
        let cases = [
            json!("not an object"),
            json!({"blocks": "nope"}),
            json!({"blocks": [{"id": "a", "slug": "x"}, {"id": "a", "slug": "y"}]}),
            json!({"meta": {"title": 42}}),
        ];
        for raw in cases {
            let resolved = resolve_document("posts", PageType::List, Some(&raw));
            assert_eq!(resolved.source, PageSource::Malformed, "{}", raw);
            assert_eq!(resolved.config, default_template("posts", PageType::List));
        }
    }

    #[test]
    fn test_show_page_without_blocks_is_malformed() {
        let raw = json!({"columns": []});
        let resolved = resolve_document("posts", PageType::Show, Some(&raw));
        assert_eq!(resolved.source, PageSource::Malformed);
    }

    #[test]
    fn test_default_template_round_trips() {
        let template = default_template("posts", PageType::List);
        let stored = serde_json::to_value(&template).unwrap();
        let resolved = resolve_document("posts", PageType::List, Some(&stored));
        assert_eq!(
            serde_json::to_string(&resolved.config.blocks).unwrap(),
            serde_json::to_string(&template.blocks).unwrap()
        );
    }

    fn legacy_strategy() -> impl Strategy<Value = LegacyListDocument> {
        let title = proptest::option::of("[a-zA-Z ]{0,12}");
        let fields = proptest::collection::vec("[a-z]{1,8}", 0..4);
        (title, fields.clone(), fields).prop_map(|(title, columns, filters)| {
            LegacyListDocument {
                meta: title.map(|t| panelkit_api::page::LegacyMeta {
                    title: Some(t),
                    description: None,
                }),
                columns: columns
                    .iter()
                    .enumerate()
                    .map(|(i, f)| object(json!({"id": format!("c{}", i), "field": f, "type": "text"})))
                    .collect(),
                filters: filters
                    .iter()
                    .enumerate()
                    .map(|(i, f)| object(json!({"id": format!("f{}", i), "field": f, "type": "input"})))
                    .collect(),
            }
        })
    }

    proptest! {
        #[test]
        fn prop_legacy_conversion_is_deterministic(doc in legacy_strategy()) {
            let before = doc.clone();
            let first = legacy_to_blocks(&doc);
            let second = legacy_to_blocks(&doc);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&doc, &before);

            let names: Vec<&str> = first.iter().map(|b| b.slug.as_str()).collect();
            let n = names.len();
            prop_assert_eq!(names[n - 2], "list-table");
            prop_assert_eq!(names[n - 1], "list-pagination");
            prop_assert_eq!(names.contains(&"list-header"), doc.meta.is_some());
            prop_assert_eq!(names.contains(&"list-filters"), !doc.filters.is_empty());
        }
    }
}
