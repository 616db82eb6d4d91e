//! Column and filter editors
//!
//! Pure list operations over `ColumnConfig` / `FilterConfig` arrays, shared
//! by the list configuration API and the `list-table` / `list-filters`
//! block editors, plus the custom schema renderers those editors plug in as.

use std::sync::Arc;

use panelkit_api::validation::{Check, ensure_unique_ids, validate_fields};
use panelkit_api::{ColumnConfig, FilterConfig, FilterOperator, SelectOption, ShowConfig, ShowTab};
use panelkit_common::utils::generate_unique_id;
use panelkit_common::{PanelError, UnitKind};
use panelkit_registry::{
    CustomRenderer, CustomRenderers, FieldDescriptor, RenderContext, View, el,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const COLUMN_ID_PREFIX: &str = "col";
pub const FILTER_ID_PREFIX: &str = "flt";

/// Entries addressable by id inside an editable list
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for ColumnConfig {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for FilterConfig {
    fn id(&self) -> &str {
        &self.id
    }
}

fn not_found(what: &str, id: &str) -> PanelError {
    PanelError::NotFound(format!("{} '{}'", what, id))
}

/// Replace the entry with the same id in place, or append a new one
pub fn upsert<T: Identified + Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    match next.iter().position(|existing| existing.id() == item.id()) {
        Some(index) => next[index] = item,
        None => next.push(item),
    }
    next
}

/// Remove exactly the entry with `id`; the rest keep their order
pub fn delete_by_id<T: Identified + Clone>(items: &[T], id: &str) -> Result<Vec<T>, PanelError> {
    if !items.iter().any(|item| item.id() == id) {
        return Err(not_found("entry", id));
    }
    Ok(items.iter().filter(|item| item.id() != id).cloned().collect())
}

/// Move the entry with `id` to position `to` (clamped to the list)
pub fn move_to<T: Identified + Clone>(items: &[T], id: &str, to: usize) -> Result<Vec<T>, PanelError> {
    let from = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| not_found("entry", id))?;
    let mut next = items.to_vec();
    let item = next.remove(from);
    next.insert(to.min(next.len()), item);
    Ok(next)
}

/// Column editor form submission; `id` is absent for new columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub field: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub enabled_by_default: Option<bool>,
    #[serde(default)]
    pub sortable: Option<bool>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Filter editor form submission; `id` is absent for new filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub field: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub operator: Option<FilterOperator>,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Create or replace a column. New columns get a generated unique id and
/// default to enabled and sortable; a replaced column keeps its position.
/// A draft `id` must name an existing column, otherwise `NotFound`.
pub fn submit_column(columns: &[ColumnConfig], draft: ColumnDraft) -> Result<(Vec<ColumnConfig>, String), PanelError> {
    let existing = match draft.id.as_deref() {
        Some(id) => Some(
            columns
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| not_found("column", id))?,
        ),
        None => None,
    };
    let id = match existing {
        Some(column) => column.id.clone(),
        None => generate_unique_id(COLUMN_ID_PREFIX, columns.iter().map(|c| c.id.as_str())),
    };
    let column = ColumnConfig {
        id: id.clone(),
        field: draft.field,
        label: draft.label,
        kind: draft.kind,
        enabled_by_default: draft
            .enabled_by_default
            .or(existing.map(|c| c.enabled_by_default))
            .unwrap_or(true),
        sortable: draft
            .sortable
            .or(existing.map(|c| c.sortable))
            .unwrap_or(true),
        options: draft.options,
    };
    validate_fields(&column)?;
    ensure_unique_ids("columns", [column.id.as_str()])?;
    Ok((upsert(columns, column), id))
}

/// Create or replace a filter. New filters get a generated unique id and
/// default to the `eq` operator. A draft `id` must name an existing filter.
pub fn submit_filter(filters: &[FilterConfig], draft: FilterDraft) -> Result<(Vec<FilterConfig>, String), PanelError> {
    let existing = match draft.id.as_deref() {
        Some(id) => Some(
            filters
                .iter()
                .find(|f| f.id == id)
                .ok_or_else(|| not_found("filter", id))?,
        ),
        None => None,
    };
    let id = match existing {
        Some(filter) => filter.id.clone(),
        None => generate_unique_id(FILTER_ID_PREFIX, filters.iter().map(|f| f.id.as_str())),
    };
    let filter = FilterConfig {
        id: id.clone(),
        field: draft.field,
        label: draft.label,
        kind: draft.kind,
        operator: draft
            .operator
            .or(existing.map(|f| f.operator))
            .unwrap_or_default(),
        options: draft.options,
        placeholder: draft.placeholder,
        extra: draft.extra,
    };
    validate_fields(&filter)?;
    ensure_unique_ids("filters", [filter.id.as_str()])?;
    Ok((upsert(filters, filter), id))
}

/// Read the `columns` array out of a block config
pub fn block_columns(config: &Map<String, Value>) -> Result<Vec<ColumnConfig>, PanelError> {
    parse_list(config, "columns")
}

/// Read the `filters` array out of a block config
pub fn block_filters(config: &Map<String, Value>) -> Result<Vec<FilterConfig>, PanelError> {
    parse_list(config, "filters")
}

fn parse_list<T: for<'de> Deserialize<'de>>(config: &Map<String, Value>, key: &str) -> Result<Vec<T>, PanelError> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| PanelError::validation(format!("{}: {}", key, e))),
    }
}

/// Write a list back into a block config, leaving other keys untouched
pub fn with_list<T: Serialize>(config: &Map<String, Value>, key: &str, items: &[T]) -> Result<Map<String, Value>, PanelError> {
    let value = serde_json::to_value(items).map_err(|e| PanelError::Internal(e.to_string()))?;
    let mut next = config.clone();
    next.insert(key.to_string(), value);
    Ok(next)
}

/// Each entry's options must satisfy the schema of its registered type.
/// Unregistered types are tolerated and render as placeholders.
fn check_unit_options(kind: UnitKind, entries: &Value, ctx: &RenderContext<'_>) -> Result<(), String> {
    let Some(entries) = entries.as_array() else {
        return Ok(());
    };
    for (index, entry) in entries.iter().enumerate() {
        let (Some(object), Some(slug)) = (entry.as_object(), entry.get("type").and_then(Value::as_str)) else {
            continue;
        };
        if let Some(definition) = ctx.registry.get(kind, slug) {
            definition
                .schema
                .validate(object, ctx)
                .map_err(|e| format!("[{}].{}", index, e))?;
        }
    }
    Ok(())
}

fn check_columns(value: &Value, ctx: &RenderContext<'_>) -> Result<(), String> {
    let columns: Vec<ColumnConfig> = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
    ensure_unique_ids("columns", columns.iter().map(|c| c.id.as_str())).map_err(|e| e.to_string())?;
    columns
        .iter()
        .try_for_each(validate_fields)
        .map_err(|e| e.to_string())?;
    check_unit_options(UnitKind::Column, value, ctx)
}

fn check_filters(value: &Value, ctx: &RenderContext<'_>) -> Result<(), String> {
    let filters: Vec<FilterConfig> = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
    ensure_unique_ids("filters", filters.iter().map(|f| f.id.as_str())).map_err(|e| e.to_string())?;
    filters
        .iter()
        .try_for_each(validate_fields)
        .map_err(|e| e.to_string())?;
    check_unit_options(UnitKind::Filter, value, ctx)
}

fn entry_row(id: &str, path: &str, cells: Vec<String>, kind: UnitKind, slug: &str, ctx: &RenderContext<'_>) -> View {
    let known = ctx.registry.contains(kind, slug);
    el("tr")
        .attr("data-id", id)
        .attr_opt("data-unresolved", (!known).then_some(kind.as_str()))
        .children(cells.into_iter().map(|c| el("td").text(c)))
        .child(
            el("td")
                .child(row_action("edit", path, id))
                .child(row_action("move-up", path, id))
                .child(row_action("move-down", path, id))
                .child(row_action("delete", path, id)),
        )
        .into()
}

fn row_action(action: &str, path: &str, id: &str) -> View {
    el("button")
        .attr("type", "button")
        .attr("data-action", action)
        .attr("data-path", path)
        .attr("data-id", id)
        .text(action.replace('-', " "))
        .into()
}

fn type_picker(kind: UnitKind, ctx: &RenderContext<'_>) -> View {
    el("select")
        .attr("name", "type")
        .children(ctx.registry.list(kind).into_iter().map(|unit| {
            el("option").attr("value", unit.slug.as_str()).text(unit.label)
        }))
        .into()
}

fn editor_table(headers: &[&str], rows: Vec<View>) -> View {
    el("table")
        .child(el("thead").child(el("tr").children(headers.iter().map(|h| el("th").text(*h)))))
        .child(el("tbody").children(rows))
        .into()
}

/// `column-editor`: the `columns` array of a `list-table` block
pub struct ColumnEditor;

impl CustomRenderer for ColumnEditor {
    fn render(&self, value: Option<&Value>, path: &str, _field: &FieldDescriptor, ctx: &RenderContext<'_>) -> View {
        let columns: Vec<ColumnConfig> = value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        let rows = columns
            .iter()
            .map(|c| {
                entry_row(
                    &c.id,
                    path,
                    vec![c.field.clone(), c.label.clone(), c.kind.clone(), c.enabled_by_default.to_string()],
                    UnitKind::Column,
                    &c.kind,
                    ctx,
                )
            })
            .collect();
        el("div")
            .attr("class", "column-editor")
            .attr("data-bind", path)
            .child(editor_table(&["Field", "Label", "Type", "Visible"], rows))
            .child(
                el("div")
                    .attr("class", "column-editor__new")
                    .child(type_picker(UnitKind::Column, ctx))
                    .child(
                        el("button")
                            .attr("type", "button")
                            .attr("data-action", "add-column")
                            .attr("data-path", path)
                            .text("Add column"),
                    ),
            )
            .into()
    }

    fn validate(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<(), String> {
        check_columns(value, ctx)
    }
}

/// `filter-editor`: the `filters` array of a `list-filters` block
pub struct FilterEditor;

impl CustomRenderer for FilterEditor {
    fn render(&self, value: Option<&Value>, path: &str, _field: &FieldDescriptor, ctx: &RenderContext<'_>) -> View {
        let filters: Vec<FilterConfig> = value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        let rows = filters
            .iter()
            .map(|f| {
                entry_row(
                    &f.id,
                    path,
                    vec![f.field.clone(), f.label.clone(), f.kind.clone(), f.operator.as_str().to_string()],
                    UnitKind::Filter,
                    &f.kind,
                    ctx,
                )
            })
            .collect();
        el("div")
            .attr("class", "filter-editor")
            .attr("data-bind", path)
            .child(editor_table(&["Field", "Label", "Type", "Operator"], rows))
            .child(
                el("div")
                    .attr("class", "filter-editor__new")
                    .child(type_picker(UnitKind::Filter, ctx))
                    .child(
                        el("button")
                            .attr("type", "button")
                            .attr("data-action", "add-filter")
                            .attr("data-path", path)
                            .text("Add filter"),
                    ),
            )
            .into()
    }

    fn validate(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<(), String> {
        check_filters(value, ctx)
    }
}

/// `number-list`: comma separated positive integers, e.g. page size options
pub struct NumberList;

impl CustomRenderer for NumberList {
    fn render(&self, value: Option<&Value>, path: &str, _field: &FieldDescriptor, _ctx: &RenderContext<'_>) -> View {
        let joined = value
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        el("input")
            .attr("type", "text")
            .attr("inputmode", "numeric")
            .attr("name", path)
            .attr("data-bind", path)
            .attr("value", joined)
            .into()
    }

    fn validate(&self, value: &Value, _ctx: &RenderContext<'_>) -> Result<(), String> {
        let items = value.as_array().ok_or("must be a list of numbers")?;
        if items.is_empty() {
            return Err("must not be empty".to_string());
        }
        if items.iter().any(|n| n.as_u64().is_none_or(|n| n == 0)) {
            return Err("must contain positive integers only".to_string());
        }
        Ok(())
    }
}

/// `show-layout-editor`: the `tabs[].groups[].items[]` tree of `show-content`
pub struct ShowLayoutEditor;

impl CustomRenderer for ShowLayoutEditor {
    fn render(&self, value: Option<&Value>, path: &str, _field: &FieldDescriptor, _ctx: &RenderContext<'_>) -> View {
        let tabs: Vec<ShowTab> = value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        el("div")
            .attr("class", "show-layout-editor")
            .attr("data-bind", path)
            .children(tabs.iter().map(|tab| {
                el("fieldset")
                    .attr("data-id", tab.id.as_str())
                    .child(el("legend").text(tab.label.as_str()))
                    .children(tab.groups.iter().map(|group| {
                        el("div")
                            .attr("class", "show-layout-editor__group")
                            .attr("data-id", group.id.as_str())
                            .attr("data-columns", group.columns.to_string())
                            .children(group.items.iter().map(|item| {
                                el("span")
                                    .attr("data-id", item.id.as_str())
                                    .attr("data-colspan", item.colspan.to_string())
                                    .text(item.field.as_str())
                            }))
                    }))
            }))
            .child(
                el("button")
                    .attr("type", "button")
                    .attr("data-action", "add-tab")
                    .attr("data-path", path)
                    .text("Add tab"),
            )
            .into()
    }

    fn validate(&self, value: &Value, _ctx: &RenderContext<'_>) -> Result<(), String> {
        let tabs: Vec<ShowTab> = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
        let config = ShowConfig {
            id: None,
            resource_id: String::new(),
            tabs,
        };
        config.check().map_err(|e| e.to_string())
    }
}

/// Custom renderers referenced by the built-in block schemas
pub fn custom_renderers() -> CustomRenderers {
    let mut customs = CustomRenderers::new();
    customs.insert("column-editor".to_string(), Arc::new(ColumnEditor));
    customs.insert("filter-editor".to_string(), Arc::new(FilterEditor));
    customs.insert("number-list".to_string(), Arc::new(NumberList));
    customs.insert("show-layout-editor".to_string(), Arc::new(ShowLayoutEditor));
    customs
}
