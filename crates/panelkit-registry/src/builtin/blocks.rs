//! Built-in page blocks

use std::sync::Arc;

use panelkit_api::SelectOption;
use panelkit_common::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, UnitKind};
use serde_json::{Map, Value, json};

use super::{BuiltinBlock, display_value, format_date, option_str};
use crate::component::{Props, RenderContext, value_at};
use crate::registry::UnitDefinition;
use crate::schema::{FieldDescriptor, Span, SpanKeyword};
use crate::view::{Element, View, el, text};

impl BuiltinBlock {
    pub(crate) fn definition(self) -> UnitDefinition {
        match self {
            BuiltinBlock::ListHeader => UnitDefinition::new(self.as_str(), "List header", Arc::new(list_header))
                .with_description("Title, description and page actions")
                .with_schema(vec![
                    FieldDescriptor::text("title").label("Title"),
                    FieldDescriptor::textarea("description").label("Description"),
                    FieldDescriptor::group(
                        "actions",
                        2,
                        vec![
                            FieldDescriptor::switch("showCreateButton")
                                .label("Show create button")
                                .default(json!(true)),
                            FieldDescriptor::switch("showEditToggle")
                                .label("Show edit toggle")
                                .default(json!(true)),
                        ],
                    ),
                ]),
            BuiltinBlock::ListFilters => UnitDefinition::new(self.as_str(), "List filters", Arc::new(list_filters))
                .with_description("Query filters above the table")
                .with_schema(vec![
                    FieldDescriptor::custom("filters", "filter-editor")
                        .label("Filters")
                        .default(json!([])),
                    FieldDescriptor::dropdown(
                        "layout",
                        vec![
                            SelectOption::new("Inline", "inline"),
                            SelectOption::new("Stacked", "stacked"),
                        ],
                    )
                    .label("Layout")
                    .default(json!("inline")),
                    FieldDescriptor::switch("showReset")
                        .label("Show reset button")
                        .default(json!(true)),
                ]),
            BuiltinBlock::ListTable => UnitDefinition::new(self.as_str(), "List table", Arc::new(list_table))
                .with_description("Record table with configurable columns")
                .with_schema(vec![
                    FieldDescriptor::custom("columns", "column-editor")
                        .label("Columns")
                        .default(json!([])),
                    FieldDescriptor::text("emptyText")
                        .label("Empty text")
                        .default(json!("No records found")),
                    FieldDescriptor::group(
                        "appearance",
                        2,
                        vec![
                            FieldDescriptor::switch("striped").label("Striped rows").default(json!(false)),
                            FieldDescriptor::dropdown(
                                "density",
                                vec![
                                    SelectOption::new("Compact", "compact"),
                                    SelectOption::new("Normal", "normal"),
                                ],
                            )
                            .label("Density")
                            .default(json!("normal")),
                        ],
                    ),
                ]),
            BuiltinBlock::ListPagination => {
                UnitDefinition::new(self.as_str(), "Pagination", Arc::new(list_pagination))
                    .with_schema(vec![
                        FieldDescriptor::number("pageSize", Some(1.0), Some(500.0))
                            .label("Page size")
                            .default(json!(DEFAULT_PAGE_SIZE)),
                        FieldDescriptor::custom("pageSizeOptions", "number-list")
                            .label("Page size options")
                            .default(json!(DEFAULT_PAGE_SIZE_OPTIONS)),
                        FieldDescriptor::switch("showTotal")
                            .label("Show total")
                            .default(json!(true)),
                    ])
            }
            BuiltinBlock::ShowHeader => UnitDefinition::new(self.as_str(), "Detail header", Arc::new(show_header))
                .with_schema(vec![
                    FieldDescriptor::text("title").label("Title"),
                    FieldDescriptor::group(
                        "actions",
                        3,
                        vec![
                            FieldDescriptor::switch("showBackLink").label("Back link").default(json!(true)),
                            FieldDescriptor::switch("showEditButton").label("Edit button").default(json!(true)),
                            FieldDescriptor::switch("showEditToggle").label("Edit toggle").default(json!(true)),
                        ],
                    ),
                ]),
            BuiltinBlock::ShowContent => UnitDefinition::new(self.as_str(), "Detail content", Arc::new(show_content))
                .with_description("Record fields laid out in tabs and groups")
                .with_schema(vec![
                    FieldDescriptor::custom("tabs", "show-layout-editor")
                        .label("Layout")
                        .comment("Without tabs every record field is listed")
                        .default(json!([])),
                ]),
            BuiltinBlock::Tabs => UnitDefinition::new(self.as_str(), "Tabs", Arc::new(tabs))
                .with_schema(vec![
                    FieldDescriptor::repeater(
                        "tabs",
                        vec![
                            FieldDescriptor::text("key").label("Key").required(),
                            FieldDescriptor::text("label").label("Label").required(),
                        ],
                    )
                    .label("Tabs")
                    .default(json!([])),
                    FieldDescriptor::text("defaultTab").label("Default tab"),
                ]),
            BuiltinBlock::Grid => UnitDefinition::new(self.as_str(), "Grid", Arc::new(grid))
                .with_schema(vec![
                    FieldDescriptor::group(
                        "layout",
                        2,
                        vec![
                            FieldDescriptor::slider("columns", 1.0, 12.0, 1.0)
                                .label("Columns")
                                .default(json!(2)),
                            FieldDescriptor::dropdown(
                                "gap",
                                vec![
                                    SelectOption::new("Small", "sm"),
                                    SelectOption::new("Medium", "md"),
                                    SelectOption::new("Large", "lg"),
                                ],
                            )
                            .label("Gap")
                            .default(json!("md")),
                        ],
                    ),
                    FieldDescriptor::repeater(
                        "items",
                        vec![
                            FieldDescriptor::text("field").label("Field").required(),
                            FieldDescriptor::text("label").label("Label"),
                            FieldDescriptor::number("span", Some(1.0), Some(12.0))
                                .label("Span")
                                .default(json!(1)),
                        ],
                    )
                    .label("Items")
                    .span(Span::Keyword(SpanKeyword::Full))
                    .default(json!([])),
                ]),
        }
    }
}

fn edit_toggle(props: &Props, ctx: &RenderContext<'_>) -> Element {
    let label = if ctx.edit_mode {
        props.label("doneEditing", "Done")
    } else {
        props.label("editPage", "Edit page")
    };
    el("button")
        .attr("type", "button")
        .attr("data-action", "toggle-edit-mode")
        .attr("aria-pressed", ctx.edit_mode.to_string())
        .text(label)
}

fn list_header(props: &Props, ctx: &RenderContext<'_>) -> View {
    let title = props
        .str("title")
        .or_else(|| props.runtime_str("resourceLabel"))
        .unwrap_or("Untitled");

    let mut heading = el("div")
        .attr("class", "list-header__title")
        .child(el("h1").text(title));
    if let Some(description) = props.str("description") {
        heading = heading.child(el("p").text(description));
    }

    let mut actions = el("div").attr("class", "list-header__actions");
    if props.bool_or("showEditToggle", true) {
        actions = actions.child(edit_toggle(props, ctx));
    }
    if props.bool_or("showCreateButton", true) {
        actions = actions.child(
            el("a")
                .attr("href", props.runtime_str("createHref").unwrap_or("#create"))
                .attr("data-action", "create")
                .text(props.label("create", "Create")),
        );
    }

    el("header")
        .attr("class", "list-header")
        .child(heading)
        .child(actions)
        .into()
}

fn list_filters(props: &Props, ctx: &RenderContext<'_>) -> View {
    let values = props.runtime("filterValues");
    let filters = props.array("filters");

    let mut form = el("form")
        .attr("class", "list-filters")
        .attr("role", "search")
        .attr("data-layout", props.str("layout").unwrap_or("inline"));

    for filter in filters {
        let Some(config) = filter.as_object() else {
            continue;
        };
        let kind = option_str(filter, "type").unwrap_or_default();
        let field = option_str(filter, "field").unwrap_or_default();
        let mut runtime = Map::new();
        runtime.insert(
            "value".to_string(),
            values
                .and_then(|v| v.get(field))
                .cloned()
                .unwrap_or(Value::Null),
        );
        form = form.child(
            el("div")
                .attr("class", "list-filters__item")
                .attr_opt("data-filter-id", option_str(filter, "id"))
                .child(ctx.render_unit(UnitKind::Filter, kind, config, runtime)),
        );
    }

    if filters.is_empty() {
        if ctx.edit_mode {
            form = form.child(el("p").attr("class", "empty").text("No filters configured"));
        }
    } else {
        form = form.child(el("button").attr("type", "submit").text(props.label("apply", "Apply")));
        if props.bool_or("showReset", true) {
            form = form.child(el("button").attr("type", "reset").text(props.label("reset", "Reset")));
        }
    }
    form.into()
}

fn column_visible(column: &Value, visible: Option<&Vec<Value>>) -> bool {
    match visible {
        Some(ids) => option_str(column, "id").is_some_and(|id| ids.iter().any(|v| v == id)),
        None => column
            .get("enabledByDefault")
            .and_then(Value::as_bool)
            .unwrap_or(true),
    }
}

fn list_table(props: &Props, ctx: &RenderContext<'_>) -> View {
    let visible = props.runtime("visibleColumns").and_then(Value::as_array);
    let columns: Vec<&Map<String, Value>> = props
        .array("columns")
        .iter()
        .filter(|c| column_visible(c, visible))
        .filter_map(Value::as_object)
        .collect();

    if columns.is_empty() {
        return el("div")
            .attr("class", "list-table list-table--empty")
            .child(el("p").attr("class", "empty").text(props.label("noColumns", "No columns configured")))
            .into();
    }

    let sort = props.runtime("sort");
    let sort_field = sort.and_then(|s| option_str(s, "field"));
    let sort_order = sort.and_then(|s| option_str(s, "order")).unwrap_or("asc");

    let header = el("tr").children(columns.iter().map(|column| {
        let field = column.get("field").and_then(Value::as_str).unwrap_or_default();
        let label = column
            .get("label")
            .and_then(Value::as_str)
            .filter(|l| !l.is_empty())
            .unwrap_or(field);
        let mut th = el("th").attr("scope", "col").text(label);
        if column.get("sortable").and_then(Value::as_bool).unwrap_or(true) {
            let aria = match (sort_field == Some(field), sort_order) {
                (true, "desc") => "descending",
                (true, _) => "ascending",
                (false, _) => "none",
            };
            th = th.attr("data-sort-field", field).attr("aria-sort", aria);
        }
        th
    }));

    let records = props
        .runtime("records")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let body = if records.is_empty() {
        vec![el("tr").child(
            el("td")
                .attr("class", "empty")
                .attr("colspan", columns.len().to_string())
                .text(props.str("emptyText").unwrap_or("No records found")),
        )]
    } else {
        records
            .iter()
            .map(|record| {
                el("tr").children(columns.iter().map(|column| {
                    let field = column.get("field").and_then(Value::as_str).unwrap_or_default();
                    let kind = column.get("type").and_then(Value::as_str).unwrap_or("text");
                    let mut runtime = Map::new();
                    runtime.insert(
                        "value".to_string(),
                        value_at(record, field).cloned().unwrap_or(Value::Null),
                    );
                    runtime.insert("record".to_string(), record.clone());
                    el("td")
                        .attr_opt("data-column", column.get("id").and_then(Value::as_str))
                        .child(ctx.render_unit(UnitKind::Column, kind, column, runtime))
                }))
            })
            .collect()
    };

    let mut table = el("table").attr("class", "list-table");
    if props.bool_or("striped", false) {
        table = table.attr("data-striped", "true");
    }
    table
        .attr("data-density", props.str("density").unwrap_or("normal"))
        .child(el("thead").child(header))
        .child(el("tbody").children(body))
        .into()
}

fn list_pagination(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let page_size = props
        .runtime_u64("pageSize")
        .or_else(|| props.f64("pageSize").map(|n| n as u64))
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let total = props.runtime_u64("total").unwrap_or(0);
    let pages = total.div_ceil(page_size).max(1);
    let page = props.runtime_u64("page").unwrap_or(1).clamp(1, pages);

    let mut nav = el("nav")
        .attr("class", "list-pagination")
        .attr("aria-label", "Pagination");
    if props.bool_or("showTotal", true) {
        nav = nav.child(el("span").attr("class", "list-pagination__total").text(format!("{} records", total)));
    }

    let options: Vec<u64> = props.array("pageSizeOptions").iter().filter_map(Value::as_u64).collect();

    nav.child(
        el("button")
            .attr("type", "button")
            .attr("data-page", (page.saturating_sub(1)).max(1).to_string())
            .flag("disabled", page <= 1)
            .text(props.label("previous", "Previous")),
    )
    .child(el("span").attr("class", "list-pagination__status").text(format!("Page {} of {}", page, pages)))
    .child(
        el("button")
            .attr("type", "button")
            .attr("data-page", (page + 1).min(pages).to_string())
            .flag("disabled", page >= pages)
            .text(props.label("next", "Next")),
    )
    .child(
        el("select").attr("name", "pageSize").children(options.into_iter().map(|n| {
            el("option")
                .attr("value", n.to_string())
                .flag("selected", n == page_size)
                .text(n.to_string())
        })),
    )
    .into()
}

fn show_header(props: &Props, ctx: &RenderContext<'_>) -> View {
    let title = props
        .str("title")
        .or_else(|| props.runtime_str("recordTitle"))
        .or_else(|| props.runtime_str("resourceLabel"))
        .unwrap_or("Details");

    let mut actions = el("div").attr("class", "show-header__actions");
    if props.bool_or("showBackLink", true) {
        actions = actions.child(
            el("a")
                .attr("href", props.runtime_str("backHref").unwrap_or("#list"))
                .attr("data-action", "back")
                .text(props.label("back", "Back")),
        );
    }
    if props.bool_or("showEditButton", true) {
        actions = actions.child(
            el("a")
                .attr("href", props.runtime_str("editHref").unwrap_or("#edit"))
                .attr("data-action", "edit")
                .text(props.label("edit", "Edit")),
        );
    }
    if props.bool_or("showEditToggle", true) {
        actions = actions.child(edit_toggle(props, ctx));
    }

    el("header")
        .attr("class", "show-header")
        .child(el("h1").text(title))
        .child(actions)
        .into()
}

fn format_item(value: Option<&Value>, kind: &str) -> View {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return el("span").attr("class", "empty").text("-").into();
    };
    match kind {
        "date" => text(format_date(value, None)),
        "richtext" => el("div").attr("class", "richtext").text(display_value(value)).into(),
        _ => text(display_value(value)),
    }
}

fn show_content(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let empty = Value::Object(Map::new());
    let record = props.runtime("record").unwrap_or(&empty);
    let tabs = props.array("tabs");

    if tabs.is_empty() {
        let entries = record.as_object().into_iter().flatten().flat_map(|(key, value)| {
            [
                el("dt").text(key.as_str()),
                el("dd").child(format_item(Some(value), "text")),
            ]
        });
        return el("div")
            .attr("class", "show-content")
            .child(el("dl").children(entries))
            .into();
    }

    let active = props
        .runtime_str("activeTab")
        .or_else(|| option_str(&tabs[0], "id"))
        .unwrap_or_default();

    let nav = el("nav").attr("role", "tablist").children(tabs.iter().map(|tab| {
        let id = option_str(tab, "id").unwrap_or_default();
        el("button")
            .attr("type", "button")
            .attr("role", "tab")
            .attr("data-tab", id)
            .attr("aria-selected", (id == active).to_string())
            .text(option_str(tab, "label").unwrap_or(id))
    }));

    let sections = tabs.iter().map(|tab| {
        let id = option_str(tab, "id").unwrap_or_default();
        let groups = tab.get("groups").and_then(Value::as_array).into_iter().flatten();
        el("section")
            .attr("role", "tabpanel")
            .attr("data-tab", id)
            .flag("hidden", id != active)
            .children(groups.map(|group| {
                let columns = group.get("columns").and_then(Value::as_u64).unwrap_or(2);
                let mut section = el("div")
                    .attr("class", "show-group")
                    .attr("data-columns", columns.to_string());
                if let Some(title) = option_str(group, "title") {
                    section = section.child(el("h3").text(title));
                }
                let items = group.get("items").and_then(Value::as_array).into_iter().flatten();
                section.children(items.map(|item| {
                    let field = option_str(item, "field").unwrap_or_default();
                    let colspan = item.get("colspan").and_then(Value::as_u64).unwrap_or(1);
                    el("div")
                        .attr("class", "show-item")
                        .attr("data-colspan", colspan.to_string())
                        .child(el("dt").text(option_str(item, "label").unwrap_or(field)))
                        .child(el("dd").child(format_item(
                            value_at(record, field),
                            option_str(item, "type").unwrap_or("text"),
                        )))
                }))
            }))
    });

    el("div")
        .attr("class", "show-content")
        .child(nav)
        .children(sections)
        .into()
}

fn tabs(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let tabs = props.array("tabs");
    let active = props
        .runtime_str("activeTab")
        .or_else(|| props.str("defaultTab"))
        .or_else(|| tabs.first().and_then(|t| option_str(t, "key")))
        .unwrap_or_default();

    el("div")
        .attr("class", "tabs")
        .child(el("nav").attr("role", "tablist").children(tabs.iter().map(|tab| {
            let key = option_str(tab, "key").unwrap_or_default();
            el("button")
                .attr("type", "button")
                .attr("role", "tab")
                .attr("data-tab", key)
                .attr("aria-selected", (key == active).to_string())
                .text(option_str(tab, "label").unwrap_or(key))
        })))
        .child(
            el("div")
                .attr("role", "tabpanel")
                .attr("data-tab", active)
                .children(props.children.iter().cloned()),
        )
        .into()
}

fn grid(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let columns = props.f64("columns").map(|n| n as u64).unwrap_or(2).clamp(1, 12);
    let empty = Value::Object(Map::new());
    let record = props.runtime("record").unwrap_or(&empty);

    let cells = props.array("items").iter().map(|item| {
        let field = option_str(item, "field").unwrap_or_default();
        let span = item.get("span").and_then(Value::as_u64).unwrap_or(1).min(columns);
        el("div")
            .attr("class", "grid__cell")
            .attr("data-span", span.to_string())
            .child(el("label").text(option_str(item, "label").unwrap_or(field)))
            .child(format_item(value_at(record, field), "text"))
    });

    el("div")
        .attr("class", "grid")
        .attr("data-columns", columns.to_string())
        .attr("data-gap", props.str("gap").unwrap_or("md"))
        .children(cells)
        .children(props.children.iter().cloned())
        .into()
}
