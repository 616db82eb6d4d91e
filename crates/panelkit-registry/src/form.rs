//! Configuration form rendering
//!
//! Walks a schema and emits one control per value field. Groups become
//! layout containers, repeaters render one sub-form per element and custom
//! fields are delegated to the caller-supplied renderer.

use panelkit_common::UnitKind;
use serde_json::{Map, Value};

use crate::component::{Props, RenderContext};
use crate::schema::{ConfigSchema, FieldDescriptor, FieldKind, Span, SpanKeyword, join};
use crate::view::{View, el, placeholder};

pub fn render_form(schema: &ConfigSchema, value: &Map<String, Value>, ctx: &RenderContext<'_>) -> View {
    el("form")
        .attr("class", "config-form")
        .children(render_fields(&schema.fields, value, "", ctx))
        .into()
}

fn render_fields(
    fields: &[FieldDescriptor],
    value: &Map<String, Value>,
    prefix: &str,
    ctx: &RenderContext<'_>,
) -> Vec<View> {
    fields
        .iter()
        .map(|field| render_field(field, value, prefix, ctx))
        .collect()
}

fn span_attr(span: Option<Span>) -> String {
    match span {
        Some(Span::Columns(n)) => n.to_string(),
        Some(Span::Keyword(SpanKeyword::Full)) => "full".to_string(),
        Some(Span::Keyword(SpanKeyword::Left)) => "left".to_string(),
        Some(Span::Keyword(SpanKeyword::Right)) => "right".to_string(),
        None => "1".to_string(),
    }
}

fn render_field(
    field: &FieldDescriptor,
    value: &Map<String, Value>,
    prefix: &str,
    ctx: &RenderContext<'_>,
) -> View {
    if let FieldKind::Group { columns, children } = &field.kind {
        let mut group = el("fieldset")
            .attr("class", "config-form__group")
            .attr("data-group", field.name.as_str())
            .attr("data-columns", columns.to_string());
        if let Some(label) = &field.label {
            group = group.child(el("legend").text(label.as_str()));
        }
        return group
            .children(children.iter().map(|child| {
                el("div")
                    .attr("class", "config-form__cell")
                    .attr("data-span", span_attr(child.span))
                    .child(render_field(child, value, prefix, ctx))
            }))
            .into();
    }

    let path = join(prefix, &field.name);
    let current = value.get(&field.name);
    let control = match &field.kind {
        FieldKind::Custom { renderer } => match ctx.customs.get(renderer) {
            Some(custom) => custom.render(current, &path, field, ctx),
            None => placeholder(UnitKind::FieldType, renderer),
        },
        FieldKind::Repeater { form, .. } => {
            let items = current
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let empty = Map::new();
            let last = items.len().saturating_sub(1);
            let rendered = items.iter().enumerate().map(|(index, item)| {
                let item_path = format!("{}[{}]", path, index);
                let object = item.as_object().unwrap_or(&empty);
                View::from(
                    el("fieldset")
                        .attr("class", "config-form__item")
                        .attr("data-index", index.to_string())
                        .children(render_fields(&form.fields, object, &item_path, ctx))
                        .child(item_action("repeater-move-up", &path, index, index == 0))
                        .child(item_action("repeater-move-down", &path, index, index == last))
                        .child(item_action("repeater-remove", &path, index, false)),
                )
            });
            render_field_type(field, current, &path, rendered.collect(), ctx)
        }
        _ => render_field_type(field, current, &path, Vec::new(), ctx),
    };

    let mut wrapper = el("div")
        .attr("class", "config-form__field")
        .attr("data-field", path.as_str());
    if let Some(above) = &field.comment_above {
        wrapper = wrapper.child(el("p").attr("class", "comment-above").text(above.as_str()));
    }
    let mut label = el("label").attr("for", path.as_str()).text(field.display_label());
    if field.required {
        label = label.child(el("span").attr("class", "required").text("*"));
    }
    wrapper = wrapper.child(label).child(control);
    if let Some(comment) = &field.comment {
        wrapper = wrapper.child(el("p").attr("class", "comment").text(comment.as_str()));
    }
    wrapper.into()
}

fn item_action(action: &str, path: &str, index: usize, disabled: bool) -> View {
    el("button")
        .attr("type", "button")
        .attr("data-action", action)
        .attr("data-path", path)
        .attr("data-index", index.to_string())
        .flag("disabled", disabled)
        .into()
}

fn render_field_type(
    field: &FieldDescriptor,
    current: Option<&Value>,
    path: &str,
    children: Vec<View>,
    ctx: &RenderContext<'_>,
) -> View {
    let slug = field.kind.type_name();
    let Some(definition) = ctx.registry.get(UnitKind::FieldType, slug) else {
        return placeholder(UnitKind::FieldType, slug);
    };
    let config = match serde_json::to_value(field) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let mut runtime = Map::new();
    runtime.insert("value".to_string(), current.cloned().unwrap_or(Value::Null));
    runtime.insert("path".to_string(), Value::String(path.to_string()));
    let props = Props {
        config,
        runtime,
        children,
        ..Default::default()
    };
    definition.render(&props, ctx)
}
