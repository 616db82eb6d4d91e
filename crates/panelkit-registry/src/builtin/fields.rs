//! Built-in configuration form controls
//!
//! Field-type props carry the serialized field descriptor as `config` and
//! the bound value and its write-back path under `runtime.value` and
//! `runtime.path`.

use std::sync::Arc;

use serde_json::Value;

use super::{BuiltinField, display_value};
use crate::component::{Props, RenderContext};
use crate::registry::UnitDefinition;
use crate::view::{Element, View, el};

impl BuiltinField {
    pub(crate) fn definition(self) -> UnitDefinition {
        let component: crate::component::ComponentRef = match self {
            BuiltinField::Text => Arc::new(text_field),
            BuiltinField::Textarea => Arc::new(textarea_field),
            BuiltinField::Number => Arc::new(number_field),
            BuiltinField::Dropdown => Arc::new(dropdown_field),
            BuiltinField::Combobox => Arc::new(combobox_field),
            BuiltinField::Checkbox => Arc::new(checkbox_field),
            BuiltinField::Switch => Arc::new(switch_field),
            BuiltinField::Slider => Arc::new(slider_field),
            BuiltinField::Repeater => Arc::new(repeater_field),
        };
        let label = match self {
            BuiltinField::Text => "Text",
            BuiltinField::Textarea => "Text area",
            BuiltinField::Number => "Number",
            BuiltinField::Dropdown => "Dropdown",
            BuiltinField::Combobox => "Combobox",
            BuiltinField::Checkbox => "Checkbox",
            BuiltinField::Switch => "Switch",
            BuiltinField::Slider => "Slider",
            BuiltinField::Repeater => "Repeater",
        };
        UnitDefinition::new(self.as_str(), label, component)
    }
}

fn path(props: &Props) -> &str {
    props
        .runtime_str("path")
        .or_else(|| props.str("name"))
        .unwrap_or_default()
}

fn value(props: &Props) -> Option<&Value> {
    props.runtime("value")
}

/// Input bound to the field path
fn bound(tag: &str, props: &Props) -> Element {
    el(tag)
        .attr("id", path(props))
        .attr("name", path(props))
        .attr("data-bind", path(props))
        .flag("required", props.bool_or("required", false))
}

fn numeric_attrs(mut input: Element, props: &Props) -> Element {
    for key in ["min", "max", "step"] {
        if let Some(n) = props.f64(key) {
            input = input.attr(key, n.to_string());
        }
    }
    input
}

fn option_elements(props: &Props, selected: Option<&Value>) -> Vec<Element> {
    props
        .array("options")
        .iter()
        .map(|option| {
            let value = option.get("value").cloned().unwrap_or(Value::Null);
            let label = option
                .get("label")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| display_value(&value));
            el("option")
                .attr("value", display_value(&value))
                .flag("selected", selected == Some(&value))
                .text(label)
        })
        .collect()
}

fn text_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    bound("input", props)
        .attr("type", "text")
        .attr_opt("placeholder", props.str("placeholder"))
        .attr("value", value(props).map(display_value).unwrap_or_default())
        .into()
}

fn textarea_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    bound("textarea", props)
        .attr_opt("rows", props.f64("rows").map(|r| r.to_string()))
        .text(value(props).map(display_value).unwrap_or_default())
        .into()
}

fn number_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let input = bound("input", props)
        .attr("type", "number")
        .attr("value", value(props).map(display_value).unwrap_or_default());
    numeric_attrs(input, props).into()
}

fn dropdown_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    bound("select", props)
        .children(option_elements(props, value(props)))
        .into()
}

fn combobox_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let list_id = format!("{}-options", path(props));
    let input = bound("input", props)
        .attr("type", "text")
        .attr("list", list_id.clone())
        .attr("data-allow-custom", props.bool_or("allowCustom", false).to_string())
        .attr("value", value(props).map(display_value).unwrap_or_default());
    el("div")
        .attr("class", "combobox")
        .child(input)
        .child(el("datalist").attr("id", list_id).children(option_elements(props, None)))
        .into()
}

fn checkbox_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    bound("input", props)
        .attr("type", "checkbox")
        .flag("checked", value(props).and_then(Value::as_bool).unwrap_or(false))
        .into()
}

fn switch_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let on = value(props).and_then(Value::as_bool).unwrap_or(false);
    bound("input", props)
        .attr("type", "checkbox")
        .attr("role", "switch")
        .attr("aria-checked", on.to_string())
        .flag("checked", on)
        .into()
}

fn slider_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let current = value(props).map(display_value).unwrap_or_default();
    let input = bound("input", props)
        .attr("type", "range")
        .attr("value", current.clone());
    el("div")
        .attr("class", "slider")
        .child(numeric_attrs(input, props))
        .child(el("output").attr("for", path(props)).text(current))
        .into()
}

fn repeater_field(props: &Props, _ctx: &RenderContext<'_>) -> View {
    el("div")
        .attr("class", "repeater")
        .attr("data-bind", path(props))
        .children(props.children.iter().cloned())
        .child(
            el("button")
                .attr("type", "button")
                .attr("data-action", "repeater-append")
                .attr("data-path", path(props))
                .text(props.str("addLabel").unwrap_or("Add item")),
        )
        .into()
}
