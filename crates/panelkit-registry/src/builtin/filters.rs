//! Built-in list filter controls
//!
//! Filter props carry the persisted filter object (`id`, `field`, `label`,
//! `type`, `operator`, `options`, `placeholder`) and the current query value
//! under `runtime.value`.

use std::sync::Arc;

use serde_json::{Value, json};

use super::{BuiltinFilter, display_value};
use crate::component::{Props, RenderContext};
use crate::registry::UnitDefinition;
use crate::schema::FieldDescriptor;
use crate::view::{Element, View, el};

fn option_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("label").label("Label").required(),
        FieldDescriptor::combobox("value", Vec::new(), true).label("Value").required(),
    ]
}

impl BuiltinFilter {
    pub(crate) fn definition(self) -> UnitDefinition {
        match self {
            BuiltinFilter::Input => UnitDefinition::new(self.as_str(), "Text input", Arc::new(input_filter))
                .with_schema(vec![FieldDescriptor::text("placeholder").label("Placeholder")]),
            BuiltinFilter::Select => UnitDefinition::new(self.as_str(), "Select", Arc::new(select_filter))
                .with_schema(vec![
                    FieldDescriptor::repeater("options", option_fields())
                        .label("Options")
                        .default(json!([])),
                ]),
            BuiltinFilter::Combobox => UnitDefinition::new(self.as_str(), "Combobox", Arc::new(combobox_filter))
                .with_schema(vec![
                    FieldDescriptor::repeater("options", option_fields())
                        .label("Suggestions")
                        .default(json!([])),
                    FieldDescriptor::text("placeholder").label("Placeholder"),
                ]),
            BuiltinFilter::Checkbox => UnitDefinition::new(self.as_str(), "Checkbox", Arc::new(checkbox_filter)),
        }
    }
}

fn field_name(props: &Props) -> &str {
    props.str("field").unwrap_or_default()
}

fn control_id(props: &Props) -> String {
    format!("filter-{}", props.str("id").unwrap_or_else(|| field_name(props)))
}

/// Label wrapper shared by every filter control
fn labelled(props: &Props, control: Element) -> View {
    el("label")
        .attr("for", control_id(props))
        .attr("data-operator", props.str("operator").unwrap_or("eq"))
        .child(el("span").text(props.str("label").unwrap_or_else(|| field_name(props))))
        .child(control.attr("id", control_id(props)))
        .into()
}

fn current(props: &Props) -> Option<&Value> {
    props.runtime("value")
}

fn options(props: &Props) -> impl Iterator<Item = (String, String)> + '_ {
    props.array("options").iter().map(|option| {
        let value = option.get("value").map(display_value).unwrap_or_default();
        let label = option
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.clone());
        (label, value)
    })
}

fn input_filter(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let control = el("input")
        .attr("type", "text")
        .attr("name", field_name(props))
        .attr_opt("placeholder", props.str("placeholder"))
        .attr("value", current(props).map(display_value).unwrap_or_default());
    labelled(props, control)
}

fn select_filter(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let selected = current(props).map(display_value);
    let control = el("select")
        .attr("name", field_name(props))
        .child(el("option").attr("value", "").text("All"))
        .children(options(props).map(|(label, value)| {
            el("option")
                .flag("selected", selected.as_deref() == Some(value.as_str()))
                .attr("value", value)
                .text(label)
        }));
    labelled(props, control)
}

fn combobox_filter(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let list_id = format!("{}-options", control_id(props));
    let control = el("input")
        .attr("type", "text")
        .attr("name", field_name(props))
        .attr("list", list_id.clone())
        .attr_opt("placeholder", props.str("placeholder"))
        .attr("value", current(props).map(display_value).unwrap_or_default());
    let datalist = el("datalist")
        .attr("id", list_id)
        .children(options(props).map(|(label, value)| el("option").attr("value", value).text(label)));
    el("div")
        .attr("class", "combobox")
        .child(labelled(props, control))
        .child(datalist)
        .into()
}

fn checkbox_filter(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let checked = current(props).and_then(Value::as_bool).unwrap_or(false);
    let control = el("input")
        .attr("type", "checkbox")
        .attr("name", field_name(props))
        .flag("checked", checked);
    labelled(props, control)
}
