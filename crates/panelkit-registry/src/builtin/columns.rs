//! Built-in table cell renderers

use std::fmt::Write;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use panelkit_api::SelectOption;
use serde_json::{Value, json};

use super::{BuiltinColumn, display_value, option_str};
use crate::component::{Props, RenderContext};
use crate::registry::UnitDefinition;
use crate::schema::FieldDescriptor;
use crate::view::{View, el};

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_DECIMALS: f64 = 10.0;

impl BuiltinColumn {
    pub(crate) fn definition(self) -> UnitDefinition {
        match self {
            BuiltinColumn::Text => UnitDefinition::new(self.as_str(), "Text", Arc::new(text_cell))
                .with_schema(vec![
                    FieldDescriptor::number("truncate", Some(0.0), None)
                        .label("Truncate after")
                        .comment("0 keeps the full value")
                        .default(json!(0)),
                ]),
            BuiltinColumn::Number => UnitDefinition::new(self.as_str(), "Number", Arc::new(number_cell))
                .with_schema(vec![
                    FieldDescriptor::number("decimals", Some(0.0), Some(MAX_DECIMALS)).label("Decimals"),
                    FieldDescriptor::text("prefix").label("Prefix"),
                    FieldDescriptor::text("suffix").label("Suffix"),
                ]),
            BuiltinColumn::Date => UnitDefinition::new(self.as_str(), "Date", Arc::new(date_cell))
                .with_schema(vec![
                    FieldDescriptor::text("format")
                        .label("Format")
                        .comment("strftime pattern")
                        .default(json!(DEFAULT_DATE_FORMAT)),
                ]),
            BuiltinColumn::Boolean => UnitDefinition::new(self.as_str(), "Boolean", Arc::new(boolean_cell))
                .with_schema(vec![
                    FieldDescriptor::text("trueLabel").label("True label").default(json!("Yes")),
                    FieldDescriptor::text("falseLabel").label("False label").default(json!("No")),
                ]),
            BuiltinColumn::Badge => UnitDefinition::new(self.as_str(), "Badge", Arc::new(badge_cell))
                .with_schema(vec![
                    FieldDescriptor::repeater(
                        "variants",
                        vec![
                            FieldDescriptor::combobox("value", Vec::new(), true).label("Value").required(),
                            FieldDescriptor::text("label").label("Label"),
                            FieldDescriptor::dropdown("variant", variant_options())
                                .label("Variant")
                                .default(json!("default")),
                        ],
                    )
                    .label("Variants")
                    .default(json!([])),
                ]),
            BuiltinColumn::Json => UnitDefinition::new(self.as_str(), "JSON", Arc::new(json_cell))
                .with_schema(vec![
                    FieldDescriptor::switch("pretty").label("Pretty print").default(json!(false)),
                ]),
        }
    }
}

fn variant_options() -> Vec<SelectOption> {
    ["default", "success", "warning", "danger", "info"]
        .into_iter()
        .map(|v| SelectOption::new(v, v))
        .collect()
}

fn empty_cell() -> View {
    el("span").attr("class", "empty").text("-").into()
}

fn cell_value(props: &Props) -> Option<&Value> {
    props.runtime("value")
}

/// Format a date-ish value (RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD`
/// or epoch milliseconds). Unparseable input is returned unchanged.
pub fn format_date(value: &Value, format: Option<&str>) -> String {
    let format = format.filter(|f| !f.is_empty()).unwrap_or(DEFAULT_DATE_FORMAT);
    let mut out = String::new();
    let written = match value {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                write!(out, "{}", dt.format(format))
            } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                write!(out, "{}", dt.format(format))
            } else if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                write!(out, "{}", d.format(format))
            } else {
                return s.clone();
            }
        }
        Value::Number(n) => match n.as_i64().and_then(DateTime::from_timestamp_millis) {
            Some(dt) => write!(out, "{}", dt.format(format)),
            None => return n.to_string(),
        },
        other => return display_value(other),
    };
    // invalid strftime patterns surface as a formatting error
    match written {
        Ok(()) => out,
        Err(_) => display_value(value),
    }
}

fn text_cell(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let Some(value) = cell_value(props) else {
        return empty_cell();
    };
    let full = display_value(value);
    let limit = props.f64("truncate").map(|n| n as usize).unwrap_or(0);
    if limit > 0 && full.chars().count() > limit {
        let short: String = full.chars().take(limit).collect();
        return el("span").attr("title", full).text(format!("{}…", short)).into();
    }
    el("span").text(full).into()
}

fn number_cell(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let Some(value) = cell_value(props) else {
        return empty_cell();
    };
    let formatted = match (value.as_f64(), props.f64("decimals")) {
        (Some(n), Some(decimals)) => format!("{:.*}", decimals.clamp(0.0, MAX_DECIMALS) as usize, n),
        _ => display_value(value),
    };
    el("span")
        .attr("class", "numeric")
        .text(format!(
            "{}{}{}",
            props.str("prefix").unwrap_or_default(),
            formatted,
            props.str("suffix").unwrap_or_default()
        ))
        .into()
}

fn date_cell(props: &Props, _ctx: &RenderContext<'_>) -> View {
    match cell_value(props) {
        Some(value) => el("time")
            .attr("datetime", display_value(value))
            .text(format_date(value, props.str("format")))
            .into(),
        None => empty_cell(),
    }
}

fn boolean_cell(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let Some(value) = cell_value(props) else {
        return empty_cell();
    };
    let truthy = match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.as_str(), "true" | "1" | "yes"),
        _ => false,
    };
    let label = if truthy {
        props.str("trueLabel").unwrap_or("Yes")
    } else {
        props.str("falseLabel").unwrap_or("No")
    };
    el("span").attr("data-value", truthy.to_string()).text(label).into()
}

fn badge_cell(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let Some(value) = cell_value(props) else {
        return empty_cell();
    };
    let raw = display_value(value);
    let matched = props
        .array("variants")
        .iter()
        .find(|v| option_str(v, "value") == Some(raw.as_str()));
    let variant = matched
        .and_then(|v| option_str(v, "variant"))
        .unwrap_or("default");
    let label = matched
        .and_then(|v| option_str(v, "label"))
        .unwrap_or(raw.as_str());
    el("span")
        .attr("class", "badge")
        .attr("data-variant", variant)
        .text(label)
        .into()
}

fn json_cell(props: &Props, _ctx: &RenderContext<'_>) -> View {
    let Some(value) = cell_value(props) else {
        return empty_cell();
    };
    let rendered = if props.bool_or("pretty", false) {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    } else {
        value.to_string()
    };
    el("code").text(rendered).into()
}
