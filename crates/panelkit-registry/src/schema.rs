//! Config schema model
//!
//! A schema is an ordered list of field descriptors. Descriptors form a closed
//! tagged union keyed by `type`; `group` nests descriptors for layout only
//! (its children write into the parent object), while `repeater` nests a
//! sub-form applied to each element of an array value.

use std::collections::HashSet;

use panelkit_api::SelectOption;
use panelkit_common::PanelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::component::RenderContext;

/// Structural or value error located by a dotted field path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {message}")]
pub struct SchemaError {
    pub path: String,
    pub message: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<SchemaError> for PanelError {
    fn from(e: SchemaError) -> Self {
        PanelError::Validation(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKeyword {
    Full,
    Left,
    Right,
}

/// Horizontal placement of a field inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Span {
    Columns(u8),
    Keyword(SpanKeyword),
}

fn default_group_columns() -> u8 {
    2
}

fn default_slider_step() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeaterForm {
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Dropdown {
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    #[serde(rename_all = "camelCase")]
    Combobox {
        #[serde(default)]
        options: Vec<SelectOption>,
        #[serde(default)]
        allow_custom: bool,
    },
    Checkbox,
    Switch,
    Slider {
        min: f64,
        max: f64,
        #[serde(default = "default_slider_step")]
        step: f64,
    },
    Group {
        #[serde(default = "default_group_columns")]
        columns: u8,
        children: Vec<FieldDescriptor>,
    },
    #[serde(rename_all = "camelCase")]
    Repeater {
        form: RepeaterForm,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        add_label: Option<String>,
    },
    Custom {
        renderer: String,
    },
}

impl FieldKind {
    /// Field-type registry slug used to render this descriptor
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Textarea { .. } => "textarea",
            FieldKind::Number { .. } => "number",
            FieldKind::Dropdown { .. } => "dropdown",
            FieldKind::Combobox { .. } => "combobox",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Switch => "switch",
            FieldKind::Slider { .. } => "slider",
            FieldKind::Group { .. } => "group",
            FieldKind::Repeater { .. } => "repeater",
            FieldKind::Custom { .. } => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_above: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            required: false,
            default: None,
            span: None,
            comment: None,
            comment_above: None,
        }
    }

    pub fn text(name: &str) -> Self {
        Self::new(name, FieldKind::Text { placeholder: None })
    }

    pub fn textarea(name: &str) -> Self {
        Self::new(name, FieldKind::Textarea { rows: None })
    }

    pub fn number(name: &str, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(name, FieldKind::Number { min, max, step: None })
    }

    pub fn dropdown(name: &str, options: Vec<SelectOption>) -> Self {
        Self::new(name, FieldKind::Dropdown { options })
    }

    pub fn combobox(name: &str, options: Vec<SelectOption>, allow_custom: bool) -> Self {
        Self::new(
            name,
            FieldKind::Combobox {
                options,
                allow_custom,
            },
        )
    }

    pub fn checkbox(name: &str) -> Self {
        Self::new(name, FieldKind::Checkbox)
    }

    pub fn switch(name: &str) -> Self {
        Self::new(name, FieldKind::Switch)
    }

    pub fn slider(name: &str, min: f64, max: f64, step: f64) -> Self {
        Self::new(name, FieldKind::Slider { min, max, step })
    }

    pub fn group(name: &str, columns: u8, children: Vec<FieldDescriptor>) -> Self {
        Self::new(name, FieldKind::Group { columns, children })
    }

    pub fn repeater(name: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(
            name,
            FieldKind::Repeater {
                form: RepeaterForm { fields },
                add_label: None,
            },
        )
    }

    pub fn custom(name: &str, renderer: &str) -> Self {
        Self::new(
            name,
            FieldKind::Custom {
                renderer: renderer.to_string(),
            },
        )
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn comment_above(mut self, comment: &str) -> Self {
        self.comment_above = Some(comment.to_string());
        self
    }

    /// Display label, falling back to the field name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered field list describing one unit's configuration object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSchema {
    pub fields: Vec<FieldDescriptor>,
}

impl From<Vec<FieldDescriptor>> for ConfigSchema {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }
}

pub(crate) fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

impl ConfigSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Structural check: unique names per value scope, non-empty groups and
    /// repeaters, group columns within 1..=12, spans that fit their group.
    pub fn check(&self) -> Result<(), SchemaError> {
        check_scope(&self.fields, "")
    }

    /// Find a value field by name, looking through groups
    pub fn find(&self, name: &str) -> Option<&FieldDescriptor> {
        find_field(&self.fields, name)
    }

    /// Object holding every declared default
    pub fn defaults(&self) -> Map<String, Value> {
        let mut value = Map::new();
        self.fill_defaults(&mut value);
        value
    }

    /// Insert defaults for absent properties, depth-first through groups and
    /// into each repeater element.
    pub fn fill_defaults(&self, value: &mut Map<String, Value>) {
        fill_fields(&self.fields, value);
    }

    /// Schema defaults overlaid with `config`; persisted values win
    pub fn merged(&self, config: &Map<String, Value>) -> Map<String, Value> {
        let mut value = config.clone();
        self.fill_defaults(&mut value);
        value
    }

    /// Validate a config object, returning the first failure
    /// Custom fields are checked by the renderers registered in `ctx`,
    /// which may in turn resolve nested units through its registry.
    pub fn validate(&self, value: &Map<String, Value>, ctx: &RenderContext<'_>) -> Result<(), SchemaError> {
        validate_fields(&self.fields, value, "", ctx)
    }

    /// Replace declared defaults of top-level value fields
    pub fn with_defaults(mut self, overrides: &Map<String, Value>) -> Self {
        override_defaults(&mut self.fields, overrides);
        self
    }
}

fn find_field<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find_map(|f| match &f.kind {
        FieldKind::Group { children, .. } => find_field(children, name),
        _ if f.name == name => Some(f),
        _ => None,
    })
}

fn check_scope(fields: &[FieldDescriptor], prefix: &str) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    check_fields(fields, prefix, &mut seen)
}

fn check_fields<'a>(
    fields: &'a [FieldDescriptor],
    prefix: &str,
    seen: &mut HashSet<&'a str>,
) -> Result<(), SchemaError> {
    for field in fields {
        let path = join(prefix, &field.name);
        if field.name.is_empty() {
            return Err(SchemaError::new(path, "field name must not be empty"));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::new(path, "duplicate field name"));
        }
        match &field.kind {
            FieldKind::Group { columns, children } => {
                if !(1..=12).contains(columns) {
                    return Err(SchemaError::new(path, "group columns must be between 1 and 12"));
                }
                if children.is_empty() {
                    return Err(SchemaError::new(path, "group must declare children"));
                }
                for child in children {
                    if let Some(Span::Columns(n)) = child.span
                        && (n == 0 || n > *columns)
                    {
                        return Err(SchemaError::new(
                            join(prefix, &child.name),
                            format!("span {} does not fit a {}-column group", n, columns),
                        ));
                    }
                }
                // group children share the parent's value scope
                check_fields(children, prefix, seen)?;
            }
            FieldKind::Repeater { form, .. } => {
                if form.fields.is_empty() {
                    return Err(SchemaError::new(path, "repeater must declare form fields"));
                }
                check_scope(&form.fields, &format!("{}[]", path))?;
            }
            FieldKind::Dropdown { options } if options.is_empty() => {
                return Err(SchemaError::new(path, "dropdown must declare options"));
            }
            FieldKind::Combobox {
                options,
                allow_custom,
            } if options.is_empty() && !allow_custom => {
                return Err(SchemaError::new(
                    path,
                    "combobox must declare options or allow custom values",
                ));
            }
            FieldKind::Slider { min, max, step } if min >= max || *step <= 0.0 => {
                return Err(SchemaError::new(path, "slider range is empty"));
            }
            FieldKind::Number {
                min: Some(min),
                max: Some(max),
                ..
            } if min > max => {
                return Err(SchemaError::new(path, "min must not exceed max"));
            }
            FieldKind::Custom { renderer } if renderer.is_empty() => {
                return Err(SchemaError::new(path, "custom field must name a renderer"));
            }
            _ => {}
        }
    }
    Ok(())
}

fn fill_fields(fields: &[FieldDescriptor], value: &mut Map<String, Value>) {
    for field in fields {
        match &field.kind {
            FieldKind::Group { children, .. } => fill_fields(children, value),
            FieldKind::Repeater { form, .. } => {
                if let Some(default) = &field.default {
                    value
                        .entry(field.name.clone())
                        .or_insert_with(|| default.clone());
                }
                if let Some(Value::Array(items)) = value.get_mut(&field.name) {
                    for item in items.iter_mut() {
                        if let Value::Object(map) = item {
                            fill_fields(&form.fields, map);
                        }
                    }
                }
            }
            _ => {
                if let Some(default) = &field.default {
                    value
                        .entry(field.name.clone())
                        .or_insert_with(|| default.clone());
                }
            }
        }
    }
}

fn override_defaults(fields: &mut [FieldDescriptor], overrides: &Map<String, Value>) {
    for field in fields.iter_mut() {
        if let FieldKind::Group { children, .. } = &mut field.kind {
            override_defaults(children, overrides);
        } else if let Some(value) = overrides.get(&field.name) {
            field.default = Some(value.clone());
        }
    }
}

fn in_options(options: &[SelectOption], value: &Value) -> bool {
    options.iter().any(|o| &o.value == value)
}

fn check_bounds(path: &str, n: f64, min: Option<f64>, max: Option<f64>) -> Result<(), SchemaError> {
    if let Some(min) = min
        && n < min
    {
        return Err(SchemaError::new(path, format!("must be at least {}", min)));
    }
    if let Some(max) = max
        && n > max
    {
        return Err(SchemaError::new(path, format!("must be at most {}", max)));
    }
    Ok(())
}

fn validate_fields(
    fields: &[FieldDescriptor],
    value: &Map<String, Value>,
    prefix: &str,
    ctx: &RenderContext<'_>,
) -> Result<(), SchemaError> {
    for field in fields {
        if let FieldKind::Group { children, .. } = &field.kind {
            validate_fields(children, value, prefix, ctx)?;
            continue;
        }

        let path = join(prefix, &field.name);
        let current = value
            .get(&field.name)
            .filter(|v| !v.is_null() && v.as_str() != Some(""));
        let Some(current) = current else {
            if field.required {
                return Err(SchemaError::new(path, "is required"));
            }
            continue;
        };

        match &field.kind {
            FieldKind::Text { .. } | FieldKind::Textarea { .. } => {
                if !current.is_string() {
                    return Err(SchemaError::new(path, "must be a string"));
                }
            }
            FieldKind::Number { min, max, .. } => {
                let n = current
                    .as_f64()
                    .ok_or_else(|| SchemaError::new(&path, "must be a number"))?;
                check_bounds(&path, n, *min, *max)?;
            }
            FieldKind::Slider { min, max, .. } => {
                let n = current
                    .as_f64()
                    .ok_or_else(|| SchemaError::new(&path, "must be a number"))?;
                check_bounds(&path, n, Some(*min), Some(*max))?;
            }
            FieldKind::Checkbox | FieldKind::Switch => {
                if !current.is_boolean() {
                    return Err(SchemaError::new(path, "must be a boolean"));
                }
            }
            FieldKind::Dropdown { options } => {
                if !in_options(options, current) {
                    return Err(SchemaError::new(path, "must be one of the declared options"));
                }
            }
            FieldKind::Combobox {
                options,
                allow_custom,
            } => {
                if !allow_custom && !in_options(options, current) {
                    return Err(SchemaError::new(path, "must be one of the declared options"));
                }
            }
            FieldKind::Repeater { form, .. } => {
                let items = current
                    .as_array()
                    .ok_or_else(|| SchemaError::new(&path, "must be an array"))?;
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, index);
                    let object = item
                        .as_object()
                        .ok_or_else(|| SchemaError::new(&item_path, "must be an object"))?;
                    validate_fields(&form.fields, object, &item_path, ctx)?;
                }
            }
            FieldKind::Custom { renderer } => {
                if let Some(custom) = ctx.customs.get(renderer) {
                    custom
                        .validate(current, ctx)
                        .map_err(|message| SchemaError::new(&path, message))?;
                }
            }
            FieldKind::Group { .. } => {}
        }
    }
    Ok(())
}

/// Pure operations over repeater values; each returns a new list
pub mod repeater {
    use serde_json::{Map, Value};

    use super::{FieldDescriptor, SchemaError, fill_fields};

    /// Append a fresh element populated with the sub-form defaults
    pub fn append(items: &[Value], fields: &[FieldDescriptor]) -> Vec<Value> {
        let mut item = Map::new();
        fill_fields(fields, &mut item);
        let mut next = items.to_vec();
        next.push(Value::Object(item));
        next
    }

    pub fn remove(items: &[Value], index: usize) -> Result<Vec<Value>, SchemaError> {
        if index >= items.len() {
            return Err(out_of_range(index, items.len()));
        }
        let mut next = items.to_vec();
        next.remove(index);
        Ok(next)
    }

    pub fn swap(items: &[Value], a: usize, b: usize) -> Result<Vec<Value>, SchemaError> {
        let len = items.len();
        if a >= len || b >= len {
            return Err(out_of_range(a.max(b), len));
        }
        let mut next = items.to_vec();
        next.swap(a, b);
        Ok(next)
    }

    fn out_of_range(index: usize, len: usize) -> SchemaError {
        SchemaError::new(
            format!("[{}]", index),
            format!("index out of range for {} items", len),
        )
    }
}
