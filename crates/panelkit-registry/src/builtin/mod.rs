//! Built-in units
//!
//! Every built-in slug is a variant of a closed enum per kind, so the set
//! shipped with the crate is checked exhaustively when definitions are built.

mod blocks;
mod columns;
mod fields;
mod filters;

use panelkit_common::UnitKind;
use serde_json::Value;

use crate::registry::UnitDefinition;

pub use columns::format_date;

macro_rules! builtin_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $slug:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $slug),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| format!("Invalid built-in {}: {}", $kind, s))
            }
        }
    };
}

builtin_enum!(
    /// Built-in page blocks
    BuiltinBlock, "block" {
        ListHeader => "list-header",
        ListFilters => "list-filters",
        ListTable => "list-table",
        ListPagination => "list-pagination",
        ShowHeader => "show-header",
        ShowContent => "show-content",
        Tabs => "tabs",
        Grid => "grid",
    }
);

builtin_enum!(
    /// Built-in table cell renderers
    BuiltinColumn, "column" {
        Text => "text",
        Number => "number",
        Date => "date",
        Boolean => "boolean",
        Badge => "badge",
        Json => "json",
    }
);

builtin_enum!(
    /// Built-in list filter controls
    BuiltinFilter, "filter" {
        Input => "input",
        Select => "select",
        Combobox => "combobox",
        Checkbox => "checkbox",
    }
);

builtin_enum!(
    /// Built-in configuration form controls
    BuiltinField, "field type" {
        Text => "text",
        Textarea => "textarea",
        Number => "number",
        Dropdown => "dropdown",
        Combobox => "combobox",
        Checkbox => "checkbox",
        Switch => "switch",
        Slider => "slider",
        Repeater => "repeater",
    }
);

/// Every built-in definition, each with its own component instance
pub(crate) fn definitions() -> Vec<(UnitKind, UnitDefinition)> {
    let blocks = BuiltinBlock::ALL
        .iter()
        .map(|b| (UnitKind::Block, b.definition()));
    let columns = BuiltinColumn::ALL
        .iter()
        .map(|c| (UnitKind::Column, c.definition()));
    let filters = BuiltinFilter::ALL
        .iter()
        .map(|f| (UnitKind::Filter, f.definition()));
    let fields = BuiltinField::ALL
        .iter()
        .map(|f| (UnitKind::FieldType, f.definition()));
    blocks.chain(columns).chain(filters).chain(fields).collect()
}

/// Plain-text rendering of an arbitrary JSON value
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn option_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}
