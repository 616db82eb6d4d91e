//! List page sub-resource configuration: columns, filters and header meta

use panelkit_common::PanelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::validation::{Check, ensure_unique_ids, validate_fields};

/// Column kinds accepted by the list configuration API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Date,
    Number,
    Badge,
    Boolean,
    Json,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 6] = [
        ColumnKind::Text,
        ColumnKind::Date,
        ColumnKind::Number,
        ColumnKind::Badge,
        ColumnKind::Boolean,
        ColumnKind::Json,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Date => "date",
            ColumnKind::Number => "number",
            ColumnKind::Badge => "badge",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Json => "json",
        }
    }
}

impl std::str::FromStr for ColumnKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Invalid column type: {}", s))
    }
}

/// Filter kinds accepted by the list configuration API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Input,
    Select,
    Combobox,
    Checkbox,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Input,
        FilterKind::Select,
        FilterKind::Combobox,
        FilterKind::Checkbox,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Input => "input",
            FilterKind::Select => "select",
            FilterKind::Combobox => "combobox",
            FilterKind::Checkbox => "checkbox",
        }
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Invalid filter type: {}", s))
    }
}

/// Comparison applied by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    #[default]
    Eq,
    Ne,
    Contains,
    StartsWith,
    EndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
}

impl FilterOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::In => "in",
            FilterOperator::Nin => "nin",
        }
    }
}

/// `{label, value}` pair used by dropdowns, selects and badges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// One table column. `type` is a column registry slug; type-specific
/// display options (date format, badge variant, ...) are kept in `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub field: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub kind: String,
    #[serde(default = "default_true")]
    pub enabled_by_default: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// One query filter. `type` is a filter registry slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub field: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub kind: String,
    #[serde(default)]
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Document behind `/config/lists/{resourceId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListConfig {
    pub id: Option<String>,
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
    #[serde(default)]
    #[validate(nested)]
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    #[validate(nested)]
    pub filters: Vec<FilterConfig>,
}

impl ListConfig {
    pub fn empty(resource_id: impl Into<String>) -> Self {
        Self {
            id: None,
            resource_id: resource_id.into(),
            meta: None,
            columns: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl Check for ListConfig {
    fn check(&self) -> Result<(), PanelError> {
        validate_fields(self)?;
        check_columns(&self.columns)?;
        check_filters(&self.filters)
    }
}

/// Body of `PATCH /config/lists/{resourceId}`; present fields replace stored ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterConfig>>,
}

impl ListConfigPatch {
    pub fn apply_to(self, config: &mut ListConfig) {
        if let Some(meta) = self.meta {
            config.meta = Some(meta);
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(filters) = self.filters {
            config.filters = filters;
        }
    }
}

fn check_columns(columns: &[ColumnConfig]) -> Result<(), PanelError> {
    ensure_unique_ids("columns", columns.iter().map(|c| c.id.as_str()))?;
    for (idx, column) in columns.iter().enumerate() {
        if column.kind.parse::<ColumnKind>().is_err() {
            return Err(PanelError::validation(format!(
                "columns[{}].type: '{}' is not one of text, date, number, badge, boolean, json",
                idx, column.kind
            )));
        }
    }
    Ok(())
}

fn check_filters(filters: &[FilterConfig]) -> Result<(), PanelError> {
    ensure_unique_ids("filters", filters.iter().map(|f| f.id.as_str()))?;
    for (idx, filter) in filters.iter().enumerate() {
        if filter.kind.parse::<FilterKind>().is_err() {
            return Err(PanelError::validation(format!(
                "filters[{}].type: '{}' is not one of input, select, combobox, checkbox",
                idx, filter.kind
            )));
        }
    }
    Ok(())
}
