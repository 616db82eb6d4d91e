//! Show page layout configuration: `tabs[].groups[].items[]`

use panelkit_common::PanelError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{Check, ensure_unique_ids, validate_fields};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowItemKind {
    Number,
    Date,
    #[default]
    Text,
    Richtext,
}

fn default_colspan() -> u8 {
    1
}

fn default_group_columns() -> u8 {
    2
}

/// A single record field displayed in a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShowItem {
    pub id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub field: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: ShowItemKind,
    #[serde(default = "default_colspan")]
    #[validate(range(min = 1, max = 12, message = "must be between 1 and 12"))]
    pub colspan: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShowGroup {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default = "default_group_columns")]
    #[validate(range(min = 1, max = 8, message = "must be between 1 and 8"))]
    pub columns: u8,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<ShowItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShowTab {
    pub id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub label: String,
    #[serde(default)]
    #[validate(nested)]
    pub groups: Vec<ShowGroup>,
}

/// Document behind `/config/show/{resourceId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShowConfig {
    pub id: Option<String>,
    pub resource_id: String,
    #[serde(default)]
    #[validate(nested)]
    pub tabs: Vec<ShowTab>,
}

impl ShowConfig {
    pub fn empty(resource_id: impl Into<String>) -> Self {
        Self {
            id: None,
            resource_id: resource_id.into(),
            tabs: Vec::new(),
        }
    }
}

impl Check for ShowConfig {
    fn check(&self) -> Result<(), PanelError> {
        validate_fields(self)?;
        ensure_unique_ids("tabs", self.tabs.iter().map(|t| t.id.as_str()))?;
        for (t, tab) in self.tabs.iter().enumerate() {
            let scope = format!("tabs[{}].groups", t);
            ensure_unique_ids(&scope, tab.groups.iter().map(|g| g.id.as_str()))?;
            for (g, group) in tab.groups.iter().enumerate() {
                let scope = format!("tabs[{}].groups[{}].items", t, g);
                ensure_unique_ids(&scope, group.items.iter().map(|i| i.id.as_str()))?;
            }
        }
        Ok(())
    }
}

/// Body of `PATCH /config/show/{resourceId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowConfigPatch {
    pub tabs: Vec<ShowTab>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: serde_json::Value) -> ShowConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = config(json!({
            "id": null,
            "resourceId": "posts",
            "tabs": [{"id": "t1", "label": "General", "groups": [
                {"id": "g1", "items": [{"id": "i1", "field": "title"}]}
            ]}]
        }));
        let group = &cfg.tabs[0].groups[0];
        assert_eq!(group.columns, 2);
        assert_eq!(group.items[0].colspan, 1);
        assert_eq!(group.items[0].kind, ShowItemKind::Text);
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn test_colspan_out_of_range() {
        let cfg = config(json!({
            "id": null,
            "resourceId": "posts",
            "tabs": [{"id": "t1", "label": "General", "groups": [
                {"id": "g1", "columns": 3, "items": [{"id": "i1", "field": "body", "type": "richtext", "colspan": 13}]}
            ]}]
        }));
        assert_eq!(
            cfg.check().unwrap_err(),
            PanelError::validation("tabs[0].groups[0].items[0].colspan: must be between 1 and 12")
        );
    }

    #[test]
    fn test_group_columns_out_of_range() {
        let cfg = config(json!({
            "id": null,
            "resourceId": "posts",
            "tabs": [{"id": "t1", "label": "General", "groups": [{"id": "g1", "columns": 9}]}]
        }));
        assert!(cfg.check().unwrap_err().to_string().contains("columns"));
    }

    #[test]
    fn test_unknown_item_type_is_rejected_by_shape() {
        let parsed: Result<ShowConfig, _> = serde_json::from_value(json!({
            "id": null,
            "resourceId": "posts",
            "tabs": [{"id": "t1", "label": "General", "groups": [
                {"id": "g1", "items": [{"id": "i1", "field": "x", "type": "image"}]}
            ]}]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_duplicate_item_ids() {
        let cfg = config(json!({
            "id": null,
            "resourceId": "posts",
            "tabs": [{"id": "t1", "label": "General", "groups": [
                {"id": "g1", "items": [{"id": "i1", "field": "a"}, {"id": "i1", "field": "b"}]}
            ]}]
        }));
        assert!(cfg.check().unwrap_err().to_string().contains("duplicate id 'i1'"));
    }
}
