//! Sidebar navigation document (single document, fixed id)

use panelkit_common::{PanelError, SIDEBAR_ID};
use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::validation::{Check, ensure_unique_ids};

/// Sidebar entry. Group items may nest one level; nested groups are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    #[serde(rename_all = "camelCase")]
    Resource {
        id: String,
        resource: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Link {
        id: String,
        label: String,
        href: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        #[serde(default)]
        external: bool,
    },
    #[serde(rename_all = "camelCase")]
    Group {
        id: String,
        label: String,
        #[serde(default)]
        items: Vec<SidebarItem>,
    },
}

impl SidebarItem {
    pub fn id(&self) -> &str {
        match self {
            SidebarItem::Resource { id, .. }
            | SidebarItem::Link { id, .. }
            | SidebarItem::Group { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarGroup {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarConfig {
    #[serde(default = "sidebar_id")]
    pub id: String,
    #[serde(default)]
    pub groups: Vec<SidebarGroup>,
}

fn sidebar_id() -> String {
    SIDEBAR_ID.to_string()
}

impl SidebarConfig {
    /// One `resources` group listing every resource, ordered by label
    pub fn from_resources(resources: &[Resource]) -> Self {
        let mut sorted: Vec<&Resource> = resources.iter().collect();
        sorted.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.name.cmp(&b.name)));

        let items = sorted
            .into_iter()
            .map(|r| SidebarItem::Resource {
                id: format!("resource-{}", r.name),
                resource: r.name.clone(),
                label: Some(r.label.clone()),
                icon: None,
            })
            .collect();

        Self {
            id: sidebar_id(),
            groups: vec![SidebarGroup {
                id: "resources".to_string(),
                title: Some("Resources".to_string()),
                max_items: None,
                items,
            }],
        }
    }
}

impl Check for SidebarConfig {
    fn check(&self) -> Result<(), PanelError> {
        ensure_unique_ids("groups", self.groups.iter().map(|g| g.id.as_str()))?;
        for (g, group) in self.groups.iter().enumerate() {
            if group.max_items == Some(0) {
                return Err(PanelError::validation(format!(
                    "groups[{}].maxItems: must be at least 1",
                    g
                )));
            }
            let scope = format!("groups[{}].items", g);
            check_items(&scope, &group.items, true)?;
        }
        Ok(())
    }
}

fn check_items(scope: &str, items: &[SidebarItem], allow_groups: bool) -> Result<(), PanelError> {
    ensure_unique_ids(scope, items.iter().map(SidebarItem::id))?;
    for (idx, item) in items.iter().enumerate() {
        match item {
            SidebarItem::Resource { resource, .. } if resource.is_empty() => {
                return Err(PanelError::validation(format!(
                    "{}[{}].resource: must not be empty",
                    scope, idx
                )));
            }
            SidebarItem::Link { href, .. } if href.is_empty() => {
                return Err(PanelError::validation(format!(
                    "{}[{}].href: must not be empty",
                    scope, idx
                )));
            }
            SidebarItem::Group { items, .. } => {
                if !allow_groups {
                    return Err(PanelError::validation(format!(
                        "{}[{}]: groups may only nest one level",
                        scope, idx
                    )));
                }
                check_items(&format!("{}[{}].items", scope, idx), items, false)?;
            }
            _ => {}
        }
    }
    Ok(())
}
