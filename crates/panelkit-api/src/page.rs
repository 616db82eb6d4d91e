//! Page configuration models
//!
//! A page is an ordered list of block instances. Storage order is insertion
//! order; render order is `order` ascending over visible blocks.

use std::collections::BTreeMap;

use panelkit_common::PanelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::validation::{Check, ensure_unique_ids};

/// Page types a resource can be configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    #[default]
    List,
    Show,
    Edit,
    Create,
}

impl PageType {
    pub const ALL: [PageType; 4] = [
        PageType::List,
        PageType::Show,
        PageType::Edit,
        PageType::Create,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageType::List => "list",
            PageType::Show => "show",
            PageType::Edit => "edit",
            PageType::Create => "create",
        }
    }

    /// Show pages live in their own storage partition
    pub fn is_show(self) -> bool {
        matches!(self, PageType::Show)
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(PageType::List),
            "show" => Ok(PageType::Show),
            "edit" => Ok(PageType::Edit),
            "create" => Ok(PageType::Create),
            _ => Err(format!("Invalid page type: {}", s)),
        }
    }
}

/// One configured block on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInstance {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Number>,
}

impl BlockInstance {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, config: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            config,
            labels: None,
            visible: None,
            order: None,
        }
    }

    pub fn with_order(mut self, order: impl Into<Number>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Missing `visible` counts as visible
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }

    /// Missing `order` counts as 0; the stored number is kept as written
    pub fn order_key(&self) -> f64 {
        self.order.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }
}

/// Persisted page document; `id` is `None` until first saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub id: Option<String>,
    pub resource_id: String,
    pub blocks: Vec<BlockInstance>,
}

impl PageConfig {
    pub fn unsaved(resource_id: impl Into<String>, blocks: Vec<BlockInstance>) -> Self {
        Self {
            id: None,
            resource_id: resource_id.into(),
            blocks,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn block(&self, block_id: &str) -> Option<&BlockInstance> {
        self.blocks.iter().find(|b| b.id == block_id)
    }
}

/// Body of `PATCH /config/pages/{resourceId}`; replaces the whole blocks array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchPageRequest {
    pub blocks: Vec<BlockInstance>,
}

impl Check for PatchPageRequest {
    fn check(&self) -> Result<(), PanelError> {
        ensure_unique_ids("blocks", self.blocks.iter().map(|b| b.id.as_str()))?;
        for (idx, block) in self.blocks.iter().enumerate() {
            if block.slug.trim().is_empty() {
                return Err(PanelError::validation(format!(
                    "blocks[{}].slug: must not be empty",
                    idx
                )));
            }
            if let Some(order) = &block.order
                && !order.as_f64().is_some_and(f64::is_finite)
            {
                return Err(PanelError::validation(format!(
                    "blocks[{}].order: must be a finite number",
                    idx
                )));
            }
        }
        Ok(())
    }
}

/// Flat list-page document predating the block model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyListDocument {
    #[serde(default)]
    pub meta: Option<LegacyMeta>,
    #[serde(default)]
    pub columns: Vec<Map<String, Value>>,
    #[serde(default)]
    pub filters: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
