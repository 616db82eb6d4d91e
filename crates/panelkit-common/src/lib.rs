//! Panelkit Common - Shared error types and utilities
//!
//! This crate provides the foundational types used across all Panelkit components:
//! - Error taxonomy and error codes
//! - Identifier validation and generation helpers
//! - Common constants

pub mod error;
pub mod utils;

// Re-exports for convenience
pub use error::{ErrorCode, PanelError};
pub use utils::{generate_id, is_kebab_case, is_valid_id};

/// Fixed id of the single sidebar document
pub const SIDEBAR_ID: &str = "sidebar";

/// Default page size used by pagination blocks
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Default page size choices offered by pagination blocks
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u64; 4] = [10, 25, 50, 100];

/// Unit kinds held by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    Block,
    Column,
    Filter,
    FieldType,
}

impl UnitKind {
    pub const ALL: [UnitKind; 4] = [
        UnitKind::Block,
        UnitKind::Column,
        UnitKind::Filter,
        UnitKind::FieldType,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Block => "block",
            UnitKind::Column => "column",
            UnitKind::Filter => "filter",
            UnitKind::FieldType => "field-type",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(UnitKind::Block),
            "column" => Ok(UnitKind::Column),
            "filter" => Ok(UnitKind::Filter),
            "field-type" | "field" => Ok(UnitKind::FieldType),
            _ => Err(format!("Invalid unit kind: {}", s)),
        }
    }
}

impl serde::Serialize for UnitKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for UnitKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
