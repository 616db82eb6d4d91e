//! Error types and error codes for Panelkit
//!
//! This module defines:
//! - `PanelError`: Application-specific error enum
//! - `ErrorCode`: Structured error codes for API responses

use serde::{Deserialize, Serialize};

use crate::UnitKind;

/// Application-specific error types
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// Stored configuration absent
    #[error("{0} not found")]
    NotFound(String),

    /// Submitted configuration failed validation; carries the first message only
    #[error("validation failed: {0}")]
    Validation(String),

    /// A slug has no registered definition for its kind
    #[error("unknown {kind} type '{slug}'")]
    UnresolvedUnit { kind: UnitKind, slug: String },

    /// Network failure talking to an upstream service
    #[error("transport error: {0}")]
    Transport(String),

    /// Unique constraint violated
    #[error("{0}")]
    Duplicate(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl PanelError {
    pub fn validation(message: impl Into<String>) -> Self {
        PanelError::Validation(message.into())
    }

    pub fn unresolved(kind: UnitKind, slug: impl Into<String>) -> Self {
        PanelError::UnresolvedUnit {
            kind,
            slug: slug.into(),
        }
    }

    /// Error code reported to API callers
    pub fn error_code(&self) -> ErrorCode<'static> {
        match self {
            PanelError::NotFound(_) => RESOURCE_NOT_FOUND,
            PanelError::Validation(_) => PARAMETER_VALIDATE_ERROR,
            PanelError::UnresolvedUnit { .. } => UNRESOLVED_UNIT,
            PanelError::Transport(_) => UPSTREAM_ERROR,
            PanelError::Duplicate(_) => RESOURCE_CONFLICT,
            PanelError::Storage(_) => DATA_ACCESS_ERROR,
            PanelError::Internal(_) => SERVER_ERROR,
        }
    }

    /// HTTP status matching this error
    pub fn http_status(&self) -> u16 {
        match self {
            PanelError::NotFound(_) => 404,
            PanelError::Validation(_) | PanelError::UnresolvedUnit { .. } => 400,
            PanelError::Transport(_) => 502,
            PanelError::Duplicate(_) => 409,
            PanelError::Storage(_) | PanelError::Internal(_) => 500,
        }
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const DATA_ACCESS_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "data access error",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};

pub const UNRESOLVED_UNIT: ErrorCode<'static> = ErrorCode {
    code: 21000,
    message: "unresolved unit",
};

pub const UPSTREAM_ERROR: ErrorCode<'static> = ErrorCode {
    code: 23000,
    message: "upstream error",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};
