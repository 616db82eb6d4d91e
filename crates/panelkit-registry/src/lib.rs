//! Panelkit Registry - pluggable unit types and their configuration schemas
//!
//! This crate provides:
//! - `View`: the serializable output tree every component renders into
//! - `Component`: the renderable half of a unit definition
//! - `ConfigSchema`: the recursive field-descriptor language describing a unit's config
//! - `Registry`: the `(kind, slug) -> UnitDefinition` store with built-in and consumer tables
//! - Built-in blocks, columns, filters and field types
//! - Form rendering of a schema for the configuration editor

pub mod builtin;
pub mod component;
pub mod form;
pub mod registry;
pub mod schema;
pub mod view;

pub use builtin::{BuiltinBlock, BuiltinColumn, BuiltinField, BuiltinFilter};
pub use component::{Component, ComponentRef, CustomRenderer, CustomRenderers, Props, RenderContext};
pub use form::render_form;
pub use registry::{Registration, Registry, RegistryError, UnitDefinition, UnitExtension, UnitSummary};
pub use schema::{ConfigSchema, FieldDescriptor, FieldKind, SchemaError, Span, SpanKeyword};
pub use view::{Element, View, el, placeholder, text};

pub use panelkit_common::UnitKind;
