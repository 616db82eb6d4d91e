//! Panelkit Page - from stored configuration to rendered, editable pages
//!
//! This crate provides:
//! - `resolver`: normalizes stored (block or legacy) documents into a `PageConfig`
//! - `renderer`: resolves blocks against the registry and renders them in order
//! - `session`: per-page edit-mode state with stale-result guards and optimistic saves
//! - `editor`: column/filter editing operations and the custom schema renderers

pub mod editor;
pub mod renderer;
pub mod resolver;
pub mod session;

pub use editor::{ColumnDraft, FilterDraft, custom_renderers};
pub use renderer::{RuntimeProps, render_block, render_page, validate_block_config, visible_ordered};
pub use resolver::{
    PageKey, PagePartition, PageSource, ResolvedPage, default_template, legacy_to_blocks,
    resolve_document,
};
pub use session::{
    Activation, EditorForm, LoadState, PageSession, PendingSave, Ticket, replace_block_config,
};
