//! Business logic behind the HTTP handlers
//!
//! Every function takes the shared [`AppState`](crate::model::AppState) and
//! returns `anyhow::Result`; domain failures travel as `PanelError`.

pub mod list;
pub mod page;
pub mod render;
pub mod resource;
pub mod show;
pub mod sidebar;
