//! Panelkit API - wire models shared by the renderer and the HTTP server
//!
//! Every persisted configuration document is defined here together with the
//! request bodies that mutate it and their validation rules.

pub mod list;
pub mod page;
pub mod resource;
pub mod show;
pub mod sidebar;
pub mod validation;

pub use list::{
    ColumnConfig, ColumnKind, FilterConfig, FilterKind, FilterOperator, ListConfig,
    ListConfigPatch, ListMeta, SelectOption,
};
pub use page::{BlockInstance, LegacyListDocument, PageConfig, PageType, PatchPageRequest};
pub use resource::{CreateResourceRequest, HttpMethod, Resource, UpdateResourceRequest};
pub use show::{ShowConfig, ShowConfigPatch, ShowGroup, ShowItem, ShowItemKind, ShowTab};
pub use sidebar::{SidebarConfig, SidebarGroup, SidebarItem};
pub use validation::{Check, first_validation_message};
