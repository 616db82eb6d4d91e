//! Unit registry
//!
//! Each unit kind owns two tables. The built-in table is filled once at
//! construction and never changes; the consumer table accepts registrations
//! at any time. Resolution checks the consumer table first so an explicit
//! override can shadow a built-in.

use std::collections::HashMap;
use std::fmt;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use panelkit_common::{PanelError, UnitKind, is_kebab_case};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::component::{ComponentRef, Props, RenderContext, same_component};
use crate::schema::{ConfigSchema, SchemaError};
use crate::view::View;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{kind} '{slug}' is already registered with a different component")]
    ConflictingDefinition { kind: UnitKind, slug: String },

    #[error("'{0}' is not a valid unit slug")]
    InvalidSlug(String),

    #[error("invalid schema for {kind} '{slug}': {source}")]
    InvalidSchema {
        kind: UnitKind,
        slug: String,
        source: SchemaError,
    },

    #[error("unknown built-in {kind} '{component}'")]
    UnknownBase { kind: UnitKind, component: String },
}

impl From<RegistryError> for PanelError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::ConflictingDefinition { .. } => PanelError::Duplicate(e.to_string()),
            _ => PanelError::Validation(e.to_string()),
        }
    }
}

/// Outcome of a successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    /// Same slug with the identical component reference
    Unchanged,
    Overridden,
}

#[derive(Clone)]
pub struct UnitDefinition {
    pub slug: String,
    pub label: String,
    pub description: Option<String>,
    pub schema: ConfigSchema,
    pub component: ComponentRef,
}

impl fmt::Debug for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitDefinition")
            .field("slug", &self.slug)
            .field("label", &self.label)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl UnitDefinition {
    pub fn new(slug: impl Into<String>, label: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            description: None,
            schema: ConfigSchema::default(),
            component,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<ConfigSchema>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> View {
        self.component.render(props, ctx)
    }
}

/// Serializable view of a definition, used by the registry listing API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub kind: UnitKind,
    pub slug: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: ConfigSchema,
    pub builtin: bool,
}

/// Consumer unit declared in configuration: a new slug backed by an
/// existing built-in component, optionally with different defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitExtension {
    pub kind: UnitKind,
    pub slug: String,
    pub component: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub defaults: Map<String, Value>,
    #[serde(default, rename = "override")]
    pub override_existing: bool,
}

#[derive(Default)]
struct UnitTable {
    builtin: HashMap<String, UnitDefinition>,
    consumer: DashMap<String, UnitDefinition>,
}

impl UnitTable {
    fn get(&self, slug: &str) -> Option<UnitDefinition> {
        self.consumer
            .get(slug)
            .map(|d| d.value().clone())
            .or_else(|| self.builtin.get(slug).cloned())
    }
}

#[derive(Default)]
pub struct Registry {
    blocks: UnitTable,
    columns: UnitTable,
    filters: UnitTable,
    field_types: UnitTable,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Registry");
        for kind in UnitKind::ALL {
            let table = self.table(kind);
            s.field(kind.as_str(), &(table.builtin.len() + table.consumer.len()));
        }
        s.finish()
    }
}

impl Registry {
    /// Empty registry with no built-ins
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in block, column, filter and field type
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for (kind, definition) in crate::builtin::definitions() {
            registry
                .table_mut(kind)
                .builtin
                .insert(definition.slug.clone(), definition);
        }
        registry
    }

    fn table(&self, kind: UnitKind) -> &UnitTable {
        match kind {
            UnitKind::Block => &self.blocks,
            UnitKind::Column => &self.columns,
            UnitKind::Filter => &self.filters,
            UnitKind::FieldType => &self.field_types,
        }
    }

    fn table_mut(&mut self, kind: UnitKind) -> &mut UnitTable {
        match kind {
            UnitKind::Block => &mut self.blocks,
            UnitKind::Column => &mut self.columns,
            UnitKind::Filter => &mut self.filters,
            UnitKind::FieldType => &mut self.field_types,
        }
    }

    fn check_definition(kind: UnitKind, definition: &UnitDefinition) -> Result<(), RegistryError> {
        if !is_kebab_case(&definition.slug) {
            return Err(RegistryError::InvalidSlug(definition.slug.clone()));
        }
        definition
            .schema
            .check()
            .map_err(|source| RegistryError::InvalidSchema {
                kind,
                slug: definition.slug.clone(),
                source,
            })
    }

    /// Register a consumer definition.
    ///
    /// Re-registering the identical component under the same slug is a no-op.
    /// A different component under a taken slug, built-in or consumer, is a
    /// conflict; use [`Registry::register_override`] to replace it.
    pub fn register(
        &self,
        kind: UnitKind,
        definition: UnitDefinition,
    ) -> Result<Registration, RegistryError> {
        Self::check_definition(kind, &definition)?;
        let table = self.table(kind);

        if let Some(existing) = table.builtin.get(&definition.slug)
            && !table.consumer.contains_key(&definition.slug)
        {
            return if same_component(&existing.component, &definition.component) {
                Ok(Registration::Unchanged)
            } else {
                Err(RegistryError::ConflictingDefinition {
                    kind,
                    slug: definition.slug,
                })
            };
        }

        match table.consumer.entry(definition.slug.clone()) {
            Entry::Occupied(entry) => {
                if same_component(&entry.get().component, &definition.component) {
                    Ok(Registration::Unchanged)
                } else {
                    Err(RegistryError::ConflictingDefinition {
                        kind,
                        slug: definition.slug,
                    })
                }
            }
            Entry::Vacant(entry) => {
                debug!("Registered {} '{}'", kind, definition.slug);
                entry.insert(definition);
                Ok(Registration::Registered)
            }
        }
    }

    /// Register a definition, replacing or shadowing whatever holds the slug
    pub fn register_override(
        &self,
        kind: UnitKind,
        definition: UnitDefinition,
    ) -> Result<Registration, RegistryError> {
        Self::check_definition(kind, &definition)?;
        let table = self.table(kind);
        let slug = definition.slug.clone();
        let shadows_builtin = table.builtin.contains_key(&slug);
        let replaced = table.consumer.insert(slug.clone(), definition).is_some();

        if replaced || shadows_builtin {
            warn!("Overriding {} '{}'", kind, slug);
            Ok(Registration::Overridden)
        } else {
            debug!("Registered {} '{}'", kind, slug);
            Ok(Registration::Registered)
        }
    }

    /// Remove a consumer definition; built-ins are never removed
    pub fn unregister(&self, kind: UnitKind, slug: &str) -> bool {
        self.table(kind).consumer.remove(slug).is_some()
    }

    pub fn get(&self, kind: UnitKind, slug: &str) -> Option<UnitDefinition> {
        self.table(kind).get(slug)
    }

    pub fn contains(&self, kind: UnitKind, slug: &str) -> bool {
        let table = self.table(kind);
        table.consumer.contains_key(slug) || table.builtin.contains_key(slug)
    }

    pub fn resolve(&self, kind: UnitKind, slug: &str) -> Result<UnitDefinition, PanelError> {
        self.get(kind, slug)
            .ok_or_else(|| PanelError::unresolved(kind, slug))
    }

    /// The built-in definition for a slug, ignoring consumer overrides
    pub fn builtin(&self, kind: UnitKind, slug: &str) -> Option<&UnitDefinition> {
        self.table(kind).builtin.get(slug)
    }

    /// All resolvable definitions of a kind, sorted by slug
    pub fn list(&self, kind: UnitKind) -> Vec<UnitSummary> {
        let table = self.table(kind);
        let mut summaries: Vec<UnitSummary> = table
            .builtin
            .values()
            .filter(|d| !table.consumer.contains_key(&d.slug))
            .map(|d| summarize(kind, d, true))
            .collect();
        summaries.extend(
            table
                .consumer
                .iter()
                .map(|entry| summarize(kind, entry.value(), false)),
        );
        summaries.sort_by(|a, b| a.slug.cmp(&b.slug));
        summaries
    }

    /// Register a configured extension on top of a built-in component
    pub fn apply_extension(&self, extension: &UnitExtension) -> Result<Registration, RegistryError> {
        let kind = extension.kind;
        let base = self
            .builtin(kind, &extension.component)
            .ok_or_else(|| RegistryError::UnknownBase {
                kind,
                component: extension.component.clone(),
            })?;

        let definition = UnitDefinition {
            slug: extension.slug.clone(),
            label: extension.label.clone().unwrap_or_else(|| base.label.clone()),
            description: extension
                .description
                .clone()
                .or_else(|| base.description.clone()),
            schema: base.schema.clone().with_defaults(&extension.defaults),
            component: base.component.clone(),
        };

        if extension.override_existing {
            self.register_override(kind, definition)
        } else {
            self.register(kind, definition)
        }
    }

    /// Apply extensions in order, stopping at the first failure
    pub fn apply_extensions(&self, extensions: &[UnitExtension]) -> Result<usize, RegistryError> {
        for extension in extensions {
            self.apply_extension(extension)?;
        }
        Ok(extensions.len())
    }
}

fn summarize(kind: UnitKind, definition: &UnitDefinition, builtin: bool) -> UnitSummary {
    UnitSummary {
        kind,
        slug: definition.slug.clone(),
        label: definition.label.clone(),
        description: definition.description.clone(),
        schema: definition.schema.clone(),
        builtin,
    }
}
