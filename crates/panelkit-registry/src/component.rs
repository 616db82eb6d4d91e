//! Renderable half of a unit definition

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Map, Value};

use panelkit_common::UnitKind;

use crate::registry::Registry;
use crate::schema::FieldDescriptor;
use crate::view::{View, placeholder};

/// Everything a component needs besides its own props
pub struct RenderContext<'a> {
    pub registry: &'a Registry,
    pub customs: &'a CustomRenderers,
    pub edit_mode: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(registry: &'a Registry, customs: &'a CustomRenderers) -> Self {
        Self {
            registry,
            customs,
            edit_mode: false,
        }
    }

    pub fn with_edit_mode(mut self, edit_mode: bool) -> Self {
        self.edit_mode = edit_mode;
        self
    }

    /// Resolve and render a nested unit, merging `config` over the unit's
    /// schema defaults. Unknown slugs render as a placeholder.
    pub fn render_unit(
        &self,
        kind: UnitKind,
        slug: &str,
        config: &Map<String, Value>,
        runtime: Map<String, Value>,
    ) -> View {
        match self.registry.get(kind, slug) {
            Some(definition) => {
                let props = Props {
                    config: definition.schema.merged(config),
                    runtime,
                    ..Default::default()
                };
                definition.render(&props, self)
            }
            None => placeholder(kind, slug),
        }
    }
}

/// Look up a dotted path (`address.city`) inside a JSON value
pub fn value_at<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    if let Some(direct) = value.get(path) {
        return Some(direct);
    }
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// Props handed to a component.
///
/// `config` is the persisted configuration merged over schema defaults.
/// `runtime` carries values computed by the hosting page (records, totals,
/// current filter values) and is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    pub config: Map<String, Value>,
    pub labels: BTreeMap<String, String>,
    pub runtime: Map<String, Value>,
    pub children: Vec<View>,
}

impl Props {
    pub fn from_config(config: Map<String, Value>) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_runtime(mut self, key: &str, value: Value) -> Self {
        self.runtime.insert(key.to_string(), value);
        self
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.config.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.config.get(key).and_then(Value::as_f64)
    }

    pub fn array(&self, key: &str) -> &[Value] {
        self.config
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn runtime(&self, key: &str) -> Option<&Value> {
        self.runtime.get(key).filter(|v| !v.is_null())
    }

    pub fn runtime_str(&self, key: &str) -> Option<&str> {
        self.runtime(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    pub fn runtime_u64(&self, key: &str) -> Option<u64> {
        self.runtime(key).and_then(Value::as_u64)
    }

    /// Label override, or the supplied fallback
    pub fn label<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.labels.get(key).map(String::as_str).unwrap_or(fallback)
    }
}

pub trait Component: Send + Sync {
    fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> View;
}

impl<F> Component for F
where
    F: Fn(&Props, &RenderContext<'_>) -> View + Send + Sync,
{
    fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> View {
        self(props, ctx)
    }
}

pub type ComponentRef = Arc<dyn Component>;

/// Pointer identity of two component references
pub fn same_component(a: &ComponentRef, b: &ComponentRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Field editor supplied by the caller for `custom` schema fields.
///
/// `path` identifies where the edited value is written back, and is emitted
/// as the `data-bind` attribute of the rendered control.
pub trait CustomRenderer: Send + Sync {
    fn render(
        &self,
        value: Option<&Value>,
        path: &str,
        field: &FieldDescriptor,
        ctx: &RenderContext<'_>,
    ) -> View;

    fn validate(&self, _value: &Value, _ctx: &RenderContext<'_>) -> Result<(), String> {
        Ok(())
    }
}

pub type CustomRenderers = HashMap<String, Arc<dyn CustomRenderer>>;
