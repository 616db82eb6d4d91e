//! Block renderer
//!
//! Visible blocks are stable-sorted by `order` and resolved one by one
//! against the block registry. A block whose slug does not resolve renders
//! as a placeholder; its siblings are unaffected.

use std::collections::HashMap;

use panelkit_api::BlockInstance;
use panelkit_common::{PanelError, UnitKind};
use panelkit_registry::{Props, RenderContext, View, el, placeholder};
use serde_json::{Map, Value};

/// Caller-supplied runtime props.
///
/// `shared` reaches every block; `by_slug` is keyed by block slug and wins
/// over `shared`. Neither is ever merged into persisted config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeProps {
    pub shared: Map<String, Value>,
    pub by_slug: HashMap<String, Map<String, Value>>,
}

impl RuntimeProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(mut self, key: &str, value: Value) -> Self {
        self.shared.insert(key.to_string(), value);
        self
    }

    pub fn for_slug(mut self, slug: &str, key: &str, value: Value) -> Self {
        self.by_slug
            .entry(slug.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self
    }

    /// Runtime props seen by a block with the given slug
    pub fn for_block(&self, slug: &str) -> Map<String, Value> {
        let mut runtime = self.shared.clone();
        if let Some(specific) = self.by_slug.get(slug) {
            runtime.extend(specific.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        runtime
    }
}

/// Visible blocks in render order; ties keep their stored order
pub fn visible_ordered(blocks: &[BlockInstance]) -> Vec<&BlockInstance> {
    let mut visible: Vec<&BlockInstance> = blocks.iter().filter(|b| b.is_visible()).collect();
    visible.sort_by(|a, b| a.order_key().total_cmp(&b.order_key()));
    visible
}

/// Check a block's slug and config before it is persisted
pub fn validate_block_config(
    ctx: &RenderContext<'_>,
    slug: &str,
    config: &Map<String, Value>,
) -> Result<(), PanelError> {
    let definition = ctx.registry.resolve(UnitKind::Block, slug)?;
    definition
        .schema
        .validate(config, ctx)
        .map_err(PanelError::from)
}

pub fn render_block(block: &BlockInstance, ctx: &RenderContext<'_>, runtime: &RuntimeProps) -> View {
    let body = match ctx.registry.get(UnitKind::Block, &block.slug) {
        Some(definition) => {
            let props = Props {
                config: definition.schema.merged(&block.config),
                labels: block.labels.clone().unwrap_or_default(),
                runtime: runtime.for_block(&block.slug),
                children: Vec::new(),
            };
            definition.render(&props, ctx)
        }
        None => placeholder(UnitKind::Block, &block.slug),
    };

    let wrapper = el("div")
        .attr("data-block-id", block.id.as_str())
        .attr("data-slug", block.slug.as_str());

    if ctx.edit_mode {
        wrapper
            .attr("class", "block block--selectable")
            .attr("role", "button")
            .attr("tabindex", "0")
            .attr("data-action", "open-editor")
            .attr("aria-label", format!("Configure {}", block.slug))
            .child(body)
            .into()
    } else {
        wrapper.attr("class", "block").child(body).into()
    }
}

/// Render every visible block of a page in order
pub fn render_page(blocks: &[BlockInstance], ctx: &RenderContext<'_>, runtime: &RuntimeProps) -> View {
    el("div")
        .attr("class", "page")
        .attr("data-edit-mode", ctx.edit_mode.to_string())
        .children(
            visible_ordered(blocks)
                .into_iter()
                .map(|block| render_block(block, ctx, runtime)),
        )
        .into()
}
