//! Edit session for one page view
//!
//! A `PageSession` is the explicit per-page context: which page is shown,
//! whether it has loaded, and whether edit mode is on. Asynchronous work is
//! modelled with tickets stamped by a generation counter; completing a
//! ticket issued before the last navigation is a no-op, so late results
//! never land on the wrong page.

use std::collections::BTreeMap;

use panelkit_api::{BlockInstance, PageConfig, PageType};
use panelkit_common::{PanelError, UnitKind};
use panelkit_registry::{ConfigSchema, RenderContext, View, el, render_form};
use serde_json::{Map, Value};
use tracing::debug;

use crate::renderer::{RuntimeProps, render_page, validate_block_config};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Result of activating a block surface
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Edit mode is off; the block keeps its normal behaviour
    DefaultAction { block_id: String },
    OpenEditor(EditorForm),
}

/// Configuration editor for one block, pre-filled with its current config
#[derive(Debug, Clone, PartialEq)]
pub struct EditorForm {
    pub block_id: String,
    pub slug: String,
    pub title: String,
    pub schema: ConfigSchema,
    pub value: Map<String, Value>,
    pub labels: BTreeMap<String, String>,
}

impl EditorForm {
    pub fn view(&self, ctx: &RenderContext<'_>) -> View {
        el("div")
            .attr("class", "block-editor")
            .attr("role", "dialog")
            .attr("data-block-id", self.block_id.as_str())
            .child(el("h2").text(self.title.as_str()))
            .child(render_form(&self.schema, &self.value, ctx))
            .child(
                el("div")
                    .attr("class", "block-editor__actions")
                    .child(el("button").attr("type", "button").attr("data-action", "cancel").text("Cancel"))
                    .child(el("button").attr("type", "submit").attr("data-action", "save").text("Save")),
            )
            .into()
    }
}

/// An optimistic block save awaiting its storage write
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub ticket: Ticket,
    pub block_id: String,
    previous: Map<String, Value>,
    applied: Map<String, Value>,
    /// Full blocks array to persist
    pub blocks: Vec<BlockInstance>,
}

/// Replace one block's config wholesale, returning the new blocks array
pub fn replace_block_config(
    blocks: &[BlockInstance],
    block_id: &str,
    config: Map<String, Value>,
) -> Result<Vec<BlockInstance>, PanelError> {
    let index = blocks
        .iter()
        .position(|b| b.id == block_id)
        .ok_or_else(|| PanelError::NotFound(format!("block '{}'", block_id)))?;
    let mut next = blocks.to_vec();
    next[index].config = config;
    Ok(next)
}

#[derive(Debug, Clone)]
pub struct PageSession {
    resource_id: String,
    page_type: PageType,
    state: LoadState,
    edit_mode: bool,
    generation: u64,
    page: Option<PageConfig>,
}

impl PageSession {
    pub fn new(resource_id: impl Into<String>, page_type: PageType) -> Self {
        Self {
            resource_id: resource_id.into(),
            page_type,
            state: LoadState::Loading,
            edit_mode: false,
            generation: 0,
            page: None,
        }
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn page_type(&self) -> PageType {
        self.page_type
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn page(&self) -> Option<&PageConfig> {
        self.page.as_ref()
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    fn ready_page(&self) -> Result<&PageConfig, PanelError> {
        match (&self.state, &self.page) {
            (LoadState::Ready, Some(page)) => Ok(page),
            (LoadState::Error(message), _) => Err(PanelError::Transport(message.clone())),
            _ => Err(PanelError::validation("page is still loading")),
        }
    }

    /// Switch to another page. Outstanding tickets become stale and edit
    /// mode resets.
    pub fn navigate(&mut self, resource_id: impl Into<String>, page_type: PageType) {
        self.resource_id = resource_id.into();
        self.page_type = page_type;
        self.generation += 1;
        self.edit_mode = false;
        self.state = LoadState::Loading;
        self.page = None;
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.state = LoadState::Loading;
        self.ticket()
    }

    /// Apply a fetch result; returns false when the ticket is stale
    pub fn complete_fetch(&mut self, ticket: Ticket, result: Result<PageConfig, PanelError>) -> bool {
        if !self.is_current(ticket) {
            debug!("Discarding stale page fetch for '{}'", self.resource_id);
            return false;
        }
        match result {
            Ok(page) => {
                self.page = Some(page);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                self.page = None;
                self.state = LoadState::Error(e.to_string());
            }
        }
        true
    }

    /// Flip edit mode; refused until the page is ready
    pub fn toggle_edit_mode(&mut self) -> Result<bool, PanelError> {
        self.ready_page()?;
        self.edit_mode = !self.edit_mode;
        Ok(self.edit_mode)
    }

    pub fn activate(&self, block_id: &str, ctx: &RenderContext<'_>) -> Result<Activation, PanelError> {
        let page = self.ready_page()?;
        let block = page
            .block(block_id)
            .ok_or_else(|| PanelError::NotFound(format!("block '{}'", block_id)))?;

        if !self.edit_mode {
            return Ok(Activation::DefaultAction {
                block_id: block.id.clone(),
            });
        }

        let definition = ctx.registry.resolve(UnitKind::Block, &block.slug)?;
        Ok(Activation::OpenEditor(EditorForm {
            block_id: block.id.clone(),
            slug: block.slug.clone(),
            title: definition.label.clone(),
            value: definition.schema.merged(&block.config),
            schema: definition.schema,
            labels: block.labels.clone().unwrap_or_default(),
        }))
    }

    /// Validate and optimistically apply a block's new config.
    ///
    /// The returned `PendingSave` carries the full blocks array to persist;
    /// hand it back to [`PageSession::complete_save`] with the write result.
    pub fn save_block(
        &mut self,
        block_id: &str,
        config: Map<String, Value>,
        ctx: &RenderContext<'_>,
    ) -> Result<PendingSave, PanelError> {
        let page = self.ready_page()?;
        let block = page
            .block(block_id)
            .ok_or_else(|| PanelError::NotFound(format!("block '{}'", block_id)))?;
        validate_block_config(ctx, &block.slug, &config)?;

        let previous = block.config.clone();
        let blocks = replace_block_config(&page.blocks, block_id, config.clone())?;
        if let Some(page) = self.page.as_mut() {
            page.blocks = blocks.clone();
        }

        Ok(PendingSave {
            ticket: self.ticket(),
            block_id: block_id.to_string(),
            previous,
            applied: config,
            blocks,
        })
    }

    /// Settle a save. A failed write restores the block's previous config
    /// unless a later save has already replaced it. Returns false when the
    /// ticket is stale.
    pub fn complete_save(&mut self, pending: PendingSave, result: Result<PageConfig, PanelError>) -> bool {
        if !self.is_current(pending.ticket) {
            debug!("Discarding stale block save for '{}'", self.resource_id);
            return false;
        }
        let Some(page) = self.page.as_mut() else {
            return false;
        };
        match result {
            Ok(saved) => {
                if page.id.is_none() {
                    page.id = saved.id;
                }
            }
            Err(e) => {
                debug!("Rolling back block '{}': {}", pending.block_id, e);
                if let Some(block) = page.blocks.iter_mut().find(|b| b.id == pending.block_id)
                    && block.config == pending.applied
                {
                    block.config = pending.previous;
                }
            }
        }
        true
    }

    /// Render the current page; refused while loading or failed
    pub fn render(&self, ctx: &RenderContext<'_>, runtime: &RuntimeProps) -> Result<View, PanelError> {
        let page = self.ready_page()?;
        let ctx = RenderContext {
            registry: ctx.registry,
            customs: ctx.customs,
            edit_mode: self.edit_mode,
        };
        Ok(render_page(&page.blocks, &ctx, runtime))
    }
}
