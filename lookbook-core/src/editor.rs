/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! The editor owns the document and the transient selection state.
//!
//! Every mutation clamps through the geometry engine, writes the whole
//! document to storage before returning, and reports what kind of redraw
//! it needs so the view can rebuild or patch.

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::geometry::GeometryLimits;
use crate::model::{Block, BlockContent, BlockId, BlockPrototype, Document, Page, PageId, Rect};
use crate::persist::{self, Storage};
use crate::proxy::{ImageUrlResolver, RelayProxy};
use crate::template::TemplateSet;

/// What the view has to do after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Pages or blocks were added, removed or replaced.
    Structure,
    /// One block changed in place: moved, resized or its image panned.
    Patch { page: PageId, block: BlockId },
    /// Only selection changed.
    Selection,
    None,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub selected_page: Option<PageId>,
    pub selected_block: Option<(PageId, BlockId)>,
    /// Text block with an open inline editor.
    pub editing: Option<(PageId, BlockId)>,
}

pub struct Editor<S: Storage> {
    document: Document,
    ui: UiState,
    storage: S,
    config: EditorConfig,
    templates: TemplateSet,
    resolver: RelayProxy,
}

impl<S: Storage> Editor<S> {
    /// Loads the saved document (or starts fresh) and selects the last page.
    pub fn open(storage: S, config: EditorConfig) -> Self {
        let mut document = persist::load_document(&storage, &config.storage_key);
        document.clamp_blocks(&config.limits);
        let selected = document.last_page().id.clone();
        info!(pages = document.pages().len(), "lookbook editor opened");
        Self {
            document,
            ui: UiState {
                selected_page: Some(selected),
                ..UiState::default()
            },
            resolver: RelayProxy::new(config.proxy_base.clone()),
            storage,
            config,
            templates: TemplateSet::builtin(),
        }
    }

    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn resolver(&self) -> &RelayProxy {
        &self.resolver
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn limits(&self) -> GeometryLimits {
        self.config.limits
    }

    pub fn selected_page(&self) -> Option<&Page> {
        self.ui.selected_page.as_ref().and_then(|id| self.document.page(id))
    }

    pub fn block(&self, page: &PageId, block: &BlockId) -> Option<&Block> {
        self.document.block(page, block)
    }

    /// Template target: the selected page, else the last one.
    fn target_page(&self) -> PageId {
        self.selected_page()
            .unwrap_or_else(|| self.document.last_page())
            .id
            .clone()
    }

    fn persist(&mut self) {
        if let Err(err) = persist::save_document(&mut self.storage, &self.config.storage_key, &self.document) {
            warn!(error = %err, "lookbook save failed");
        }
    }

    // ---- selection ----------------------------------------------------------

    pub fn select_page(&mut self, page: &PageId, clear_block: bool) -> Result<Change, EditorError> {
        if self.document.page(page).is_none() {
            return Err(EditorError::UnknownPage(page.clone()));
        }
        self.ui.selected_page = Some(page.clone());
        if clear_block {
            self.ui.selected_block = None;
        }
        Ok(Change::Selection)
    }

    /// Selects a block and its page, clearing any other block selection.
    pub fn select_block(&mut self, page: &PageId, block: &BlockId) -> Result<Change, EditorError> {
        if self.document.block(page, block).is_none() {
            return Err(EditorError::UnknownBlock(block.clone()));
        }
        self.ui.selected_page = Some(page.clone());
        self.ui.selected_block = Some((page.clone(), block.clone()));
        Ok(Change::Selection)
    }

    pub fn clear_block_selection(&mut self) -> Change {
        self.ui.selected_block = None;
        Change::Selection
    }

    pub(crate) fn set_editing(&mut self, editing: Option<(PageId, BlockId)>) {
        self.ui.editing = editing;
    }

    // ---- pages --------------------------------------------------------------

    /// Appends a page built from `blocks` and selects it.
    pub fn add_page(&mut self, blocks: Vec<BlockPrototype>) -> PageId {
        let limits = self.limits();
        let id = self.document.create_page(blocks, &limits);
        self.ui.selected_page = Some(id.clone());
        self.ui.selected_block = None;
        self.persist();
        debug!(page = %id, "page added");
        id
    }

    pub fn add_blank_page(&mut self) -> PageId {
        self.add_page(Vec::new())
    }

    /// Deletes the selected page; selection moves to the page before it.
    pub fn delete_selected_page(&mut self) -> Result<Change, EditorError> {
        let Some(selected) = self.ui.selected_page.clone() else {
            return Ok(Change::None);
        };
        self.delete_page(&selected)
    }

    pub fn delete_page(&mut self, page: &PageId) -> Result<Change, EditorError> {
        let index = self.document.delete_page(page)?;
        let was_selected = self.ui.selected_page.as_ref() == Some(page);
        if was_selected || self.selected_page().is_none() {
            let next = index.saturating_sub(1);
            self.ui.selected_page = Some(self.document.pages()[next].id.clone());
        }
        if matches!(&self.ui.selected_block, Some((p, _)) if p == page) {
            self.ui.selected_block = None;
        }
        if matches!(&self.ui.editing, Some((p, _)) if p == page) {
            self.ui.editing = None;
        }
        self.persist();
        debug!(page = %page, "page deleted");
        Ok(Change::Structure)
    }

    /// Replaces the blocks of `page` with a fresh copy of a template.
    pub fn apply_template(&mut self, page: &PageId, name: &str) -> Result<Change, EditorError> {
        let blocks = self.templates.instantiate(name);
        let limits = self.limits();
        self.document.replace_blocks(page, blocks, &limits)?;
        if matches!(&self.ui.selected_block, Some((p, _)) if p == page) {
            self.ui.selected_block = None;
        }
        self.persist();
        info!(page = %page, template = name, "template applied");
        Ok(Change::Structure)
    }

    pub fn apply_template_to_selection(&mut self, name: &str) -> Result<Change, EditorError> {
        if name.is_empty() {
            return Ok(Change::None);
        }
        let page = self.target_page();
        self.apply_template(&page, name)
    }

    // ---- blocks -------------------------------------------------------------

    pub fn add_block(&mut self, page: &PageId, block: BlockPrototype) -> Result<BlockId, EditorError> {
        let limits = self.limits();
        let id = self.document.add_block(page, block, &limits)?;
        self.persist();
        Ok(id)
    }

    pub fn remove_block(&mut self, page: &PageId, block: &BlockId) -> Result<Change, EditorError> {
        self.document.remove_block(page, block)?;
        let target = Some((page.clone(), block.clone()));
        if self.ui.selected_block == target {
            self.ui.selected_block = None;
        }
        if self.ui.editing == target {
            self.ui.editing = None;
        }
        self.persist();
        Ok(Change::Structure)
    }

    /// Delete-key behaviour; a no-op while a text block is being edited.
    pub fn remove_selected_block(&mut self) -> Result<Change, EditorError> {
        if self.ui.editing.is_some() {
            return Ok(Change::None);
        }
        match self.ui.selected_block.clone() {
            Some((page, block)) => self.remove_block(&page, &block),
            None => Ok(Change::None),
        }
    }

    pub fn update_block_rect(&mut self, page: &PageId, block: &BlockId, rect: Rect) -> Result<Rect, EditorError> {
        let limits = self.limits();
        let stored = self.document.update_block_rect(page, block, rect, &limits)?;
        self.persist();
        Ok(stored)
    }

    pub fn update_block_content(
        &mut self,
        page: &PageId,
        block: &BlockId,
        content: BlockContent,
    ) -> Result<Change, EditorError> {
        self.document.update_block_content(page, block, content)?;
        self.persist();
        Ok(Change::Structure)
    }

    // ---- generated images ---------------------------------------------------

    /// New page holding one full-bleed image.
    pub fn add_generated_image(&mut self, url: &str) -> PageId {
        let url = self.resolver.resolve(url);
        self.add_page(vec![BlockPrototype::new(Rect::FULL, BlockContent::image(url))])
    }

    /// Appends an image to the last page and selects that page.
    pub fn add_image_to_last_page(&mut self, url: &str) -> Result<BlockId, EditorError> {
        let page = self.document.last_page().id.clone();
        let url = self.resolver.resolve(url);
        let id = self.add_block(
            &page,
            BlockPrototype::new(Rect::new(10.0, 10.0, 40.0, 40.0), BlockContent::image(url)),
        )?;
        self.select_page(&page, true)?;
        Ok(id)
    }
}
