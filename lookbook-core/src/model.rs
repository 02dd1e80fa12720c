/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Pages, blocks and the document that owns them.
//!
//! All block geometry is expressed in percent of the page canvas. The
//! persisted form is a bare JSON array of pages, each
//! `{ id, blocks: [{ id, type, z, rect, content }] }`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::geometry::{self, GeometryLimits};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn generate() -> Self {
                let raw = uuid::Uuid::new_v4().simple().to_string();
                Self(raw[..12].to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PageId);
string_id!(BlockId);

/// Position and size in percent of the page canvas (0..=100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const FULL: Rect = Rect { x: 0.0, y: 0.0, w: 100.0, h: 100.0 };

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Edges are inclusive so a drop exactly on a border still lands.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    #[default]
    Contain,
    Cover,
}

fn centered() -> f32 {
    50.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageContent {
    /// Empty means "no image yet"; rendered as a drop placeholder.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub fit: FitMode,
    #[serde(rename = "posX", default = "centered")]
    pub pos_x: f32,
    #[serde(rename = "posY", default = "centered")]
    pub pos_y: f32,
}

impl ImageContent {
    pub fn empty() -> Self {
        Self::with_url(String::new())
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fit: FitMode::default(),
            pos_x: centered(),
            pos_y: centered(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.url.trim().is_empty()
    }
}

impl Default for ImageContent {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum BlockContent {
    Image(ImageContent),
    Text(TextContent),
}

impl BlockContent {
    pub fn image(url: impl Into<String>) -> Self {
        BlockContent::Image(ImageContent::with_url(url))
    }

    pub fn text(text: impl Into<String>) -> Self {
        BlockContent::Text(TextContent { text: text.into() })
    }

    pub fn is_image(&self) -> bool {
        matches!(self, BlockContent::Image(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockContent::Image(_) => "image",
            BlockContent::Text(_) => "text",
        }
    }
}

fn default_z() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    pub id: BlockId,
    #[serde(default = "default_z")]
    pub z: i32,
    pub rect: Rect,
    #[serde(flatten)]
    pub content: BlockContent,
}

/// A block without identity, as produced by templates.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPrototype {
    pub rect: Rect,
    pub content: BlockContent,
}

impl BlockPrototype {
    pub fn new(rect: Rect, content: BlockContent) -> Self {
        Self { rect, content }
    }

    pub fn instantiate(self, limits: &GeometryLimits) -> Block {
        Block {
            id: BlockId::generate(),
            z: default_z(),
            rect: geometry::clamp_rect(self.rect, limits),
            content: self.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(blocks: Vec<BlockPrototype>, limits: &GeometryLimits) -> Self {
        Self {
            id: PageId::generate(),
            blocks: blocks.into_iter().map(|b| b.instantiate(limits)).collect(),
        }
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }
}

/// Ordered, never-empty sequence of pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Page>", into = "Vec<Page>")]
pub struct Document {
    pages: Vec<Page>,
}

impl TryFrom<Vec<Page>> for Document {
    type Error = String;

    fn try_from(pages: Vec<Page>) -> Result<Self, Self::Error> {
        if pages.is_empty() {
            return Err("document has no pages".to_string());
        }
        let mut document = Self { pages };
        document.clamp_blocks(&GeometryLimits::default());
        Ok(document)
    }
}

impl From<Document> for Vec<Page> {
    fn from(document: Document) -> Self {
        document.pages
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document holding a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::new(Vec::new(), &GeometryLimits::default())],
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub fn page_index(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| &p.id == id)
    }

    pub fn last_page(&self) -> &Page {
        // Non-empty by construction.
        &self.pages[self.pages.len() - 1]
    }

    pub fn block(&self, page: &PageId, block: &BlockId) -> Option<&Block> {
        self.page(page)?.block(block)
    }

    fn page_mut(&mut self, id: &PageId) -> Result<&mut Page, EditorError> {
        self.pages
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| EditorError::UnknownPage(id.clone()))
    }

    fn block_mut(&mut self, page: &PageId, block: &BlockId) -> Result<&mut Block, EditorError> {
        self.page_mut(page)?
            .block_mut(block)
            .ok_or_else(|| EditorError::UnknownBlock(block.clone()))
    }

    /// Re-clamps every block rect, e.g. after loading under stricter limits.
    pub fn clamp_blocks(&mut self, limits: &GeometryLimits) {
        for block in self.pages.iter_mut().flat_map(|p| p.blocks.iter_mut()) {
            block.rect = geometry::clamp_rect(block.rect, limits);
        }
    }

    pub fn create_page(&mut self, blocks: Vec<BlockPrototype>, limits: &GeometryLimits) -> PageId {
        let page = Page::new(blocks, limits);
        let id = page.id.clone();
        self.pages.push(page);
        id
    }

    /// Removes a page and returns the index it occupied.
    pub fn delete_page(&mut self, id: &PageId) -> Result<usize, EditorError> {
        let index = self
            .page_index(id)
            .ok_or_else(|| EditorError::UnknownPage(id.clone()))?;
        if self.pages.len() <= 1 {
            return Err(EditorError::LastPage);
        }
        self.pages.remove(index);
        Ok(index)
    }

    pub fn replace_blocks(
        &mut self,
        page: &PageId,
        blocks: Vec<BlockPrototype>,
        limits: &GeometryLimits,
    ) -> Result<(), EditorError> {
        let page = self.page_mut(page)?;
        page.blocks = blocks.into_iter().map(|b| b.instantiate(limits)).collect();
        Ok(())
    }

    pub fn add_block(
        &mut self,
        page: &PageId,
        block: BlockPrototype,
        limits: &GeometryLimits,
    ) -> Result<BlockId, EditorError> {
        let block = block.instantiate(limits);
        let id = block.id.clone();
        self.page_mut(page)?.blocks.push(block);
        Ok(id)
    }

    pub fn remove_block(&mut self, page: &PageId, block: &BlockId) -> Result<Block, EditorError> {
        let page = self.page_mut(page)?;
        let index = page
            .blocks
            .iter()
            .position(|b| &b.id == block)
            .ok_or_else(|| EditorError::UnknownBlock(block.clone()))?;
        Ok(page.blocks.remove(index))
    }

    /// Writes a rect after clamping it; returns the stored value.
    pub fn update_block_rect(
        &mut self,
        page: &PageId,
        block: &BlockId,
        rect: Rect,
        limits: &GeometryLimits,
    ) -> Result<Rect, EditorError> {
        let target = self.block_mut(page, block)?;
        target.rect = geometry::clamp_rect(rect, limits);
        Ok(target.rect)
    }

    pub fn update_block_content(
        &mut self,
        page: &PageId,
        block: &BlockId,
        content: BlockContent,
    ) -> Result<(), EditorError> {
        self.block_mut(page, block)?.content = content;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> GeometryLimits {
        GeometryLimits::default()
    }

    #[test]
    fn serializes_in_persisted_layout() {
        let mut document = Document::new();
        let page = document.pages()[0].id.clone();
        document
            .add_block(
                &page,
                BlockPrototype::new(Rect::new(10.0, 10.0, 40.0, 40.0), BlockContent::image("a.png")),
                &limits(),
            )
            .unwrap();
        document
            .add_block(
                &page,
                BlockPrototype::new(Rect::new(10.0, 60.0, 40.0, 10.0), BlockContent::text("Hello")),
                &limits(),
            )
            .unwrap();

        let value = serde_json::to_value(&document).unwrap();
        let blocks = &value[0]["blocks"];
        assert_eq!(blocks[0]["type"], "image");
        assert_eq!(blocks[0]["z"], 1);
        assert_eq!(blocks[0]["content"]["url"], "a.png");
        assert_eq!(blocks[0]["content"]["fit"], "contain");
        assert_eq!(blocks[0]["content"]["posX"], 50.0);
        assert_eq!(blocks[1]["type"], "text");
        assert_eq!(blocks[1]["content"]["text"], "Hello");
        assert_eq!(blocks[1]["rect"]["y"], 60.0);
    }

    #[test]
    fn reads_documents_written_without_optional_fields() {
        let raw = r#"[{"id":"p1","blocks":[
            {"id":"b1","type":"image","rect":{"x":12,"y":24,"w":60,"h":50},"content":{"url":""}},
            {"id":"b2","type":"text","rect":{"x":10,"y":8,"w":60,"h":10},"content":{"text":"LOOK"}}
        ]}]"#;
        let document: Document = serde_json::from_str(raw).unwrap();
        let page = &document.pages()[0];
        assert_eq!(page.id.as_str(), "p1");
        assert_eq!(page.blocks[0].z, 1);
        match &page.blocks[0].content {
            BlockContent::Image(image) => {
                assert!(image.is_placeholder());
                assert_eq!(image.fit, FitMode::Contain);
                assert_eq!((image.pos_x, image.pos_y), (50.0, 50.0));
            }
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_page_list() {
        assert!(serde_json::from_str::<Document>("[]").is_err());
    }

    #[test]
    fn clamps_out_of_range_rects_on_read() {
        let raw = r#"[{"id":"p1","blocks":[
            {"id":"b1","type":"text","rect":{"x":-5,"y":98,"w":2,"h":20},"content":{"text":""}}
        ]}]"#;
        let document: Document = serde_json::from_str(raw).unwrap();
        assert_eq!(document.pages()[0].blocks[0].rect, Rect::new(0.0, 80.0, 8.0, 20.0));
    }

    #[test]
    fn delete_refuses_last_page() {
        let mut document = Document::new();
        let only = document.pages()[0].id.clone();
        assert!(matches!(document.delete_page(&only), Err(EditorError::LastPage)));
        assert_eq!(document.pages().len(), 1);
    }

    #[test]
    fn update_rect_is_clamped() {
        let mut document = Document::new();
        let page = document.pages()[0].id.clone();
        let block = document
            .add_block(
                &page,
                BlockPrototype::new(Rect::new(0.0, 0.0, 20.0, 20.0), BlockContent::text("x")),
                &limits(),
            )
            .unwrap();
        let stored = document
            .update_block_rect(&page, &block, Rect::new(90.0, -3.0, 20.0, 1.0), &limits())
            .unwrap();
        assert_eq!(stored, Rect::new(80.0, 0.0, 20.0, 8.0));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut document = Document::new();
        let page = document.pages()[0].id.clone();
        let missing = BlockId::from("nope");
        assert!(matches!(
            document.remove_block(&page, &missing),
            Err(EditorError::UnknownBlock(_))
        ));
        assert!(matches!(
            document.delete_page(&PageId::from("nope")),
            Err(EditorError::UnknownPage(_))
        ));
    }
}
