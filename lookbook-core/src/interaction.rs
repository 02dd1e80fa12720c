/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Pointer gestures turned into document mutations.
//!
//! A block is either idle, dragging, resizing or having its image panned;
//! only one gesture runs at a time. Every intermediate step is clamped and
//! stored, so an aborted gesture leaves the last valid rect behind.

use tracing::debug;

use crate::config::EditorConfig;
use crate::editor::{Change, Editor};
use crate::error::EditorError;
use crate::geometry::{self, PixelBox, PixelSize};
use crate::model::{BlockContent, BlockId, BlockPrototype, ImageContent, PageId, TextContent};
use crate::persist::Storage;
use crate::proxy::ImageUrlResolver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
    ];

    pub fn css_class(self) -> &'static str {
        match self {
            ResizeHandle::TopLeft => "tl",
            ResizeHandle::TopRight => "tr",
            ResizeHandle::BottomLeft => "bl",
            ResizeHandle::BottomRight => "br",
            ResizeHandle::Top => "t",
            ResizeHandle::Bottom => "b",
            ResizeHandle::Left => "l",
            ResizeHandle::Right => "r",
        }
    }

    fn edges(self) -> (bool, bool, bool, bool) {
        match self {
            ResizeHandle::TopLeft => (true, false, true, false),
            ResizeHandle::TopRight => (false, true, true, false),
            ResizeHandle::BottomLeft => (true, false, false, true),
            ResizeHandle::BottomRight => (false, true, false, true),
            ResizeHandle::Top => (false, false, true, false),
            ResizeHandle::Bottom => (false, false, false, true),
            ResizeHandle::Left => (true, false, false, false),
            ResizeHandle::Right => (false, true, false, false),
        }
    }

    /// Moves the edges this handle owns by the pointer delta.
    ///
    /// The opposite edges stay where they are. A moving edge stops `min` short
    /// of its opposite edge and never leaves `bounds`.
    pub fn apply(self, origin: PixelBox, dx: f64, dy: f64, min: PixelSize, bounds: PixelSize) -> PixelBox {
        let (left, right, top, bottom) = self.edges();
        let mut next = origin;
        let origin_right = origin.left + origin.width;
        let origin_bottom = origin.top + origin.height;
        if left {
            next.left = (origin.left + dx).min(origin_right - min.width).max(0.0);
            next.width = origin_right - next.left;
        }
        if right {
            let edge = (origin_right + dx).max(origin.left + min.width).min(bounds.width);
            next.width = edge - origin.left;
        }
        if top {
            next.top = (origin.top + dy).min(origin_bottom - min.height).max(0.0);
            next.height = origin_bottom - next.top;
        }
        if bottom {
            let edge = (origin_bottom + dy).max(origin.top + min.height).min(bounds.height);
            next.height = edge - origin.top;
        }
        next
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        page: PageId,
        block: BlockId,
        last: (f64, f64),
    },
    Resizing {
        page: PageId,
        block: BlockId,
        handle: ResizeHandle,
        start: (f64, f64),
        origin: PixelBox,
    },
    Panning {
        page: PageId,
        block: BlockId,
        start: (f64, f64),
        origin: (f32, f32),
        frame: PixelSize,
    },
}

/// Identity of one gallery drag, shared by every drop callback it fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragSessionId(String);

impl DragSessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

impl From<&str> for DragSessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropRequest {
    pub page: PageId,
    pub session: DragSessionId,
    pub image_url: String,
    /// Drop point in percent of the page canvas.
    pub x: f32,
    pub y: f32,
    pub now_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Replaced(BlockId),
    Created(BlockId),
    /// Repeat callback for a drop already handled.
    Suppressed,
    /// Dragged item carried no image.
    Ignored,
}

pub struct InteractionController {
    gesture: Gesture,
    last_drop: Option<(DragSessionId, f64)>,
    dedupe_ms: f64,
}

impl InteractionController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            last_drop: None,
            dedupe_ms: config.drop_dedupe_ms,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        if self.is_idle() { Ok(()) } else { Err(EditorError::GestureBusy) }
    }

    // ---- selection ----------------------------------------------------------

    pub fn pointer_down_block<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        page: &PageId,
        block: &BlockId,
    ) -> Result<Change, EditorError> {
        editor.select_block(page, block)
    }

    pub fn pointer_down_canvas<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        page: &PageId,
    ) -> Result<Change, EditorError> {
        editor.select_page(page, true)
    }

    // ---- drag ---------------------------------------------------------------

    pub fn begin_drag<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        page: &PageId,
        block: &BlockId,
        pointer: (f64, f64),
    ) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.pointer_down_block(editor, page, block)?;
        self.gesture = Gesture::Dragging {
            page: page.clone(),
            block: block.clone(),
            last: pointer,
        };
        Ok(())
    }

    // ---- resize -------------------------------------------------------------

    pub fn begin_resize<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        page: &PageId,
        block: &BlockId,
        handle: ResizeHandle,
        pointer: (f64, f64),
        canvas: PixelSize,
    ) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.pointer_down_block(editor, page, block)?;
        let rect = editor
            .block(page, block)
            .map(|b| b.rect)
            .ok_or_else(|| EditorError::UnknownBlock(block.clone()))?;
        self.gesture = Gesture::Resizing {
            page: page.clone(),
            block: block.clone(),
            handle,
            start: pointer,
            origin: geometry::rect_to_pixel_box(rect, canvas),
        };
        Ok(())
    }

    // ---- image pan ----------------------------------------------------------

    /// Starts moving the focal point of an image inside its frame.
    pub fn begin_pan<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        page: &PageId,
        block: &BlockId,
        pointer: (f64, f64),
        frame: PixelSize,
    ) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let origin = match editor.block(page, block).map(|b| &b.content) {
            Some(BlockContent::Image(image)) => (image.pos_x, image.pos_y),
            Some(_) => return Err(EditorError::WrongBlockKind(block.clone(), "image")),
            None => return Err(EditorError::UnknownBlock(block.clone())),
        };
        self.pointer_down_block(editor, page, block)?;
        self.gesture = Gesture::Panning {
            page: page.clone(),
            block: block.clone(),
            start: pointer,
            origin,
            frame,
        };
        Ok(())
    }

    /// Feeds one pointer move to whichever gesture is active.
    ///
    /// `canvas` is the current pixel size of the page canvas the block sits on.
    pub fn pointer_move<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        pointer: (f64, f64),
        canvas: PixelSize,
    ) -> Result<Change, EditorError> {
        let limits = editor.limits();
        match &mut self.gesture {
            Gesture::Idle => Ok(Change::None),
            Gesture::Dragging { page, block, last } => {
                let (dx, dy) = geometry::pixel_delta_to_percent(pointer.0 - last.0, pointer.1 - last.1, canvas);
                *last = pointer;
                let current = editor
                    .block(page, block)
                    .map(|b| b.rect)
                    .ok_or_else(|| EditorError::UnknownBlock(block.clone()))?;
                let next = geometry::translate(current, dx, dy, &limits);
                editor.update_block_rect(page, block, next)?;
                Ok(Change::Patch {
                    page: page.clone(),
                    block: block.clone(),
                })
            }
            Gesture::Resizing { page, block, handle, start, origin } => {
                let min = PixelSize::new(
                    f64::from(limits.min_w) / 100.0 * canvas.width,
                    f64::from(limits.min_h) / 100.0 * canvas.height,
                );
                let proposed = handle.apply(*origin, pointer.0 - start.0, pointer.1 - start.1, min, canvas);
                let Some(rect) = geometry::pixel_box_to_rect(proposed, canvas) else {
                    return Ok(Change::None);
                };
                editor.update_block_rect(page, block, geometry::resize_to(rect, &limits))?;
                Ok(Change::Patch {
                    page: page.clone(),
                    block: block.clone(),
                })
            }
            Gesture::Panning { page, block, start, origin, frame } => {
                let (dx, dy) = geometry::pixel_delta_to_percent(pointer.0 - start.0, pointer.1 - start.1, *frame);
                let pos_x = (origin.0 + dx).clamp(0.0, 100.0);
                let pos_y = (origin.1 + dy).clamp(0.0, 100.0);
                let Some(BlockContent::Image(image)) = editor.block(page, block).map(|b| &b.content) else {
                    return Err(EditorError::WrongBlockKind(block.clone(), "image"));
                };
                let content = BlockContent::Image(ImageContent { pos_x, pos_y, ..image.clone() });
                editor.update_block_content(page, block, content)?;
                Ok(Change::Patch {
                    page: page.clone(),
                    block: block.clone(),
                })
            }
        }
    }

    /// Ends the active gesture. The stored rect is already final.
    pub fn end_gesture(&mut self) -> Change {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => Change::None,
            Gesture::Dragging { page, block, .. }
            | Gesture::Resizing { page, block, .. }
            | Gesture::Panning { page, block, .. } => Change::Patch { page, block },
        }
    }

    /// Pointer capture lost or similar; the last clamped step stays.
    pub fn cancel_gesture(&mut self) {
        if !self.is_idle() {
            debug!("gesture cancelled");
        }
        self.gesture = Gesture::Idle;
    }

    // ---- gallery drops ------------------------------------------------------

    fn admit_drop(&mut self, session: &DragSessionId, now_ms: f64) -> bool {
        if let Some((last, at)) = &self.last_drop {
            if last == session && now_ms - at < self.dedupe_ms {
                return false;
            }
        }
        self.last_drop = Some((session.clone(), now_ms));
        true
    }

    /// Drops an image onto a page: replaces the image under the point or
    /// creates a new block centred on it.
    pub fn drop_item<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        request: DropRequest,
    ) -> Result<DropOutcome, EditorError> {
        let url = editor.resolver().resolve(request.image_url.trim());
        if url.is_empty() {
            return Ok(DropOutcome::Ignored);
        }
        let page = editor
            .document()
            .page(&request.page)
            .ok_or_else(|| EditorError::UnknownPage(request.page.clone()))?;
        if !self.admit_drop(&request.session, request.now_ms) {
            debug!(page = %request.page, "duplicate drop suppressed");
            return Ok(DropOutcome::Suppressed);
        }

        let hit = geometry::image_block_at(&page.blocks, request.x, request.y)
            .map(|b| (b.id.clone(), b.content.clone()));
        match hit {
            Some((block, BlockContent::Image(image))) => {
                let content = BlockContent::Image(ImageContent { url, ..image });
                editor.update_block_content(&request.page, &block, content)?;
                editor.select_page(&request.page, false)?;
                Ok(DropOutcome::Replaced(block))
            }
            _ => {
                let limits = editor.limits();
                let (w, h) = editor.config().drop_size;
                let rect = geometry::rect_centered_at(request.x, request.y, w, h, &limits);
                let block = editor.add_block(&request.page, BlockPrototype::new(rect, BlockContent::image(url)))?;
                editor.select_page(&request.page, false)?;
                Ok(DropOutcome::Created(block))
            }
        }
    }

    // ---- inline text editing ------------------------------------------------

    /// Opens the inline editor and returns the current text.
    pub fn begin_text_edit<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        page: &PageId,
        block: &BlockId,
    ) -> Result<String, EditorError> {
        let text = match editor.block(page, block).map(|b| &b.content) {
            Some(BlockContent::Text(text)) => text.text.clone(),
            Some(_) => return Err(EditorError::WrongBlockKind(block.clone(), "text")),
            None => return Err(EditorError::UnknownBlock(block.clone())),
        };
        editor.select_block(page, block)?;
        editor.set_editing(Some((page.clone(), block.clone())));
        Ok(text)
    }

    pub fn commit_text_edit<S: Storage>(
        &mut self,
        editor: &mut Editor<S>,
        value: &str,
    ) -> Result<Change, EditorError> {
        let Some((page, block)) = editor.ui().editing.clone() else {
            return Ok(Change::None);
        };
        editor.set_editing(None);
        editor.update_block_content(&page, &block, BlockContent::Text(TextContent { text: value.to_string() }))
    }

    pub fn cancel_text_edit<S: Storage>(&mut self, editor: &mut Editor<S>) -> Change {
        editor.set_editing(None);
        Change::Selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;
    use crate::persist::MemoryStorage;

    fn setup() -> (Editor<MemoryStorage>, InteractionController, PageId) {
        let config = EditorConfig::default();
        let controller = InteractionController::new(&config);
        let editor = Editor::open(MemoryStorage::new(), config);
        let page = editor.document().pages()[0].id.clone();
        (editor, controller, page)
    }

    fn image_at(editor: &mut Editor<MemoryStorage>, page: &PageId, rect: Rect) -> BlockId {
        editor
            .add_block(page, BlockPrototype::new(rect, BlockContent::image("old.png")))
            .unwrap()
    }

    fn drop_at(page: &PageId, session: &str, x: f32, y: f32, now_ms: f64) -> DropRequest {
        DropRequest {
            page: page.clone(),
            session: DragSessionId::from(session),
            image_url: "/img/new.png".into(),
            x,
            y,
            now_ms,
        }
    }

    #[test]
    fn drag_translates_by_canvas_percent() {
        let (mut editor, mut controller, page) = setup();
        let block = image_at(&mut editor, &page, Rect::new(10.0, 10.0, 20.0, 20.0));
        let canvas = PixelSize::new(500.0, 1000.0);

        controller.begin_drag(&mut editor, &page, &block, (100.0, 100.0)).unwrap();
        controller.pointer_move(&mut editor, (150.0, 200.0), canvas).unwrap();
        controller.pointer_move(&mut editor, (200.0, 300.0), canvas).unwrap();
        assert_eq!(editor.block(&page, &block).unwrap().rect, Rect::new(30.0, 30.0, 20.0, 20.0));
        assert_eq!(controller.end_gesture(), Change::Patch { page: page.clone(), block: block.clone() });
        assert!(controller.is_idle());
    }

    #[test]
    fn drag_past_edge_keeps_clamped_rect_after_cancel() {
        let (mut editor, mut controller, page) = setup();
        let block = image_at(&mut editor, &page, Rect::new(80.0, 80.0, 10.0, 10.0));
        let canvas = PixelSize::new(100.0, 100.0);

        controller.begin_drag(&mut editor, &page, &block, (0.0, 0.0)).unwrap();
        controller.pointer_move(&mut editor, (50.0, 50.0), canvas).unwrap();
        controller.cancel_gesture();
        assert_eq!(editor.block(&page, &block).unwrap().rect, Rect::new(90.0, 90.0, 10.0, 10.0));

        let saved = crate::persist::load_document(editor.storage(), "lookbook");
        assert_eq!(saved.block(&page, &block).unwrap().rect, Rect::new(90.0, 90.0, 10.0, 10.0));
    }

    #[test]
    fn gestures_do_not_overlap() {
        let (mut editor, mut controller, page) = setup();
        let block = image_at(&mut editor, &page, Rect::new(10.0, 10.0, 20.0, 20.0));
        let canvas = PixelSize::new(100.0, 100.0);
        controller.begin_drag(&mut editor, &page, &block, (0.0, 0.0)).unwrap();
        assert_eq!(
            controller.begin_resize(&mut editor, &page, &block, ResizeHandle::Right, (0.0, 0.0), canvas),
            Err(EditorError::GestureBusy)
        );
    }

    #[test]
    fn resize_from_top_left_handle() {
        let (mut editor, mut controller, page) = setup();
        let block = image_at(&mut editor, &page, Rect::new(20.0, 20.0, 40.0, 40.0));
        let canvas = PixelSize::new(200.0, 200.0);

        controller
            .begin_resize(&mut editor, &page, &block, ResizeHandle::TopLeft, (40.0, 40.0), canvas)
            .unwrap();
        controller.pointer_move(&mut editor, (20.0, 60.0), canvas).unwrap();
        assert_eq!(editor.block(&page, &block).unwrap().rect, Rect::new(10.0, 30.0, 50.0, 30.0));

        // Dragging past the opposite corner collapses against it.
        controller.pointer_move(&mut editor, (400.0, 400.0), canvas).unwrap();
        let rect = editor.block(&page, &block).unwrap().rect;
        assert_eq!(rect, Rect::new(52.0, 52.0, 8.0, 8.0));
        assert_eq!((rect.right(), rect.bottom()), (60.0, 60.0));
        controller.end_gesture();
    }

    #[test]
    fn resize_keeps_fixed_edges_anchored() {
        let (mut editor, mut controller, page) = setup();
        let block = image_at(&mut editor, &page, Rect::new(20.0, 20.0, 40.0, 40.0));
        let canvas = PixelSize::new(200.0, 200.0);

        controller
            .begin_resize(&mut editor, &page, &block, ResizeHandle::BottomRight, (120.0, 120.0), canvas)
            .unwrap();
        controller.pointer_move(&mut editor, (-100.0, -100.0), canvas).unwrap();
        assert_eq!(editor.block(&page, &block).unwrap().rect, Rect::new(20.0, 20.0, 8.0, 8.0));

        controller.pointer_move(&mut editor, (500.0, 140.0), canvas).unwrap();
        assert_eq!(editor.block(&page, &block).unwrap().rect, Rect::new(20.0, 20.0, 80.0, 50.0));
        controller.end_gesture();

        controller
            .begin_resize(&mut editor, &page, &block, ResizeHandle::Left, (40.0, 50.0), canvas)
            .unwrap();
        controller.pointer_move(&mut editor, (-300.0, 50.0), canvas).unwrap();
        assert_eq!(editor.block(&page, &block).unwrap().rect, Rect::new(0.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn pointer_down_on_block_selects_it_and_its_page() {
        let (mut editor, mut controller, first) = setup();
        let a = image_at(&mut editor, &first, Rect::new(0.0, 0.0, 20.0, 20.0));
        let second = editor.add_blank_page();
        let b = image_at(&mut editor, &second, Rect::new(0.0, 0.0, 20.0, 20.0));

        controller.pointer_down_block(&mut editor, &first, &a).unwrap();
        assert_eq!(editor.ui().selected_page, Some(first.clone()));
        assert_eq!(editor.ui().selected_block, Some((first.clone(), a.clone())));

        controller.pointer_down_block(&mut editor, &second, &b).unwrap();
        assert_eq!(editor.ui().selected_page, Some(second.clone()));
        assert_eq!(editor.ui().selected_block, Some((second.clone(), b.clone())));
    }

    #[test]
    fn pointer_down_on_canvas_clears_block_and_moves_page() {
        let (mut editor, mut controller, first) = setup();
        let a = image_at(&mut editor, &first, Rect::new(0.0, 0.0, 20.0, 20.0));
        let second = editor.add_blank_page();

        controller.pointer_down_block(&mut editor, &first, &a).unwrap();
        controller.pointer_down_canvas(&mut editor, &first).unwrap();
        assert_eq!(editor.ui().selected_page, Some(first.clone()));
        assert_eq!(editor.ui().selected_block, None);

        controller.pointer_down_block(&mut editor, &first, &a).unwrap();
        controller.pointer_down_canvas(&mut editor, &second).unwrap();
        assert_eq!(editor.ui().selected_page, Some(second.clone()));
        assert_eq!(editor.ui().selected_block, None);
    }

    #[test]
    fn drop_on_image_replaces_content() {
        let (mut editor, mut controller, page) = setup();
        let block = image_at(&mut editor, &page, Rect::new(0.0, 0.0, 50.0, 50.0));

        let outcome = controller.drop_item(&mut editor, drop_at(&page, "s1", 25.0, 25.0, 0.0)).unwrap();
        assert_eq!(outcome, DropOutcome::Replaced(block.clone()));
        let blocks = &editor.document().page(&page).unwrap().blocks;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, BlockContent::image("/img/new.png"));
    }

    #[test]
    fn drop_on_empty_canvas_creates_one_block() {
        let (mut editor, mut controller, page) = setup();
        image_at(&mut editor, &page, Rect::new(0.0, 0.0, 20.0, 20.0));

        let outcome = controller.drop_item(&mut editor, drop_at(&page, "s1", 70.0, 70.0, 0.0)).unwrap();
        let DropOutcome::Created(created) = outcome else {
            panic!("expected a new block, got {outcome:?}");
        };
        let page_ref = editor.document().page(&page).unwrap();
        assert_eq!(page_ref.blocks.len(), 2);
        assert_eq!(page_ref.block(&created).unwrap().rect, Rect::new(50.0, 55.0, 40.0, 30.0));
    }

    #[test]
    fn duplicate_drop_callbacks_are_suppressed() {
        let (mut editor, mut controller, page) = setup();
        let first = controller.drop_item(&mut editor, drop_at(&page, "s1", 70.0, 70.0, 1000.0)).unwrap();
        let second = controller.drop_item(&mut editor, drop_at(&page, "s1", 70.0, 70.0, 1100.0)).unwrap();
        assert!(matches!(first, DropOutcome::Created(_)));
        assert_eq!(second, DropOutcome::Suppressed);
        assert_eq!(editor.document().page(&page).unwrap().blocks.len(), 1);

        // Same session after the window, or a new session, is a new drop.
        let later = controller.drop_item(&mut editor, drop_at(&page, "s1", 10.0, 90.0, 1400.0)).unwrap();
        assert!(matches!(later, DropOutcome::Created(_)));
        let other = controller.drop_item(&mut editor, drop_at(&page, "s2", 10.0, 10.0, 1401.0)).unwrap();
        assert!(matches!(other, DropOutcome::Created(_)));
    }

    #[test]
    fn text_edit_commits_new_value() {
        let (mut editor, mut controller, page) = setup();
        let block = editor
            .add_block(&page, BlockPrototype::new(Rect::new(0.0, 0.0, 30.0, 10.0), BlockContent::text("Old")))
            .unwrap();
        assert_eq!(controller.begin_text_edit(&mut editor, &page, &block).unwrap(), "Old");
        assert!(editor.ui().editing.is_some());
        assert_eq!(controller.commit_text_edit(&mut editor, "New"), Ok(Change::Structure));
        assert_eq!(editor.block(&page, &block).unwrap().content, BlockContent::text("New"));
        assert!(editor.ui().editing.is_none());
    }

    #[test]
    fn pan_moves_focal_point_only() {
        let (mut editor, mut controller, page) = setup();
        let block = image_at(&mut editor, &page, Rect::new(10.0, 10.0, 40.0, 40.0));
        controller
            .begin_pan(&mut editor, &page, &block, (0.0, 0.0), PixelSize::new(200.0, 100.0))
            .unwrap();
        controller.pointer_move(&mut editor, (-50.0, 80.0), PixelSize::new(1.0, 1.0)).unwrap();
        controller.end_gesture();

        let stored = editor.block(&page, &block).unwrap();
        assert_eq!(stored.rect, Rect::new(10.0, 10.0, 40.0, 40.0));
        let BlockContent::Image(image) = &stored.content else {
            panic!("image expected");
        };
        assert_eq!((image.pos_x, image.pos_y), (25.0, 100.0));
    }

    #[test]
    fn pan_rejects_text_blocks() {
        let (mut editor, mut controller, page) = setup();
        let block = editor
            .add_block(&page, BlockPrototype::new(Rect::new(0.0, 0.0, 30.0, 10.0), BlockContent::text("t")))
            .unwrap();
        assert!(matches!(
            controller.begin_pan(&mut editor, &page, &block, (0.0, 0.0), PixelSize::new(10.0, 10.0)),
            Err(EditorError::WrongBlockKind(_, "image"))
        ));
        assert!(controller.is_idle());
    }
}
