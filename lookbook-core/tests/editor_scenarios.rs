/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use lookbook_core::persist::{decode_document, encode_document, load_document};
use lookbook_core::{
    BlockContent, BlockPrototype, Document, DragSessionId, DropOutcome, DropRequest, Editor, EditorConfig,
    EditorError, ImageContent, InteractionController, MemoryStorage, PageId, PixelSize, Rect,
};

fn open() -> (Editor<MemoryStorage>, InteractionController) {
    let config = EditorConfig::default();
    let controller = InteractionController::new(&config);
    (Editor::open(MemoryStorage::new(), config), controller)
}

fn assert_in_bounds(document: &Document) {
    for page in document.pages() {
        for block in &page.blocks {
            let r = block.rect;
            assert!(r.x >= 0.0 && r.y >= 0.0, "{r:?}");
            assert!(r.x + r.w <= 100.0 && r.y + r.h <= 100.0, "{r:?}");
            assert!(r.w >= 8.0 && r.h >= 8.0, "{r:?}");
        }
    }
}

fn drop_request(page: &PageId, session: &str, x: f32, y: f32, now_ms: f64) -> DropRequest {
    DropRequest {
        page: page.clone(),
        session: DragSessionId::from(session),
        image_url: "https://cdn.example/look.jpg".into(),
        x,
        y,
        now_ms,
    }
}

#[test]
fn full_template_on_empty_page() {
    let (mut editor, _) = open();
    let page = editor.document().pages()[0].id.clone();
    editor.apply_template(&page, "full").unwrap();

    let blocks = &editor.document().page(&page).unwrap().blocks;
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(blocks[0].content, BlockContent::Image(ImageContent::empty()));
}

#[test]
fn blank_page_on_two_page_document_is_selected() {
    let (mut editor, _) = open();
    editor.add_blank_page();
    assert_eq!(editor.document().pages().len(), 2);

    let added = editor.add_blank_page();
    assert_eq!(editor.document().pages().len(), 3);
    assert_eq!(editor.ui().selected_page.as_ref(), Some(&added));
}

#[test]
fn deleting_selected_middle_page_selects_previous() {
    let (mut editor, _) = open();
    let first = editor.document().pages()[0].id.clone();
    let middle = editor.add_blank_page();
    editor.add_blank_page();
    editor.select_page(&middle, true).unwrap();

    editor.delete_selected_page().unwrap();
    assert_eq!(editor.document().pages().len(), 2);
    assert_eq!(editor.ui().selected_page.as_ref(), Some(&first));
}

#[test]
fn sole_page_survives_delete() {
    let (mut editor, _) = open();
    let before = editor.document().clone();
    assert_eq!(editor.delete_selected_page(), Err(EditorError::LastPage));
    assert_eq!(editor.document(), &before);
}

#[test]
fn drop_on_block_replaces_and_drop_on_empty_creates() {
    let (mut editor, mut controller) = open();
    let page = editor.document().pages()[0].id.clone();
    editor.apply_template(&page, "grid3").unwrap();

    let outcome = controller
        .drop_item(&mut editor, drop_request(&page, "a", 20.0, 50.0, 0.0))
        .unwrap();
    let target = editor.document().page(&page).unwrap().blocks[0].id.clone();
    assert_eq!(outcome, DropOutcome::Replaced(target));
    assert_eq!(editor.document().page(&page).unwrap().blocks.len(), 3);

    let outcome = controller
        .drop_item(&mut editor, drop_request(&page, "b", 50.0, 95.0, 10.0))
        .unwrap();
    assert!(matches!(outcome, DropOutcome::Created(_)));
    assert_eq!(editor.document().page(&page).unwrap().blocks.len(), 4);
    assert_in_bounds(editor.document());

    let BlockContent::Image(image) = &editor.document().page(&page).unwrap().blocks[0].content else {
        panic!("grid cells are images");
    };
    assert_eq!(image.url, "/api/proxy?url=https%3A%2F%2Fcdn.example%2Flook.jpg");
}

#[test]
fn repeated_drop_callback_mutates_once() {
    let (mut editor, mut controller) = open();
    let page = editor.document().pages()[0].id.clone();
    controller.drop_item(&mut editor, drop_request(&page, "s", 50.0, 50.0, 5.0)).unwrap();
    let second = controller.drop_item(&mut editor, drop_request(&page, "s", 50.0, 50.0, 60.0)).unwrap();
    assert_eq!(second, DropOutcome::Suppressed);
    assert_eq!(editor.document().page(&page).unwrap().blocks.len(), 1);
}

#[test]
fn dragging_far_off_the_page_stays_clamped() {
    let (mut editor, mut controller) = open();
    let page = editor.document().pages()[0].id.clone();
    let block = editor
        .add_block(&page, BlockPrototype::new(Rect::new(95.0, 95.0, 10.0, 10.0), BlockContent::text("x")))
        .unwrap();
    let canvas = PixelSize::new(400.0, 560.0);

    controller.begin_drag(&mut editor, &page, &block, (0.0, 0.0)).unwrap();
    for step in 1..20 {
        let p = step as f64 * 60.0;
        controller.pointer_move(&mut editor, (p, -p), canvas).unwrap();
        assert_in_bounds(editor.document());
    }
    controller.cancel_gesture();
    assert_in_bounds(&load_document(editor.storage(), "lookbook"));
}

#[test]
fn document_round_trips_through_storage_format() {
    let (mut editor, _) = open();
    let page = editor.document().pages()[0].id.clone();
    editor.apply_template(&page, "cover").unwrap();
    editor.add_generated_image("https://img.example/a.png");

    let raw = encode_document(editor.document()).unwrap();
    let back = decode_document(&raw).unwrap();
    assert_eq!(&back, editor.document());

    let reopened = Editor::open(editor.storage().clone(), EditorConfig::default());
    assert_eq!(reopened.document(), editor.document());
}

#[test]
fn same_template_picked_for_consecutive_pages() {
    let (mut editor, _) = open();
    let first = editor.document().pages()[0].id.clone();
    editor.apply_template_to_selection("cover").unwrap();
    let second = editor.add_blank_page();
    // Resetting the picker reports an empty choice, which changes nothing.
    assert_eq!(editor.apply_template_to_selection(""), Ok(lookbook_core::Change::None));
    editor.apply_template_to_selection("cover").unwrap();

    assert_eq!(editor.document().page(&first).unwrap().blocks.len(), 3);
    assert_eq!(editor.document().page(&second).unwrap().blocks.len(), 3);
}

#[test]
fn delete_key_removes_block_selected_by_pointer() {
    let (mut editor, mut controller) = open();
    let page = editor.document().pages()[0].id.clone();
    let keep = editor
        .add_block(&page, BlockPrototype::new(Rect::new(0.0, 0.0, 20.0, 20.0), BlockContent::image("a.png")))
        .unwrap();
    let doomed = editor
        .add_block(&page, BlockPrototype::new(Rect::new(50.0, 50.0, 20.0, 20.0), BlockContent::text("x")))
        .unwrap();

    controller.pointer_down_block(&mut editor, &page, &doomed).unwrap();
    assert_eq!(editor.remove_selected_block(), Ok(lookbook_core::Change::Structure));

    let blocks = &editor.document().page(&page).unwrap().blocks;
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].id, keep);
    assert_eq!(editor.ui().selected_page, Some(page));
}
