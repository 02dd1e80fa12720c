/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use std::rc::Rc;

use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;
use lookbook_core::geometry::{self, PixelBox};
use lookbook_core::interaction::DropOutcome;
use lookbook_core::{Block, BlockContent, BlockId, DropRequest, Page, PageId, PageSizing, ResizeHandle, UiState, view};

use crate::EditorState;

#[component]
pub(crate) fn PageView(page: Page, number: usize, selected: bool, width: f64, sizing: PageSizing, ui: UiState) -> Element {
    let state = use_context::<EditorState>();
    let mut canvas_ref = use_signal(|| None::<Rc<MountedData>>);

    let size = view::page_size(width, &sizing);
    let canvas_style = view::canvas_style(&sizing);
    let font_px = 22.0 * width / 600.0;
    let class_name = if selected { "lookbook-page selected" } else { "lookbook-page" };

    let pid = page.id.clone();
    let down_pid = pid.clone();
    let drop_pid = pid.clone();

    rsx! {
        div {
            class: "lookbook-page-wrap",
            div { class: "lookbook-page-number", "Page {number}" }
            div {
                class: "{class_name}",
                "data-pid": "{pid}",
                style: "width: {size.width}px; height: {size.height}px; --text-size: {font_px}px;",
                div {
                    class: "lookbook-canvas",
                    style: "{canvas_style}",
                    onmounted: move |evt| canvas_ref.set(Some(evt.data())),
                    onmousedown: move |_| {
                        let result = state.with_editor(|editor, controller| controller.pointer_down_canvas(editor, &down_pid));
                        state.report(result);
                    },
                    ondragover: move |evt| evt.prevent_default(),
                    ondrop: move |evt| {
                        evt.prevent_default();
                        let point = evt.client_coordinates();
                        let Some((image_url, session)) = state.dragged.peek().clone() else {
                            return;
                        };
                        let Some(mounted) = canvas_ref.peek().clone() else {
                            return;
                        };
                        let page = drop_pid.clone();
                        spawn(async move {
                            let rect = match mounted.get_client_rect().await {
                                Ok(rect) => rect,
                                Err(err) => {
                                    warn!(error = ?err, "canvas not measurable, drop ignored");
                                    return;
                                }
                            };
                            let bounds = PixelBox::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height);
                            let (x, y) = geometry::client_point_to_percent(point.x, point.y, bounds);
                            let request = DropRequest { page, session, image_url, x, y, now_ms: js_sys::Date::now() };
                            let result = state.with_editor(|editor, controller| controller.drop_item(editor, request));
                            if let Some(outcome) = state.report(result) {
                                debug!(?outcome, "gallery drop");
                                if matches!(outcome, DropOutcome::Replaced(_) | DropOutcome::Created(_)) {
                                    let mut dragged = state.dragged;
                                    dragged.set(None);
                                }
                            }
                        });
                    },

                    for block in page.blocks.iter() {
                        {
                            let target = Some((page.id.clone(), block.id.clone()));
                            rsx! {
                                RenderBlock {
                                    key: "{block.id}",
                                    page: page.id.clone(),
                                    block: block.clone(),
                                    selected: ui.selected_block == target,
                                    editing: ui.editing == target,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RenderBlock(page: PageId, block: Block, selected: bool, editing: bool) -> Element {
    let mut state = use_context::<EditorState>();
    let mut node = use_signal(|| None::<Rc<MountedData>>);
    let style = view::block_style(block.rect, block.z);
    let kind = block.content.kind_name();
    let class_name = if selected { format!("lookbook-block {kind} selected") } else { format!("lookbook-block {kind}") };
    let is_image = block.content.is_image();
    let rect = block.rect;

    let (down_page, down_id) = (page.clone(), block.id.clone());
    let (edit_page, edit_id) = (page.clone(), block.id.clone());

    rsx! {
        div {
            class: "{class_name}",
            style: "{style}",
            tabindex: "-1",
            onmounted: move |evt| node.set(Some(evt.data())),
            onmousedown: move |evt| {
                evt.stop_propagation();
                if editing {
                    return;
                }
                evt.prevent_default();
                let point = evt.client_coordinates();
                let pointer = (point.x, point.y);
                let alt = evt.modifiers().contains(Modifiers::ALT);
                let canvas = state.canvas();
                let result = state.with_editor(|editor, controller| {
                    if alt && is_image {
                        let frame = geometry::rect_to_pixel_box(rect, canvas).size();
                        controller.begin_pan(editor, &down_page, &down_id, pointer, frame)
                    } else {
                        controller.begin_drag(editor, &down_page, &down_id, pointer)
                    }
                });
                state.report(result);
                // Default is prevented, so focus has to be moved by hand for the delete hotkey.
                if let Some(mounted) = node.peek().clone() {
                    spawn(async move {
                        let _ = mounted.set_focus(true).await;
                    });
                }
            },
            ondoubleclick: move |evt| {
                evt.stop_propagation();
                if is_image {
                    return;
                }
                let result = state.with_editor(|editor, controller| {
                    controller.cancel_gesture();
                    controller.begin_text_edit(editor, &edit_page, &edit_id)
                });
                if let Some(text) = state.report(result) {
                    state.draft.set(text);
                }
            },
            ondragstart: move |evt| evt.prevent_default(),

            match &block.content {
                BlockContent::Image(image) => {
                    let src = view::image_source(image, state.editor.read().resolver());
                    let img_style = view::image_style(image);
                    rsx! {
                        img { src: "{src}", style: "{img_style}", draggable: "false", alt: "" }
                    }
                }
                BlockContent::Text(text) => {
                    if editing {
                        rsx! { TextEditor {} }
                    } else {
                        let shown = view::text_display(text).to_string();
                        rsx! { div { class: "lookbook-text", "{shown}" } }
                    }
                }
            }

            if selected && !editing {
                SelectionOverlay { page: page.clone(), block: block.id.clone() }
            }
        }
    }
}

#[component]
fn TextEditor() -> Element {
    let mut state = use_context::<EditorState>();

    let commit = move || {
        let value = state.draft.peek().clone();
        let result = state.with_editor(|editor, controller| controller.commit_text_edit(editor, &value));
        state.report(result);
    };

    rsx! {
        textarea {
            class: "lookbook-text-input",
            value: "{state.draft}",
            onmounted: move |evt| async move {
                let _ = evt.set_focus(true).await;
            },
            onmousedown: move |evt| evt.stop_propagation(),
            oninput: move |evt| state.draft.set(evt.value()),
            onkeydown: move |evt| {
                evt.stop_propagation();
                if evt.key() == Key::Escape {
                    state.with_editor(|editor, controller| controller.cancel_text_edit(editor));
                } else if evt.key() == Key::Enter && evt.modifiers().contains(Modifiers::CONTROL) {
                    commit();
                }
            },
            onblur: move |_| commit(),
        }
    }
}

#[component]
fn SelectionOverlay(page: PageId, block: BlockId) -> Element {
    let state = use_context::<EditorState>();

    rsx! {
        div {
            class: "selection-overlay",
            for handle in ResizeHandle::ALL {
                {
                    let (page, block) = (page.clone(), block.clone());
                    rsx! {
                        div {
                            key: "{handle.css_class()}",
                            class: "resize-handle {handle.css_class()}",
                            onmousedown: move |evt| {
                                evt.stop_propagation();
                                evt.prevent_default();
                                let point = evt.client_coordinates();
                                let canvas = state.canvas();
                                let result = state.with_editor(|editor, controller| {
                                    controller.begin_resize(editor, &page, &block, handle, (point.x, point.y), canvas)
                                });
                                state.report(result);
                            },
                            onclick: move |evt| evt.stop_propagation(),
                        }
                    }
                }
            }
        }
    }
}
