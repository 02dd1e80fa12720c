/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

#![allow(non_snake_case)]

mod capture;
mod gallery;
mod page;
mod storage;

use std::fmt::Display;

use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use lookbook_core::export::EXPORT_FILE_NAME;
use lookbook_core::gallery::SourceItem;
use lookbook_core::{
    DragSessionId, Editor, EditorConfig, InteractionController, PixelSize, Readiness, Wardrobe, await_ready,
    export_document, view,
};
use lookbook_render::PdfWriter;

pub use capture::{BodyClassChrome, HtmlCanvasCapture};
pub use storage::LocalStorage;

use crate::gallery::Gallery;
use crate::page::PageView;

const MAIN_CSS: Asset = asset!("/assets/lookbook.css");
const TEMPLATE_PICKER_ID: &str = "lookbook-template-picker";

/// Shared editor state, handed to child components through context.
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct EditorState {
    pub editor: Signal<Editor<LocalStorage>>,
    pub controller: Signal<InteractionController>,
    pub wardrobe: Signal<Wardrobe<LocalStorage>>,
    pub notice: Signal<Option<String>>,
    /// Gallery item being dragged and the session that drag belongs to.
    pub dragged: Signal<Option<(String, DragSessionId)>>,
    /// Inline text editor contents.
    pub draft: Signal<String>,
    pub page_width: Signal<f64>,
    pub readiness: Signal<Readiness>,
}

impl EditorState {
    pub fn with_editor<R>(self, f: impl FnOnce(&mut Editor<LocalStorage>, &mut InteractionController) -> R) -> R {
        let mut editor = self.editor;
        let mut controller = self.controller;
        let mut editor = editor.write();
        let mut controller = controller.write();
        f(&mut editor, &mut controller)
    }

    /// Shows a failed operation as a notice.
    pub fn report<T, E: Display>(self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(error = %err, "operation refused");
                let mut notice = self.notice;
                notice.set(Some(err.to_string()));
                None
            }
        }
    }

    /// Pixel size of the droppable canvas on every page.
    pub fn canvas(self) -> PixelSize {
        let sizing = self.editor.peek().config().sizing;
        view::canvas_size(*self.page_width.peek(), &sizing)
    }
}

#[component]
pub fn LookbookEditor(
    #[props(default)] config: EditorConfig,
    /// Host-supplied drag sources; the wardrobe is used when absent.
    #[props(default)]
    items: Option<Vec<SourceItem>>,
) -> Element {
    let initial = config.clone();
    let editor = use_signal(move || Editor::open(LocalStorage, initial));
    let controller = use_signal(|| InteractionController::new(&config));
    let wardrobe = use_signal(|| Wardrobe::open(LocalStorage));
    let mut notice = use_signal(|| None::<String>);
    let dragged = use_signal(|| None::<(String, DragSessionId)>);
    let draft = use_signal(String::new);
    let mut page_width = use_signal(|| 600.0);
    let mut readiness = use_signal(|| Readiness::Pending);
    let mut exporting = use_signal(|| false);

    let state = use_context_provider(|| EditorState {
        editor,
        controller,
        wardrobe,
        notice,
        dragged,
        draft,
        page_width,
        readiness,
    });

    use_future(move || async move {
        let policy = editor.peek().config().retry_policy();
        let result = await_ready("html2canvas", capture::capture_library_loaded, capture::sleep, policy).await;
        if !result.is_ready() {
            notice.set(Some("PDF export is unavailable: the capture library did not load.".into()));
        }
        readiness.set(result);
    });

    let export = move |_| async move {
        if *exporting.peek() {
            return;
        }
        exporting.set(true);
        state.with_editor(|editor, controller| {
            controller.cancel_gesture();
            editor.clear_block_selection();
        });
        let (snapshot, settings) = {
            let editor = editor.peek();
            (editor.document().clone(), editor.config().capture)
        };
        let scale = settings.effective_scale(capture::device_pixel_ratio());
        let mut html_capture = HtmlCanvasCapture::new(scale, settings.jpeg_quality);
        let ready = *readiness.peek();
        info!(pages = snapshot.pages().len(), scale, "exporting lookbook");
        let result =
            export_document(&snapshot, ready, &mut html_capture, PdfWriter::new(), &mut BodyClassChrome).await;
        if let Some(bytes) = state.report(result) {
            capture::download(&bytes, EXPORT_FILE_NAME, "application/pdf").await;
        }
        exporting.set(false);
    };

    let editor_ref = editor.read();
    let sizing = editor_ref.config().sizing;
    let selected_page = editor_ref.ui().selected_page.clone();
    let template_names: Vec<(String, String)> = editor_ref
        .templates()
        .names()
        .map(|(name, label)| (name.to_string(), label.to_string()))
        .collect();
    let pages = editor_ref.document().pages().to_vec();
    let ui = editor_ref.ui().clone();
    drop(editor_ref);
    let width = page_width();

    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        document::Script { src: capture::HTML2CANVAS_SRC }
        div {
            class: "lookbook-editor",
            tabindex: "0",
            onkeydown: move |evt| {
                if evt.key() == Key::Delete || evt.key() == Key::Backspace {
                    let result = state.with_editor(|editor, _| editor.remove_selected_block());
                    state.report(result);
                    evt.prevent_default();
                }
            },
            onmousemove: move |evt| {
                if state.controller.peek().is_idle() {
                    return;
                }
                let point = evt.client_coordinates();
                let canvas = state.canvas();
                let result = state.with_editor(|editor, controller| {
                    controller.pointer_move(editor, (point.x, point.y), canvas)
                });
                state.report(result);
            },
            onmouseup: move |_| {
                state.with_editor(|_, controller| controller.end_gesture());
            },
            onmouseleave: move |_| {
                state.with_editor(|_, controller| controller.cancel_gesture());
            },

            div {
                class: "lookbook-toolbar",
                select {
                    id: TEMPLATE_PICKER_ID,
                    onkeydown: move |evt| evt.stop_propagation(),
                    onchange: move |evt| {
                        let name = evt.value();
                        if name.is_empty() {
                            return;
                        }
                        let result = state.with_editor(|editor, _| editor.apply_template_to_selection(&name));
                        state.report(result);
                        // Back to the placeholder so the same template can be picked again.
                        document::eval(&format!("document.getElementById('{TEMPLATE_PICKER_ID}').value = '';"));
                    },
                    option { value: "", "Apply template…" }
                    for (name, label) in template_names.iter() {
                        option { key: "{name}", value: "{name}", "{label}" }
                    }
                }
                button {
                    class: "primary-btn",
                    onclick: move |_| {
                        state.with_editor(|editor, _| editor.add_blank_page());
                    },
                    "Add page"
                }
                button {
                    class: "action-btn danger",
                    onclick: move |_| {
                        let result = state.with_editor(|editor, _| editor.delete_selected_page());
                        state.report(result);
                    },
                    "Delete page"
                }
                button {
                    class: "primary-btn",
                    disabled: exporting(),
                    onclick: export,
                    if exporting() { "Exporting…" } else { "Export PDF" }
                }
            }

            if let Some(message) = notice() {
                div {
                    class: "lookbook-notice",
                    span { "{message}" }
                    button { onclick: move |_| notice.set(None), "Dismiss" }
                }
            }

            div {
                class: "lookbook-body",
                Gallery { items: items.clone() }
                div {
                    class: "lookbook-stage",
                    onresize: move |evt| {
                        if let Ok(size) = evt.get_content_box_size() {
                            let sizing = state.editor.peek().config().sizing;
                            let viewport = capture::viewport_height().unwrap_or(size.height);
                            page_width.set(view::page_width_px(viewport, size.width, &sizing));
                        }
                    },
                    for (index, page) in pages.into_iter().enumerate() {
                        PageView {
                            key: "{page.id}",
                            selected: selected_page.as_ref() == Some(&page.id),
                            number: index + 1,
                            width,
                            sizing,
                            ui: ui.clone(),
                            page,
                        }
                    }
                }
            }
        }
    }
}
