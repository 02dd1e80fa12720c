/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use dioxus::prelude::*;
use lookbook_core::gallery::{self, SourceItem};
use lookbook_core::html_renderer::render_page_to_rsx;
use lookbook_core::{BlockContent, DragSessionId};

use crate::EditorState;

const THUMB_WIDTH: f64 = 84.0;

#[component]
pub(crate) fn Gallery(items: Option<Vec<SourceItem>>) -> Element {
    let mut state = use_context::<EditorState>();

    let editor = state.editor.read();
    let sources = match items {
        Some(items) => items,
        None => gallery::items_from_urls(state.wardrobe.read().all().iter().cloned(), editor.resolver()),
    };
    let sizing = editor.config().sizing;
    let selected_page = editor.ui().selected_page.clone();
    let pages = editor.document().pages().to_vec();
    // Image of the selected block, for the wardrobe toggle.
    let selected_image = editor.ui().selected_block.as_ref().and_then(|(page, block)| {
        match &editor.block(page, block)?.content {
            BlockContent::Image(image) if !image.is_placeholder() => Some(image.url.clone()),
            _ => None,
        }
    });
    let thumbs: Vec<_> = pages
        .iter()
        .map(|page| (page.id.clone(), render_page_to_rsx(page, THUMB_WIDTH, &sizing, editor.resolver())))
        .collect();
    drop(editor);
    let saved = selected_image
        .as_deref()
        .is_some_and(|url| state.wardrobe.read().is_saved(url));

    rsx! {
        div {
            class: "lookbook-sidebar",
            h3 { "Looks" }
            if sources.is_empty() {
                div { class: "empty-state", "Saved looks appear here." }
            }
            div {
                class: "lookbook-gallery",
                for item in sources.into_iter() {
                    {
                        let drag_url = item.image_url.clone();
                        let add_url = item.image_url.clone();
                        let page_url = item.image_url.clone();
                        rsx! {
                            div {
                                key: "{item.id}",
                                class: "lookbook-source",
                                title: "{item.name}",
                                img {
                                    src: "{item.image_url}",
                                    draggable: "true",
                                    ondragstart: move |_| {
                                        state.dragged.set(Some((drag_url.clone(), DragSessionId::generate())));
                                    },
                                    ondragend: move |_| state.dragged.set(None),
                                    ondoubleclick: move |_| {
                                        let result = state.with_editor(|editor, _| editor.add_image_to_last_page(&add_url));
                                        state.report(result);
                                    },
                                }
                                button {
                                    class: "icon-btn",
                                    title: "New page from this look",
                                    onclick: move |_| {
                                        state.with_editor(|editor, _| editor.add_generated_image(&page_url));
                                    },
                                    "+"
                                }
                            }
                        }
                    }
                }
            }

            if let Some(url) = selected_image {
                button {
                    class: "action-btn",
                    onclick: move |_| {
                        state.wardrobe.write().toggle(&url);
                    },
                    if saved { "Remove from wardrobe" } else { "Save to wardrobe" }
                }
            }

            h3 { "Pages" }
            div {
                class: "lookbook-page-strip",
                for (pid, thumb) in thumbs.into_iter() {
                    {
                        let class_name = if selected_page.as_ref() == Some(&pid) { "page-thumb selected" } else { "page-thumb" };
                        let target = pid.clone();
                        rsx! {
                            div {
                                key: "{pid}",
                                class: "{class_name}",
                                onclick: move |_| {
                                    let result = state.with_editor(|editor, _| editor.select_page(&target, true));
                                    state.report(result);
                                },
                                {thumb}
                            }
                        }
                    }
                }
            }
        }
    }
}
