/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use dioxus::prelude::*;

use crate::config::PageSizing;
use crate::model::{BlockContent, Page};
use crate::proxy::ImageUrlResolver;
use crate::view;

/// Static, non-interactive rendering of one page at `width` pixels.
pub fn render_page_to_rsx(page: &Page, width: f64, sizing: &PageSizing, resolver: &dyn ImageUrlResolver) -> Element {
    let size = view::page_size(width, sizing);
    let container_style = format!(
        "position: relative; width: {}px; height: {}px; background: #fff; overflow: hidden;",
        size.width, size.height
    );
    let canvas_style = view::canvas_style(sizing);
    // Text scales with the page so thumbnails keep their proportions.
    let font_px = 22.0 * width / 600.0;

    rsx! {
        div {
            class: "lookbook-page-preview",
            style: "{container_style}",
            div {
                style: "{canvas_style}",
                for block in page.blocks.iter() {
                    {
                        let style = view::block_style(block.rect, block.z);
                        match &block.content {
                            BlockContent::Image(image) => {
                                let src = view::image_source(image, resolver);
                                let img_style = view::image_style(image);
                                rsx! {
                                    div { key: "{block.id}", style: "{style} overflow: hidden;",
                                        img { src: "{src}", style: "{img_style}", draggable: "false" }
                                    }
                                }
                            }
                            BlockContent::Text(text) => {
                                let shown = view::text_display(text).to_string();
                                rsx! {
                                    div {
                                        key: "{block.id}",
                                        style: "{style} font-weight: 700; font-size: {font_px}px; white-space: pre-wrap;",
                                        "{shown}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
