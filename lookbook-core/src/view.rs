/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Pure projection from model values to the strings a DOM view needs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::PageSizing;
use crate::geometry::PixelSize;
use crate::model::{FitMode, ImageContent, Rect, TextContent};
use crate::proxy::ImageUrlResolver;

pub const DEFAULT_TEXT: &str = "Your text";
pub const PLACEHOLDER_LABEL: &str = "Drop here";
pub const PLACEHOLDER_FILL: &str = "#f0f2f4";
pub const PLACEHOLDER_INK: &str = "#9aa1a8";

pub fn block_style(rect: Rect, z: i32) -> String {
    format!(
        "position: absolute; left: {}%; top: {}%; width: {}%; height: {}%; z-index: {};",
        rect.x, rect.y, rect.w, rect.h, z
    )
}

pub fn fit_css(fit: FitMode) -> &'static str {
    match fit {
        FitMode::Contain => "contain",
        FitMode::Cover => "cover",
    }
}

pub fn image_style(content: &ImageContent) -> String {
    format!(
        "width: 100%; height: 100%; object-fit: {}; object-position: {}% {}%;",
        fit_css(content.fit),
        content.pos_x,
        content.pos_y
    )
}

/// Where the `<img>` loads from: the resolved URL, or the placeholder graphic.
pub fn image_source(content: &ImageContent, resolver: &dyn ImageUrlResolver) -> String {
    if content.is_placeholder() {
        placeholder_svg(PLACEHOLDER_LABEL)
    } else {
        resolver.resolve(content.url.trim())
    }
}

fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Inline SVG data URI with a centred label.
pub fn placeholder_svg(label: &str) -> String {
    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300" viewBox="0 0 400 300">"#,
            r#"<rect width="100%" height="100%" fill="{fill}"/>"#,
            r#"<text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" "#,
            r#"font-family="sans-serif" font-size="22" fill="{ink}">{label}</text></svg>"#
        ),
        fill = PLACEHOLDER_FILL,
        ink = PLACEHOLDER_INK,
        label = escape_markup(label),
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

pub fn text_display(content: &TextContent) -> &str {
    if content.text.is_empty() { DEFAULT_TEXT } else { &content.text }
}

/// On-screen page width for a viewport height and the editor column width.
pub fn page_width_px(viewport_height: f64, column_width: f64, sizing: &PageSizing) -> f64 {
    let usable_height = (viewport_height - sizing.chrome_padding).max(sizing.min_usable_height);
    let by_height = usable_height / sizing.aspect;
    let stage = (column_width - sizing.stage_padding).max(sizing.min_stage_width);
    by_height.min(stage).max(sizing.min_width).min(sizing.max_width)
}

pub fn page_size(page_width: f64, sizing: &PageSizing) -> PixelSize {
    PixelSize::new(page_width, page_width * sizing.aspect)
}

/// The droppable canvas: the page minus its safe inset on every side.
pub fn canvas_size(page_width: f64, sizing: &PageSizing) -> PixelSize {
    let page = page_size(page_width, sizing);
    let keep = 1.0 - 2.0 * sizing.safe_inset / 100.0;
    PixelSize::new(page.width * keep, page.height * keep)
}

pub fn canvas_style(sizing: &PageSizing) -> String {
    let inset = sizing.safe_inset;
    format!("position: absolute; left: {inset}%; top: {inset}%; right: {inset}%; bottom: {inset}%;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::RelayProxy;

    #[test]
    fn block_style_is_percent_based() {
        assert_eq!(
            block_style(Rect::new(10.0, 12.5, 40.0, 30.0), 1),
            "position: absolute; left: 10%; top: 12.5%; width: 40%; height: 30%; z-index: 1;"
        );
    }

    #[test]
    fn image_style_carries_fit_and_focal_point() {
        let mut content = ImageContent::with_url("a.png");
        content.fit = FitMode::Cover;
        content.pos_x = 20.0;
        assert_eq!(
            image_style(&content),
            "width: 100%; height: 100%; object-fit: cover; object-position: 20% 50%;"
        );
    }

    #[test]
    fn empty_image_uses_placeholder() {
        let proxy = RelayProxy::new("/api/proxy");
        let source = image_source(&ImageContent::empty(), &proxy);
        let encoded = source.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains(">Drop here</text>"));
        assert!(svg.contains(PLACEHOLDER_FILL));

        let source = image_source(&ImageContent::with_url("https://x.example/a.png"), &proxy);
        assert!(source.starts_with("/api/proxy?url="));
    }

    #[test]
    fn placeholder_escapes_markup() {
        let encoded = placeholder_svg("<b>");
        let svg = String::from_utf8(STANDARD.decode(&encoded["data:image/svg+xml;base64,".len()..]).unwrap()).unwrap();
        assert!(svg.contains("&lt;b&gt;"));
    }

    #[test]
    fn empty_text_shows_default() {
        assert_eq!(text_display(&TextContent::default()), DEFAULT_TEXT);
        assert_eq!(text_display(&TextContent { text: "Hi".into() }), "Hi");
    }

    #[test]
    fn page_width_follows_height_then_clamps() {
        let sizing = PageSizing::default();
        // Tall window, narrow column: column wins.
        assert_eq!(page_width_px(2000.0, 516.0, &sizing), 500.0);
        // Short window: height wins, floored at the minimum width.
        assert_eq!(page_width_px(300.0, 1200.0, &sizing), 260.0);
        // Huge everything: capped.
        assert_eq!(page_width_px(5000.0, 5000.0, &sizing), 900.0);
    }

    #[test]
    fn canvas_excludes_safe_inset() {
        let sizing = PageSizing::default();
        let canvas = canvas_size(500.0, &sizing);
        assert!((canvas.width - 470.0).abs() < 1e-9);
        assert!((canvas.height - 500.0 * 1.4142 * 0.94).abs() < 1e-9);
    }
}
