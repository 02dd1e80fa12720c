/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Paints a page the way the editor shows it, without a browser.

use std::collections::{HashMap, HashSet};

use cosmic_text::{Align, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage, RgbaImage};
use lookbook_core::config::{CaptureSettings, PageSizing};
use lookbook_core::geometry::{self, PixelBox, PixelSize};
use lookbook_core::model::{BlockContent, FitMode, ImageContent, Page};
use lookbook_core::view::{self, PLACEHOLDER_FILL, PLACEHOLDER_INK, PLACEHOLDER_LABEL};
use lookbook_core::{ExportError, PageCapture, RasterPage};
use tiny_skia::*;
use tracing::{debug, warn};

use crate::RenderError;

const TEXT_INK: &str = "#111111";
const TEXT_PX: f32 = 22.0;
const PLACEHOLDER_PX: f32 = 16.0;

pub struct PageRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    resources: HashMap<String, Vec<u8>>,
    image_cache: HashMap<String, DynamicImage>,
    loaded_fonts: HashSet<String>,
    page_width: f64,
    sizing: PageSizing,
    capture: CaptureSettings,
}

impl Default for PageRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRasterizer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            resources: HashMap::new(),
            image_cache: HashMap::new(),
            loaded_fonts: HashSet::new(),
            page_width: 600.0,
            sizing: PageSizing::default(),
            capture: CaptureSettings::default(),
        }
    }

    /// Page width in CSS pixels before the capture scale is applied.
    pub fn with_page_width(mut self, width: f64) -> Self {
        self.page_width = width;
        self
    }

    pub fn with_sizing(mut self, sizing: PageSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_capture(mut self, capture: CaptureSettings) -> Self {
        self.capture = capture;
        self
    }

    /// Registers bytes for an image URL as it appears in block content.
    /// Font files (`.ttf`, `.otf`) are loaded into the font database instead.
    pub fn add_resource(&mut self, name: impl Into<String>, data: Vec<u8>) {
        let name = name.into();
        if name.ends_with(".ttf") || name.ends_with(".otf") {
            if self.loaded_fonts.insert(name.clone()) {
                self.font_system.db_mut().load_font_data(data);
                debug!(font = %name, "font loaded");
            }
            return;
        }
        self.image_cache.remove(&name);
        self.resources.insert(name, data);
    }

    pub fn output_size(&self) -> PixelSize {
        let scale = self.capture.effective_scale(1.0);
        view::page_size(self.page_width * scale, &self.sizing)
    }

    pub fn render_page(&mut self, page: &Page) -> Result<Pixmap, RenderError> {
        let size = self.output_size();
        let (width, height) = (size.width.round() as u32, size.height.round() as u32);
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::PixmapCreationError(format!("{width}x{height}")))?;
        pixmap.fill(Color::WHITE);

        let inset = self.sizing.safe_inset / 100.0;
        let origin = (size.width * inset, size.height * inset);
        let canvas = PixelSize::new(size.width * (1.0 - 2.0 * inset), size.height * (1.0 - 2.0 * inset));
        let scale = (size.width / self.page_width) as f32;

        for block in &page.blocks {
            let local = geometry::rect_to_pixel_box(block.rect, canvas);
            let frame = PixelBox::new(origin.0 + local.left, origin.1 + local.top, local.width, local.height);
            let Some(frame_rect) = to_skia_rect(frame) else {
                continue;
            };
            match &block.content {
                BlockContent::Image(image) => self.draw_image(&mut pixmap, image, frame_rect, scale)?,
                BlockContent::Text(text) => {
                    let ink = parse_color(TEXT_INK).unwrap_or(Color::BLACK);
                    self.draw_text(
                        &mut pixmap,
                        view::text_display(text),
                        frame_rect,
                        TEXT_PX * scale,
                        ink,
                        None,
                    );
                }
            }
        }
        Ok(pixmap)
    }

    pub fn render_jpeg(&mut self, page: &Page) -> Result<RasterPage, RenderError> {
        let pixmap = self.render_page(page)?;
        let (width, height) = (pixmap.width(), pixmap.height());
        let mut rgb = RgbImage::new(width, height);
        for (dst, src) in rgb.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgb([c.red(), c.green(), c.blue()]);
        }
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.capture.jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| RenderError::EncodingError(e.to_string()))?;
        Ok(RasterPage { width, height, jpeg })
    }

    fn decoded(&mut self, url: &str) -> Option<&DynamicImage> {
        if !self.image_cache.contains_key(url) {
            let bytes = self.resources.get(url)?;
            match image::load_from_memory(bytes) {
                Ok(decoded) => {
                    self.image_cache.insert(url.to_string(), decoded);
                }
                Err(e) => {
                    warn!(url, error = %e, "failed to decode image");
                    return None;
                }
            }
        }
        self.image_cache.get(url)
    }

    fn draw_image(
        &mut self,
        pixmap: &mut Pixmap,
        content: &ImageContent,
        frame: tiny_skia::Rect,
        scale: f32,
    ) -> Result<(), RenderError> {
        let source = if content.is_placeholder() {
            None
        } else {
            let url = content.url.trim().to_string();
            let found = self.decoded(&url).cloned();
            if found.is_none() {
                warn!(url = %url, "image resource missing, drawing placeholder");
            }
            found
        };
        let Some(source) = source else {
            self.draw_placeholder(pixmap, frame, scale);
            return Ok(());
        };

        let placed = fit_image(
            (source.width() as f32, source.height() as f32),
            frame,
            content.fit,
            (content.pos_x, content.pos_y),
        );
        let (target_w, target_h) = (placed.width().round() as u32, placed.height().round() as u32);
        if target_w == 0 || target_h == 0 {
            return Ok(());
        }
        let resized = source.resize_exact(target_w, target_h, image::imageops::FilterType::Triangle);
        let image_pixmap = to_pixmap(&resized.to_rgba8())
            .ok_or_else(|| RenderError::ImageError("image has invalid dimensions".into()))?;

        // The visible part is where the placed image and the frame overlap.
        let Some(visible) = placed.intersect(&frame) else {
            return Ok(());
        };
        let mut paint = Paint::default();
        paint.shader = Pattern::new(
            image_pixmap.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            1.0,
            Transform::from_translate(placed.x(), placed.y()),
        );
        paint.anti_alias = true;
        pixmap.fill_rect(visible, &paint, Transform::identity(), None);
        Ok(())
    }

    fn draw_placeholder(&mut self, pixmap: &mut Pixmap, frame: tiny_skia::Rect, scale: f32) {
        let mut paint = Paint::default();
        paint.set_color(parse_color(PLACEHOLDER_FILL).unwrap_or(Color::WHITE));
        pixmap.fill_rect(frame, &paint, Transform::identity(), None);

        let ink = parse_color(PLACEHOLDER_INK).unwrap_or(Color::BLACK);
        let font_px = PLACEHOLDER_PX * scale;
        let top = frame.y() + (frame.height() - font_px * 1.2).max(0.0) / 2.0;
        if let Some(line) = tiny_skia::Rect::from_xywh(frame.x(), top, frame.width(), font_px * 1.2) {
            self.draw_text(pixmap, PLACEHOLDER_LABEL, line, font_px, ink, Some(Align::Center));
        }
    }

    fn draw_text(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        frame: tiny_skia::Rect,
        font_px: f32,
        color: Color,
        align: Option<Align>,
    ) {
        let metrics = Metrics::new(font_px, font_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, Some(frame.width()), Some(frame.height()));
        let attrs = Attrs::new().family(Family::SansSerif).weight(Weight::BOLD);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, align);
        buffer.shape_until_scroll(&mut self.font_system, false);

        for run in buffer.layout_runs() {
            for glyph in run.glyphs {
                let physical = glyph.physical((0., 0.), 1.0);
                let Some(image) = self.swash_cache.get_image(&mut self.font_system, physical.cache_key) else {
                    continue;
                };
                let (width, height) = (image.placement.width, image.placement.height);
                if width == 0 || height == 0 {
                    continue;
                }
                let glyph_x = frame.x() + physical.x as f32 + image.placement.left as f32;
                let glyph_y = frame.y() + run.line_y + physical.y as f32 - image.placement.top as f32;

                let Some(glyph_pixmap) = glyph_to_pixmap(&image.data, width, height, color) else {
                    continue;
                };
                pixmap.draw_pixmap(
                    0,
                    0,
                    glyph_pixmap.as_ref(),
                    &PixmapPaint::default(),
                    Transform::from_translate(glyph_x, glyph_y),
                    None,
                );
            }
        }
    }
}

impl PageCapture for PageRasterizer {
    async fn capture(&mut self, page: &Page, index: usize) -> Result<RasterPage, ExportError> {
        self.render_jpeg(page).map_err(|e| ExportError::Capture {
            index,
            reason: e.to_string(),
        })
    }
}

fn to_skia_rect(b: PixelBox) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(b.left as f32, b.top as f32, b.width as f32, b.height as f32)
}

/// Where an image of `natural` size lands inside `frame`.
///
/// Contain scales to fit, cover scales to fill; the focal point picks how the
/// leftover space (or overflow) is split between the two sides.
fn fit_image(natural: (f32, f32), frame: tiny_skia::Rect, fit: FitMode, focal: (f32, f32)) -> tiny_skia::Rect {
    let sx = frame.width() / natural.0.max(1.0);
    let sy = frame.height() / natural.1.max(1.0);
    let scale = match fit {
        FitMode::Contain => sx.min(sy),
        FitMode::Cover => sx.max(sy),
    };
    let (w, h) = (natural.0 * scale, natural.1 * scale);
    let x = frame.x() + (frame.width() - w) * focal.0 / 100.0;
    let y = frame.y() + (frame.height() - h) * focal.1 / 100.0;
    tiny_skia::Rect::from_xywh(x, y, w, h).unwrap_or(frame)
}

fn premultiply(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let a_f = a as f32 / 255.0;
    [(r as f32 * a_f) as u8, (g as f32 * a_f) as u8, (b as f32 * a_f) as u8, a]
}

fn to_pixmap(rgba: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(rgba.width(), rgba.height())?;
    let pixels = rgba.pixels().flat_map(|p| premultiply(p[0], p[1], p[2], p[3])).collect();
    Pixmap::from_vec(pixels, size)
}

/// Swash hands out either an alpha mask or colour (emoji) pixels.
fn glyph_to_pixmap(data: &[u8], width: u32, height: u32, color: Color) -> Option<Pixmap> {
    let size = IntSize::from_wh(width, height)?;
    let area = (width * height) as usize;
    let pixels: Vec<u8> = if data.len() == area {
        data.iter()
            .flat_map(|mask| {
                let alpha = color.alpha() * (*mask as f32 / 255.0);
                [
                    (color.red() * alpha * 255.0) as u8,
                    (color.green() * alpha * 255.0) as u8,
                    (color.blue() * alpha * 255.0) as u8,
                    (alpha * 255.0) as u8,
                ]
            })
            .collect()
    } else if data.len() == area * 4 {
        data.chunks_exact(4)
            .flat_map(|c| premultiply(c[0], c[1], c[2], c[3]))
            .collect()
    } else {
        debug!(len = data.len(), "unknown glyph image format");
        return None;
    };
    Pixmap::from_vec(pixels, size)
}

fn parse_color(hex: &str) -> Option<Color> {
    if !hex.starts_with('#') || hex.len() != 7 {
        return None;
    }
    let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
    let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
    let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
    Some(Color::from_rgba8(r, g, b, 255))
}
