/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Percent-space rectangle math. Everything here is pure.

use serde::{Deserialize, Serialize};

use crate::model::{Block, Rect};

pub const MIN_BLOCK_WIDTH: f32 = 8.0;
pub const MIN_BLOCK_HEIGHT: f32 = 8.0;

/// ISO A-series portrait ratio, height = width * ratio.
pub const A4_RATIO: f64 = 1.4142;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeometryLimits {
    pub min_w: f32,
    pub min_h: f32,
}

impl Default for GeometryLimits {
    fn default() -> Self {
        Self {
            min_w: MIN_BLOCK_WIDTH,
            min_h: MIN_BLOCK_HEIGHT,
        }
    }
}

fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// Size first, then position, so an oversized rect shrinks before it moves.
pub fn clamp_rect(rect: Rect, limits: &GeometryLimits) -> Rect {
    let w = clamp(rect.w, limits.min_w, 100.0);
    let h = clamp(rect.h, limits.min_h, 100.0);
    let x = clamp(rect.x, 0.0, 100.0 - w);
    let y = clamp(rect.y, 0.0, 100.0 - h);
    Rect { x, y, w, h }
}

pub fn translate(rect: Rect, dx: f32, dy: f32, limits: &GeometryLimits) -> Rect {
    clamp_rect(
        Rect {
            x: rect.x + dx,
            y: rect.y + dy,
            ..rect
        },
        limits,
    )
}

pub fn resize_to(proposed: Rect, limits: &GeometryLimits) -> Rect {
    clamp_rect(proposed, limits)
}

/// Topmost block containing the point. Later blocks paint over earlier ones.
pub fn hit_test(blocks: &[Block], x: f32, y: f32) -> Option<&Block> {
    blocks.iter().rev().find(|b| b.rect.contains(x, y))
}

/// Topmost image block containing the point; text blocks are transparent to drops.
pub fn image_block_at(blocks: &[Block], x: f32, y: f32) -> Option<&Block> {
    blocks
        .iter()
        .rev()
        .filter(|b| b.content.is_image())
        .find(|b| b.rect.contains(x, y))
}

/// Pixel size of a rendered element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Absolute pixel box, e.g. a bounding client rect.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }
}

pub fn pixel_delta_to_percent(dx: f64, dy: f64, container: PixelSize) -> (f32, f32) {
    if container.is_degenerate() {
        return (0.0, 0.0);
    }
    (
        (dx / container.width * 100.0) as f32,
        (dy / container.height * 100.0) as f32,
    )
}

/// Converts a box given relative to the container origin into percent space.
pub fn pixel_box_to_rect(bounds: PixelBox, container: PixelSize) -> Option<Rect> {
    if container.is_degenerate() {
        return None;
    }
    Some(Rect {
        x: (bounds.left / container.width * 100.0) as f32,
        y: (bounds.top / container.height * 100.0) as f32,
        w: (bounds.width / container.width * 100.0) as f32,
        h: (bounds.height / container.height * 100.0) as f32,
    })
}

pub fn rect_to_pixel_box(rect: Rect, container: PixelSize) -> PixelBox {
    PixelBox {
        left: rect.x as f64 / 100.0 * container.width,
        top: rect.y as f64 / 100.0 * container.height,
        width: rect.w as f64 / 100.0 * container.width,
        height: rect.h as f64 / 100.0 * container.height,
    }
}

/// Client coordinates to a percent point inside `container`, clamped to the canvas.
pub fn client_point_to_percent(client_x: f64, client_y: f64, container: PixelBox) -> (f32, f32) {
    if container.size().is_degenerate() {
        return (0.0, 0.0);
    }
    let x = ((client_x - container.left) / container.width * 100.0) as f32;
    let y = ((client_y - container.top) / container.height * 100.0) as f32;
    (clamp(x, 0.0, 100.0), clamp(y, 0.0, 100.0))
}

/// Rect of `size` centred on a point, clamped onto the page.
pub fn rect_centered_at(x: f32, y: f32, w: f32, h: f32, limits: &GeometryLimits) -> Rect {
    clamp_rect(
        Rect {
            x: x - w / 2.0,
            y: y - h / 2.0,
            w,
            h,
        },
        limits,
    )
}
