/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Browser side of the export: html2canvas captures, chrome hiding and the
//! final download.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;
use lookbook_core::{Chrome, ExportError, Page, PageCapture, RasterPage};
use serde::Deserialize;

pub const HTML2CANVAS_SRC: &str = "https://cdnjs.cloudflare.com/ajax/libs/html2canvas/1.4.1/html2canvas.min.js";

/// Class on `<body>` that hides sidebars, toolbars and selection marks.
pub const EXPORT_MODE_CLASS: &str = "export-mode";

pub async fn capture_library_loaded() -> bool {
    document::eval("return typeof window.html2canvas === 'function';")
        .join::<bool>()
        .await
        .unwrap_or(false)
}

pub async fn sleep(duration: Duration) {
    let ms = duration.as_millis();
    let _ = document::eval(&format!("await new Promise(r => setTimeout(r, {ms})); return true;"))
        .join::<bool>()
        .await;
}

pub fn device_pixel_ratio() -> f64 {
    web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

pub fn viewport_height() -> Option<f64> {
    web_sys::window()?.inner_height().ok()?.as_f64()
}

#[derive(Deserialize)]
struct CaptureReply {
    data: String,
    width: u32,
    height: u32,
}

/// Screenshots the rendered `[data-pid]` element of each page.
pub struct HtmlCanvasCapture {
    scale: f64,
    quality: f64,
}

impl HtmlCanvasCapture {
    pub fn new(scale: f64, jpeg_quality: u8) -> Self {
        Self {
            scale,
            quality: f64::from(jpeg_quality) / 100.0,
        }
    }

    fn script(&self, page: &Page) -> Result<String, serde_json::Error> {
        let pid = serde_json::to_string(page.id.as_str())?;
        Ok(format!(
            r##"
            const el = document.querySelector('[data-pid="' + CSS.escape({pid}) + '"]');
            if (!el) throw new Error("page is not on screen");
            const canvas = await window.html2canvas(el, {{
                scale: {scale},
                useCORS: true,
                allowTaint: false,
                backgroundColor: "#ffffff",
                logging: false,
            }});
            return {{ data: canvas.toDataURL("image/jpeg", {quality}), width: canvas.width, height: canvas.height }};
            "##,
            scale = self.scale,
            quality = self.quality,
        ))
    }
}

impl PageCapture for HtmlCanvasCapture {
    async fn capture(&mut self, page: &Page, index: usize) -> Result<RasterPage, ExportError> {
        let fail = |reason: String| ExportError::Capture { index, reason };
        let script = self.script(page).map_err(|e| fail(e.to_string()))?;
        let reply = document::eval(&script)
            .join::<CaptureReply>()
            .await
            .map_err(|e| fail(e.to_string()))?;
        let encoded = reply
            .data
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| fail("capture returned no image".into()))?;
        let jpeg = STANDARD.decode(encoded).map_err(|e| fail(e.to_string()))?;
        debug!(index, width = reply.width, height = reply.height, "page captured");
        Ok(RasterPage {
            width: reply.width,
            height: reply.height,
            jpeg,
        })
    }
}

/// Toggles [`EXPORT_MODE_CLASS`] on the document body.
#[derive(Default)]
pub struct BodyClassChrome;

impl Chrome for BodyClassChrome {
    fn hide(&mut self) {
        document::eval(&format!("document.body.classList.add('{EXPORT_MODE_CLASS}');"));
    }

    fn restore(&mut self) {
        document::eval(&format!("document.body.classList.remove('{EXPORT_MODE_CLASS}');"));
    }
}

/// Hands the finished file to the browser as a download.
pub async fn download(bytes: &[u8], file_name: &str, mime: &str) {
    let href = serde_json::to_string(&format!("data:{mime};base64,{}", STANDARD.encode(bytes)));
    let name = serde_json::to_string(file_name);
    let (Ok(href), Ok(name)) = (href, name) else {
        warn!("download link could not be built");
        return;
    };
    let script = format!(
        "const a = document.createElement('a'); a.href = {href}; a.download = {name}; \
         document.body.appendChild(a); a.click(); a.remove(); return true;"
    );
    if let Err(err) = document::eval(&script).join::<bool>().await {
        warn!(error = %err, "download failed");
    }
}
