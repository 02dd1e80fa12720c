/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Page-by-page export: capture each page as a raster, place every raster
//! full-bleed on its own output page.
//!
//! Captures run strictly one after another because hiding the editor chrome
//! is global state. Chrome is restored on every exit path, and the writer is
//! only finished once every page made it in, so failures produce no file.

use tracing::{info, warn};

use crate::error::ExportError;
use crate::model::{Document, Page};
use crate::readiness::Readiness;

pub const EXPORT_FILE_NAME: &str = "lookbook.pdf";

/// One captured page, JPEG encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterPage {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

#[allow(async_fn_in_trait)]
pub trait PageCapture {
    async fn capture(&mut self, page: &Page, index: usize) -> Result<RasterPage, ExportError>;
}

pub trait DocumentWriter {
    fn add_page(&mut self, raster: RasterPage) -> Result<(), ExportError>;
    fn finish(self) -> Result<Vec<u8>, ExportError>;
}

/// Editor UI that must not appear in captures.
pub trait Chrome {
    fn hide(&mut self);
    fn restore(&mut self);
}

/// For hosts that have nothing to hide.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoChrome;

impl Chrome for NoChrome {
    fn hide(&mut self) {}
    fn restore(&mut self) {}
}

struct ChromeGuard<'a, H: Chrome> {
    chrome: &'a mut H,
}

impl<'a, H: Chrome> ChromeGuard<'a, H> {
    fn hide(chrome: &'a mut H) -> Self {
        chrome.hide();
        Self { chrome }
    }
}

impl<H: Chrome> Drop for ChromeGuard<'_, H> {
    fn drop(&mut self) {
        self.chrome.restore();
    }
}

pub async fn export_document<C, W, H>(
    document: &Document,
    readiness: Readiness,
    capture: &mut C,
    mut writer: W,
    chrome: &mut H,
) -> Result<Vec<u8>, ExportError>
where
    C: PageCapture,
    W: DocumentWriter,
    H: Chrome,
{
    if !readiness.is_ready() {
        return Err(ExportError::Unavailable(match readiness {
            Readiness::Pending => "still loading".to_string(),
            _ => "capture library failed to load".to_string(),
        }));
    }
    let pages = document.pages();
    if pages.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    info!(pages = pages.len(), "export started");
    {
        let _guard = ChromeGuard::hide(chrome);
        for (index, page) in pages.iter().enumerate() {
            let raster = capture.capture(page, index).await.inspect_err(|err| {
                warn!(index, error = %err, "page capture failed, export aborted");
            })?;
            writer.add_page(raster)?;
        }
    }
    let bytes = writer.finish()?;
    info!(bytes = bytes.len(), "export finished");
    Ok(bytes)
}
