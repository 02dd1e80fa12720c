/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Native export collaborators: a page rasterizer and a PDF writer.

use lookbook_core::ExportError;
use thiserror::Error;

pub mod pdf;
#[cfg(feature = "raster")]
pub mod raster;

pub use pdf::PdfWriter;
#[cfg(feature = "raster")]
pub use raster::PageRasterizer;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create pixmap: {0}")]
    PixmapCreationError(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Image decoding error: {0}")]
    ImageError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),
}

impl From<RenderError> for ExportError {
    fn from(err: RenderError) -> Self {
        ExportError::Writer(err.to_string())
    }
}
