/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Exports a saved lookbook to PDF.
//!
//! ```text
//! cargo run -p lookbook-render --example export_lookbook -- saved.json out.pdf /img/a.png=./a.png
//! ```
//!
//! `saved.json` holds the value stored under the `lookbook` key. Each
//! `url=path` pair maps an image URL used in the document to a local file.

use std::error::Error;

use lookbook_core::persist::decode_document;
use lookbook_core::readiness::Readiness;
use lookbook_core::{NoChrome, export_document};
use lookbook_render::{PageRasterizer, PdfWriter};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        return Err("usage: export_lookbook <saved.json> <out.pdf> [url=path ...]".into());
    };

    let document = decode_document(&std::fs::read_to_string(&input)?)?;
    let mut rasterizer = PageRasterizer::new();
    for pair in args {
        let Some((url, path)) = pair.split_once('=') else {
            return Err(format!("expected url=path, got {pair}").into());
        };
        rasterizer.add_resource(url, std::fs::read(path)?);
    }

    let started = std::time::Instant::now();
    let bytes = export_document(&document, Readiness::Ready, &mut rasterizer, PdfWriter::new(), &mut NoChrome).await?;
    std::fs::write(&output, &bytes)?;
    info!(
        pages = document.pages().len(),
        bytes = bytes.len(),
        elapsed = ?started.elapsed(),
        output = %output,
        "lookbook exported"
    );
    Ok(())
}
