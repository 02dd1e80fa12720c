/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use thiserror::Error;

use crate::model::{BlockId, PageId};

/// User-facing notices. The editor shows the message and leaves state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("You must keep at least one page.")]
    LastPage,

    #[error("Unknown page: {0}")]
    UnknownPage(PageId),

    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),

    #[error("Block {0} is not a {1} block")]
    WrongBlockKind(BlockId, &'static str),

    #[error("Another gesture is already in progress")]
    GestureBusy,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("There's nothing to export yet.")]
    NothingToExport,

    #[error("PDF libraries not available: {0}")]
    Unavailable(String),

    #[error("Capturing page {index} failed: {reason}")]
    Capture { index: usize, reason: String },

    #[error("Writing the document failed: {0}")]
    Writer(String),
}
