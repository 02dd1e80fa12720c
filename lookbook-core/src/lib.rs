/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod gallery;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod persist;
pub mod proxy;
pub mod readiness;
pub mod template;
pub mod view;
pub mod wardrobe;

#[cfg(feature = "rsx")]
pub mod html_renderer;

pub use config::{CaptureSettings, EditorConfig, PageSizing};
pub use editor::{Change, Editor, UiState};
pub use error::{EditorError, ExportError, StorageError};
pub use export::{Chrome, DocumentWriter, NoChrome, PageCapture, RasterPage, export_document};
pub use geometry::{GeometryLimits, PixelBox, PixelSize};
pub use interaction::{DragSessionId, DropOutcome, DropRequest, Gesture, InteractionController, ResizeHandle};
pub use model::{Block, BlockContent, BlockId, BlockPrototype, Document, FitMode, ImageContent, Page, PageId, Rect, TextContent};
pub use persist::{MemoryStorage, Storage};
pub use proxy::{ImageUrlResolver, Passthrough, RelayProxy};
pub use readiness::{Readiness, RetryPolicy, await_ready};
pub use template::TemplateSet;
pub use wardrobe::Wardrobe;
