/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use lookbook_core::{DocumentWriter, ExportError, RasterPage};
use tracing::debug;

use crate::RenderError;

/// A4 portrait in points.
pub const A4_POINTS: (f32, f32) = (595.28, 841.89);

/// Writes each raster as a full-bleed JPEG on its own page.
pub struct PdfWriter {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    page_size: (f32, f32),
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::with_page_size(A4_POINTS)
    }

    pub fn with_page_size(page_size: (f32, f32)) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            page_size,
        }
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    fn push_page(&mut self, raster: RasterPage) -> Result<(), RenderError> {
        if raster.width == 0 || raster.height == 0 {
            return Err(RenderError::InvalidDimensions(format!("{}x{}", raster.width, raster.height)));
        }
        let (width_pt, height_pt) = self.page_size;

        let image_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(raster.width as i64)),
            ("Height", Object::Integer(raster.height as i64)),
            ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
            ("Filter", Object::Name(b"DCTDecode".to_vec())),
        ]);
        // Already DCT-compressed; never deflate on top.
        let image_id = self
            .doc
            .add_object(Stream::new(image_dict, raster.jpeg).with_compression(false));

        let mut xobjects = Dictionary::new();
        xobjects.set("Im0", Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let content = format!("q\n{width_pt} 0 0 {height_pt} 0 0 cm\n/Im0 Do\nQ\n");
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width_pt),
                    Object::Real(height_pt),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]);
        let page_id = self.doc.add_object(page_dict);
        self.kids.push(Object::Reference(page_id));
        debug!(page = self.kids.len(), "pdf page added");
        Ok(())
    }

    fn write(mut self) -> Result<Vec<u8>, RenderError> {
        if self.kids.is_empty() {
            return Err(RenderError::InvalidDimensions("document has no pages".into()));
        }
        let count = self.kids.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| RenderError::EncodingError(e.to_string()))?;
        Ok(bytes)
    }
}

impl DocumentWriter for PdfWriter {
    fn add_page(&mut self, raster: RasterPage) -> Result<(), ExportError> {
        Ok(self.push_page(raster)?)
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        Ok(self.write()?)
    }
}
