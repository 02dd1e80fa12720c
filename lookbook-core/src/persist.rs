/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! String-keyed storage and the document codec on top of it.
//!
//! Loading never fails: missing or corrupt data yields a fresh document,
//! which means an unreadable save is silently replaced on the next write.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::model::Document;

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn encode_document(document: &Document) -> Result<String, StorageError> {
    Ok(serde_json::to_string(document)?)
}

pub fn decode_document(raw: &str) -> Result<Document, StorageError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load_document<S: Storage + ?Sized>(storage: &S, key: &str) -> Document {
    let raw = match storage.get(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            debug!(key, "no saved lookbook, starting fresh");
            return Document::new();
        }
        Err(err) => {
            warn!(key, error = %err, "storage read failed, starting fresh");
            return Document::new();
        }
    };
    match decode_document(&raw) {
        Ok(document) => {
            debug!(key, pages = document.pages().len(), "lookbook loaded");
            document
        }
        Err(err) => {
            warn!(key, error = %err, "saved lookbook unreadable, starting fresh");
            Document::new()
        }
    }
}

pub fn save_document<S: Storage + ?Sized>(
    storage: &mut S,
    key: &str,
    document: &Document,
) -> Result<(), StorageError> {
    let raw = encode_document(document)?;
    storage.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryLimits;
    use crate::model::{BlockContent, BlockPrototype, FitMode, ImageContent, Rect};

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn round_trip_preserves_structure() {
        let limits = GeometryLimits::default();
        let mut document = Document::new();
        let first = document.pages()[0].id.clone();
        document
            .add_block(
                &first,
                BlockPrototype::new(
                    Rect::new(12.5, 7.25, 33.3, 41.0),
                    BlockContent::Image(ImageContent {
                        url: "/api/proxy?url=x".into(),
                        fit: FitMode::Cover,
                        pos_x: 12.0,
                        pos_y: 88.5,
                    }),
                ),
                &limits,
            )
            .unwrap();
        document.create_page(
            vec![BlockPrototype::new(Rect::new(0.0, 0.0, 50.0, 10.0), BlockContent::text("a\nb"))],
            &limits,
        );

        let mut storage = MemoryStorage::new();
        save_document(&mut storage, "lookbook", &document).unwrap();
        let loaded = load_document(&storage, "lookbook");
        assert_eq!(loaded, document);
    }

    #[test]
    fn missing_or_corrupt_data_yields_fresh_document() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_document(&storage, "lookbook").pages().len(), 1);

        storage.set("lookbook", "{not json").unwrap();
        let document = load_document(&storage, "lookbook");
        assert_eq!(document.pages().len(), 1);
        assert!(document.pages()[0].blocks.is_empty());

        storage.set("lookbook", "null").unwrap();
        assert_eq!(load_document(&storage, "lookbook").pages().len(), 1);

        assert_eq!(load_document(&BrokenStorage, "lookbook").pages().len(), 1);
    }
}
