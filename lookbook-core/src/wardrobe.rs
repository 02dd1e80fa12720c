/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use tracing::warn;

use crate::persist::Storage;

pub const WARDROBE_KEY: &str = "sogni-wardrobe.saved";

/// Saved looks: an insertion-ordered set of image URLs.
pub struct Wardrobe<S: Storage> {
    storage: S,
    key: String,
    urls: Vec<String>,
}

impl<S: Storage> Wardrobe<S> {
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, WARDROBE_KEY)
    }

    pub fn open_with_key(storage: S, key: &str) -> Self {
        let urls = match storage.get(key) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "wardrobe unreadable, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "wardrobe storage unavailable");
                Vec::new()
            }
        };
        let mut wardrobe = Self {
            storage,
            key: key.to_string(),
            urls: Vec::new(),
        };
        for url in urls {
            if !wardrobe.urls.contains(&url) {
                wardrobe.urls.push(url);
            }
        }
        wardrobe
    }

    pub fn all(&self) -> &[String] {
        &self.urls
    }

    pub fn is_saved(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    pub fn save(&mut self, url: &str) {
        if !self.is_saved(url) {
            self.urls.push(url.to_string());
            self.persist();
        }
    }

    pub fn remove(&mut self, url: &str) {
        let before = self.urls.len();
        self.urls.retain(|u| u != url);
        if self.urls.len() != before {
            self.persist();
        }
    }

    /// Returns whether the URL is saved afterwards.
    pub fn toggle(&mut self, url: &str) -> bool {
        if self.is_saved(url) {
            self.remove(url);
            false
        } else {
            self.save(url);
            true
        }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.urls)
            .map_err(Into::into)
            .and_then(|raw| self.storage.set(&self.key, &raw));
        if let Err(err) = result {
            warn!(error = %err, "wardrobe save failed");
        }
    }
}
