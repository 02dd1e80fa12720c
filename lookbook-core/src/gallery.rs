/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Drag sources fed by the wardrobe or a host-supplied item list.

use serde::Deserialize;
use serde_json::Value;

use crate::proxy::ImageUrlResolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub id: String,
    pub name: String,
    /// Already routed through the image resolver.
    pub image_url: String,
}

/// Items arrive either as bare URLs or as loose records.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSourceItem {
    Url(String),
    Record {
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default, rename = "imageUrl")]
        image_url: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

fn id_text(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Drops entries without an image, fills missing ids with the position.
pub fn normalize_items(raw: &[RawSourceItem], resolver: &dyn ImageUrlResolver) -> Vec<SourceItem> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let (id, name, url) = match item {
                RawSourceItem::Url(url) => (None, String::new(), url.clone()),
                RawSourceItem::Record { id, name, image_url, url } => (
                    id.as_ref().and_then(id_text),
                    name.clone().unwrap_or_default(),
                    image_url
                        .clone()
                        .filter(|u| !u.is_empty())
                        .or_else(|| url.clone())
                        .unwrap_or_default(),
                ),
            };
            let url = url.trim();
            if url.is_empty() {
                return None;
            }
            Some(SourceItem {
                id: id.unwrap_or_else(|| index.to_string()),
                name,
                image_url: resolver.resolve(url),
            })
        })
        .collect()
}

pub fn parse_items(raw: &str, resolver: &dyn ImageUrlResolver) -> Result<Vec<SourceItem>, serde_json::Error> {
    let items: Vec<RawSourceItem> = serde_json::from_str(raw)?;
    Ok(normalize_items(&items, resolver))
}

pub fn items_from_urls<I, U>(urls: I, resolver: &dyn ImageUrlResolver) -> Vec<SourceItem>
where
    I: IntoIterator<Item = U>,
    U: Into<String>,
{
    let raw: Vec<RawSourceItem> = urls.into_iter().map(|u| RawSourceItem::Url(u.into())).collect();
    normalize_items(&raw, resolver)
}
