/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use url::form_urlencoded;

/// Produces an image URL that can be rasterized without tainting a capture canvas.
pub trait ImageUrlResolver {
    fn resolve(&self, raw: &str) -> String;
}

/// Routes absolute third-party URLs through a same-origin fetch relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayProxy {
    base: String,
}

impl RelayProxy {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn is_proxied(&self, url: &str) -> bool {
        url.starts_with(&self.base) || url.contains(&format!("{}?url=", self.base))
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl ImageUrlResolver for RelayProxy {
    fn resolve(&self, raw: &str) -> String {
        if raw.is_empty() || self.is_proxied(raw) || !is_absolute(raw) {
            return raw.to_string();
        }
        let encoded: String = form_urlencoded::byte_serialize(raw.as_bytes()).collect();
        format!("{}?url={}", self.base, encoded)
    }
}

/// Leaves every URL untouched; for hosts that read images directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl ImageUrlResolver for Passthrough {
    fn resolve(&self, raw: &str) -> String {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_absolute_urls_once() {
        let proxy = RelayProxy::new("/api/proxy");
        let once = proxy.resolve("https://cdn.example.com/a b.png?x=1");
        assert_eq!(once, "/api/proxy?url=https%3A%2F%2Fcdn.example.com%2Fa+b.png%3Fx%3D1");
        assert_eq!(proxy.resolve(&once), once);
        assert_eq!(proxy.resolve("HTTP://Example.com/x.jpg"), "/api/proxy?url=HTTP%3A%2F%2FExample.com%2Fx.jpg");
    }

    #[test]
    fn leaves_relative_and_empty_urls() {
        let proxy = RelayProxy::new("/api/proxy");
        assert_eq!(proxy.resolve(""), "");
        assert_eq!(proxy.resolve("/images/look.png"), "/images/look.png");
        assert_eq!(proxy.resolve("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
        assert_eq!(
            proxy.resolve("https://host/api/proxy?url=abc"),
            "https://host/api/proxy?url=abc"
        );
    }
}
