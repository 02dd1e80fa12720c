/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryLimits, A4_RATIO};
use crate::readiness::RetryPolicy;

pub const DEFAULT_STORAGE_KEY: &str = "lookbook";
pub const DEFAULT_PROXY_BASE: &str = "/api/proxy";

/// Editor tunables. Every field has a default, so a partial JSON object is enough.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    pub storage_key: String,
    pub limits: GeometryLimits,
    /// Size of a block created by dropping onto empty canvas, in percent.
    pub drop_size: (f32, f32),
    pub drop_dedupe_ms: f64,
    pub proxy_base: String,
    pub sizing: PageSizing,
    pub capture: CaptureSettings,
    pub readiness_attempts: u32,
    pub readiness_interval_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            limits: GeometryLimits::default(),
            drop_size: (40.0, 30.0),
            drop_dedupe_ms: 250.0,
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            sizing: PageSizing::default(),
            capture: CaptureSettings::default(),
            readiness_attempts: 50,
            readiness_interval_ms: 100,
        }
    }
}

impl EditorConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.readiness_attempts,
            interval: Duration::from_millis(self.readiness_interval_ms),
        }
    }
}

/// On-screen page sizing. Pages keep the exported aspect regardless of window size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageSizing {
    pub aspect: f64,
    pub max_width: f64,
    pub min_width: f64,
    pub min_usable_height: f64,
    pub min_stage_width: f64,
    pub chrome_padding: f64,
    pub stage_padding: f64,
    /// Inset of the droppable canvas inside the page, in percent per side.
    pub safe_inset: f64,
}

impl Default for PageSizing {
    fn default() -> Self {
        Self {
            aspect: A4_RATIO,
            max_width: 900.0,
            min_width: 260.0,
            min_usable_height: 240.0,
            min_stage_width: 200.0,
            chrome_padding: 140.0,
            stage_padding: 16.0,
            safe_inset: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureSettings {
    pub scale: f64,
    pub jpeg_quality: u8,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            scale: 2.0,
            jpeg_quality: 98,
        }
    }
}

impl CaptureSettings {
    /// Never below 2x, higher on dense displays.
    pub fn effective_scale(&self, device_pixel_ratio: f64) -> f64 {
        self.scale.max(device_pixel_ratio).max(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{"drop_size":[50,25],"sizing":{"max_width":700}}"#).unwrap();
        assert_eq!(config.drop_size, (50.0, 25.0));
        assert_eq!(config.sizing.max_width, 700.0);
        assert_eq!(config.sizing.aspect, A4_RATIO);
        assert_eq!(config.storage_key, "lookbook");
        assert_eq!(config.limits.min_w, 8.0);
    }

    #[test]
    fn capture_scale_has_floor() {
        let capture = CaptureSettings { scale: 1.0, jpeg_quality: 90 };
        assert_eq!(capture.effective_scale(1.0), 2.0);
        assert_eq!(capture.effective_scale(3.0), 3.0);
    }
}
