/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use crate::model::{BlockContent, BlockPrototype, ImageContent, Rect};

pub type TemplateFn = fn() -> Vec<BlockPrototype>;

/// Named starting arrangements. Lookup of an unknown name yields a blank page.
#[derive(Clone)]
pub struct TemplateSet {
    entries: Vec<(String, String, TemplateFn)>,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateSet {
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn builtin() -> Self {
        Self::empty()
            .with("cover", "Cover", cover)
            .with("grid3", "Grid 3", grid3)
            .with("full", "Full bleed", full)
    }

    pub fn with(mut self, name: &str, label: &str, make: TemplateFn) -> Self {
        self.entries.retain(|(existing, _, _)| existing != name);
        self.entries.push((name.to_string(), label.to_string(), make));
        self
    }

    /// `(name, label)` pairs in registration order.
    pub fn names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, label, _)| (name.as_str(), label.as_str()))
    }

    /// Fresh prototypes for `name`, image sources reset to the placeholder.
    pub fn instantiate(&self, name: &str) -> Vec<BlockPrototype> {
        let Some((_, _, make)) = self.entries.iter().find(|(n, _, _)| n == name) else {
            return Vec::new();
        };
        make()
            .into_iter()
            .map(|mut proto| {
                if let BlockContent::Image(_) = proto.content {
                    proto.content = BlockContent::Image(ImageContent::empty());
                }
                proto
            })
            .collect()
    }
}

fn cover() -> Vec<BlockPrototype> {
    vec![
        BlockPrototype::new(Rect::new(12.0, 24.0, 60.0, 50.0), BlockContent::image("")),
        BlockPrototype::new(
            Rect::new(10.0, 8.0, 60.0, 10.0),
            BlockContent::text("LOOK BOOK\nFASHION MAGAZINE"),
        ),
        BlockPrototype::new(Rect::new(10.0, 80.0, 60.0, 6.0), BlockContent::text("www.example.com")),
    ]
}

fn grid3() -> Vec<BlockPrototype> {
    (0..3)
        .map(|i| {
            BlockPrototype::new(
                Rect::new(8.0 + i as f32 * 30.0, 12.0, 26.0, 76.0),
                BlockContent::image(""),
            )
        })
        .collect()
}

fn full() -> Vec<BlockPrototype> {
    vec![BlockPrototype::new(Rect::FULL, BlockContent::image(""))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_in_order() {
        let set = TemplateSet::builtin();
        let names: Vec<_> = set.names().map(|(n, _)| n).collect();
        assert_eq!(names, ["cover", "grid3", "full"]);
    }

    #[test]
    fn grid_columns_are_spaced() {
        let blocks = TemplateSet::builtin().instantiate("grid3");
        let xs: Vec<f32> = blocks.iter().map(|b| b.rect.x).collect();
        assert_eq!(xs, [8.0, 38.0, 68.0]);
        assert!(blocks.iter().all(|b| b.content == BlockContent::Image(ImageContent::empty())));
    }

    #[test]
    fn unknown_template_is_blank() {
        assert!(TemplateSet::builtin().instantiate("magazine").is_empty());
    }

    #[test]
    fn image_sources_are_reset() {
        fn seeded() -> Vec<BlockPrototype> {
            vec![BlockPrototype::new(Rect::FULL, BlockContent::image("https://x/y.png"))]
        }
        let set = TemplateSet::empty().with("seeded", "Seeded", seeded);
        let blocks = set.instantiate("seeded");
        assert_eq!(blocks[0].content, BlockContent::Image(ImageContent::empty()));
    }
}
