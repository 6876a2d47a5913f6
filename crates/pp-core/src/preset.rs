//! Canvas presets: named output sizes the stage is fit to.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Standard,
    Social,
    Marketplace,
}

impl PresetCategory {
    pub const ALL: [PresetCategory; 3] = [
        PresetCategory::Standard,
        PresetCategory::Social,
        PresetCategory::Marketplace,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PresetCategory::Standard => "Standard",
            PresetCategory::Social => "SNS",
            PresetCategory::Marketplace => "Marketplace",
        }
    }
}

/// A named target output width × height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CanvasPreset {
    pub id: &'static str,
    pub category: PresetCategory,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

const fn preset(
    id: &'static str,
    category: PresetCategory,
    label: &'static str,
    width: u32,
    height: u32,
) -> CanvasPreset {
    CanvasPreset {
        id,
        category,
        label,
        width,
        height,
    }
}

use PresetCategory::{Marketplace, Social, Standard};

/// Every preset the editor offers, grouped by category.
pub const PRESETS: &[CanvasPreset] = &[
    preset("standard-1-1", Standard, "1:1", 1512, 1512),
    preset("standard-4-3", Standard, "4:3", 2016, 1512),
    preset("standard-16-9", Standard, "16:9", 2688, 1512),
    preset("standard-4-5", Standard, "4:5", 1512, 1890),
    preset("standard-9-16", Standard, "9:16", 1512, 2688),
    preset("sns-ig-post", Social, "Instagram Post", 1080, 1080),
    preset("sns-ig-story", Social, "Instagram Story", 1080, 1920),
    preset("sns-ig-reels", Social, "Instagram Reels", 1080, 1920),
    preset("sns-ig-feed", Social, "Instagram Feed", 1080, 1350),
    preset("sns-yt-thumb", Social, "YouTube Thumbnail", 1280, 720),
    preset("sns-yt-profile", Social, "YouTube Profile", 800, 800),
    preset("sns-yt-channel", Social, "YouTube Channel Art", 2560, 1440),
    preset("sns-fb-newsfeed", Social, "Facebook Newsfeed", 1200, 1200),
    preset("sns-fb-story", Social, "Facebook Story/Post", 1080, 1920),
    preset("sns-fb-profile", Social, "Facebook Profile", 720, 720),
    preset("market-amazon", Marketplace, "Amazon", 2000, 2000),
    preset("market-ebay", Marketplace, "eBay", 1600, 1600),
    preset("market-shopee", Marketplace, "Shopee", 1080, 1080),
    preset("market-lazada", Marketplace, "Lazada", 1080, 1080),
    preset("market-etsy", Marketplace, "Etsy", 2700, 2025),
    preset("market-shopify", Marketplace, "Shopify", 2048, 2048),
];

impl CanvasPreset {
    /// Look up a preset by id.
    pub fn by_id(id: &str) -> Option<CanvasPreset> {
        PRESETS.iter().find(|p| p.id == id).copied()
    }

    /// Presets belonging to one category, in catalogue order.
    pub fn in_category(category: PresetCategory) -> impl Iterator<Item = &'static CanvasPreset> {
        PRESETS.iter().filter(move |p| p.category == category)
    }

    /// Width divided by height.
    pub fn ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Reduced `W:H` string, e.g. `"4:3"` for 2016×1512.
    pub fn aspect_ratio(&self) -> String {
        let g = gcd(self.width, self.height).max(1);
        format!("{}:{}", self.width / g, self.height / g)
    }
}

impl Default for CanvasPreset {
    fn default() -> Self {
        PRESETS[0]
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_square_standard() {
        let p = CanvasPreset::default();
        assert_eq!(p.id, "standard-1-1");
        assert_eq!(p.aspect_ratio(), "1:1");
    }

    #[test]
    fn aspect_ratios_reduce() {
        assert_eq!(CanvasPreset::by_id("standard-4-3").unwrap().aspect_ratio(), "4:3");
        assert_eq!(CanvasPreset::by_id("sns-yt-thumb").unwrap().aspect_ratio(), "16:9");
        assert_eq!(CanvasPreset::by_id("sns-ig-feed").unwrap().aspect_ratio(), "4:5");
        assert_eq!(CanvasPreset::by_id("market-etsy").unwrap().aspect_ratio(), "4:3");
    }

    #[test]
    fn ids_are_unique_and_every_category_is_populated() {
        let mut ids: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PRESETS.len());
        for category in PresetCategory::ALL {
            assert!(CanvasPreset::in_category(category).count() > 0);
        }
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(CanvasPreset::by_id("poster-a0").is_none());
    }
}
