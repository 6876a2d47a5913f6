//! Prop and background libraries.
//!
//! Libraries are searched page by page; picking an entry turns it into an
//! image source for a frame add or a background swap.

use crate::error::ServiceResult;
use pp_core::model::ImageSrc;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEntry {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    /// Full-size image; libraries that only serve one size reuse the thumbnail.
    #[serde(default)]
    pub full_url: Option<String>,
}

impl AssetEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, thumbnail_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail_url: thumbnail_url.into(),
            full_url: None,
        }
    }

    /// The source to place on the stage.
    pub fn src(&self) -> ImageSrc {
        ImageSrc::new(self.full_url.as_deref().unwrap_or(&self.thumbnail_url))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPage {
    pub entries: Vec<AssetEntry>,
    pub page: usize,
    pub has_more: bool,
}

#[allow(async_fn_in_trait)]
pub trait AssetLibrary {
    /// Zero-based `page` of entries matching `query` (empty matches all).
    async fn search(&self, query: &str, page: usize) -> ServiceResult<AssetPage>;
}

/// A library backed by a fixed in-memory catalogue.
#[derive(Debug, Clone, Default)]
pub struct StaticLibrary {
    entries: Vec<AssetEntry>,
    page_size: usize,
}

impl StaticLibrary {
    pub fn new(entries: Vec<AssetEntry>) -> Self {
        Self {
            entries,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn page_of(&self, query: &str, page: usize) -> AssetPage {
        let needle = query.trim().to_lowercase();
        let matching: Vec<&AssetEntry> = self
            .entries
            .iter()
            .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
            .collect();
        let start = page.saturating_mul(self.page_size);
        let entries: Vec<AssetEntry> = matching
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|e| (*e).clone())
            .collect();
        AssetPage {
            has_more: start + entries.len() < matching.len(),
            entries,
            page,
        }
    }
}

impl AssetLibrary for StaticLibrary {
    async fn search(&self, query: &str, page: usize) -> ServiceResult<AssetPage> {
        Ok(self.page_of(query, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> StaticLibrary {
        let entries = (0..5)
            .map(|i| {
                let name = if i % 2 == 0 { format!("Marble slab {i}") } else { format!("Leaf {i}") };
                AssetEntry::new(format!("a{i}"), name, format!("https://cdn/t{i}.png"))
            })
            .collect();
        StaticLibrary::new(entries).with_page_size(2)
    }

    #[test]
    fn pages_through_catalogue() {
        let lib = library();
        let first = lib.page_of("", 0);
        assert_eq!(first.entries.len(), 2);
        assert!(first.has_more);
        let last = lib.page_of("", 2);
        assert_eq!(last.entries.len(), 1);
        assert!(!last.has_more);
        assert!(lib.page_of("", 9).entries.is_empty());
    }

    #[test]
    fn query_filters_case_insensitively() {
        let page = library().page_of("MARBLE", 0);
        assert_eq!(page.entries.len(), 2);
        assert!(page.has_more);
        assert!(page.entries.iter().all(|e| e.name.starts_with("Marble")));
    }

    #[test]
    fn entry_src_prefers_full_size() {
        let mut e = AssetEntry::new("x", "X", "https://cdn/thumb.png");
        assert_eq!(e.src().as_str(), "https://cdn/thumb.png");
        e.full_url = Some("https://cdn/full.png".into());
        assert_eq!(e.src().as_str(), "https://cdn/full.png");
    }
}
