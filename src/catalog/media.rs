use super::{CatalogEntry, ValidationError};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of library categories. Serialized with the web frontend's
/// lowercase tags so exported slot dumps keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Music,
    News,
    Ad,
}

impl MediaCategory {
    pub fn label(&self) -> &'static str {
        match self {
            MediaCategory::Music => "music",
            MediaCategory::News => "news",
            MediaCategory::Ad => "ad",
        }
    }
}

/// One library item. Items are never mutated in place - edits replace the
/// whole entry through the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub category: MediaCategory,
    pub sponsored: bool,
    /// Duration in seconds. Zero means unknown.
    pub duration: u64,
}

impl CatalogEntry for MediaItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// Upload form input for the library. Built into a `MediaItem` only after
/// validation passes.
#[derive(Debug, Clone)]
pub struct MediaDraft {
    pub title: String,
    pub url: String,
    pub category: MediaCategory,
    pub sponsored: bool,
    pub duration: u64,
}

impl MediaDraft {
    pub fn build(self) -> Result<MediaItem, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let url = self.url.trim().to_string();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        Ok(MediaItem {
            id: Uuid::new_v4().to_string(),
            title,
            url,
            category: self.category,
            sponsored: self.sponsored,
            duration: self.duration,
        })
    }
}

/// A commercial spot. Kept in its own slot, managed like the other
/// registries, displayed next to sponsor records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub sponsor: String,
    pub duration: u64,
}

impl CatalogEntry for CommercialItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// The Auto VJ rotation: every library item that is not a commercial, in
/// library order.
pub fn auto_rotation(items: &[MediaItem]) -> Vec<MediaItem> {
    items
        .iter()
        .filter(|v| v.category != MediaCategory::Ad)
        .cloned()
        .collect()
}

/// Library search: optional category filter plus fuzzy title match. An
/// empty query keeps library order; otherwise best matches come first.
pub fn search<'a>(
    items: &'a [MediaItem],
    query: &str,
    category: Option<MediaCategory>,
) -> Vec<&'a MediaItem> {
    let candidates = items
        .iter()
        .filter(|v| category.map_or(true, |c| v.category == c));

    let query = query.trim();
    if query.is_empty() {
        return candidates.collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &MediaItem)> = candidates
        .filter_map(|v| matcher.fuzzy_match(&v.title, query).map(|score| (score, v)))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, v)| v).collect()
}

/// Seed library shipped with the demo. The mux test streams stand in for
/// real channel content.
pub fn default_media_items() -> Vec<MediaItem> {
    vec![
        MediaItem {
            id: "v1".to_string(),
            title: "Show – Banda Ao Vivo".to_string(),
            url: "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8".to_string(),
            category: MediaCategory::Music,
            sponsored: false,
            duration: 210,
        },
        MediaItem {
            id: "v2".to_string(),
            title: "Matéria – Cultura & Cidade".to_string(),
            url: "https://test-streams.mux.dev/pts-lv/playlist.m3u8".to_string(),
            category: MediaCategory::News,
            sponsored: false,
            duration: 240,
        },
        MediaItem {
            id: "v3".to_string(),
            title: "Comercial – Padaria Casa Nova".to_string(),
            url: "https://test-streams.mux.dev/dai-discontinuity-daterange/manifest.m3u8"
                .to_string(),
            category: MediaCategory::Ad,
            sponsored: true,
            duration: 30,
        },
    ]
}

pub fn default_commercials() -> Vec<CommercialItem> {
    vec![CommercialItem {
        id: "c1".to_string(),
        title: "Anúncio – Super Promo".to_string(),
        url: "https://test-streams.mux.dev/dai-discontinuity-daterange/manifest.m3u8".to_string(),
        sponsor: "Casa Nova".to_string(),
        duration: 30,
    }]
}
