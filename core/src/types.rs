//! Domain DTOs for the novel API and the normalized view-model.
//!
//! # Design
//! `RawNovel` mirrors what the API sends, with every field the normalizer
//! reads spelled out. It also accepts the view-model's own field names
//! (`cover_path`, `tags`, `chapters`) so an already-normalized novel can be
//! fed back through the normalizer. Fields not named here are dropped at
//! deserialization instead of flowing through to the views.
//!
//! `Novel` is the shape the views consume. It is produced only by
//! `normalize::normalize_novel` or `fallback::placeholder_novel`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status as used by the views.
///
/// The upstream API says `completed` where the views say `finished`; that
/// translation happens in the normalizer. Anything the views do not know is
/// kept verbatim in `Other` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NovelStatus {
    Ongoing,
    Finished,
    Hiatus,
    Dropped,
    Unknown,
    Other(String),
}

impl NovelStatus {
    /// Parse a view-level status string. No upstream translation happens
    /// here: `"completed"` stays `Other("completed")`.
    pub fn parse(value: &str) -> Self {
        match value {
            "ongoing" => NovelStatus::Ongoing,
            "finished" => NovelStatus::Finished,
            "hiatus" => NovelStatus::Hiatus,
            "dropped" => NovelStatus::Dropped,
            "unknown" => NovelStatus::Unknown,
            other => NovelStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NovelStatus::Ongoing => "ongoing",
            NovelStatus::Finished => "finished",
            NovelStatus::Hiatus => "hiatus",
            NovelStatus::Dropped => "dropped",
            NovelStatus::Unknown => "unknown",
            NovelStatus::Other(value) => value,
        }
    }

    /// Spanish label shown in the detail view.
    pub fn label(&self) -> &str {
        match self {
            NovelStatus::Ongoing => "En curso",
            NovelStatus::Finished => "Completada",
            NovelStatus::Hiatus => "En pausa",
            NovelStatus::Dropped => "Abandonada",
            NovelStatus::Unknown => "Desconocido",
            NovelStatus::Other(value) => value,
        }
    }
}

impl From<String> for NovelStatus {
    fn from(value: String) -> Self {
        NovelStatus::parse(&value)
    }
}

impl From<NovelStatus> for String {
    fn from(status: NovelStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for NovelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A genre. Novel payloads may embed genres by name only; `id` is then 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// An alternative title of a novel (original-language name, translation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeName {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novel_id: Option<u64>,
    pub name: String,
}

/// A novel as returned by the list, search, best and detail endpoints.
///
/// List endpoints omit `genres`, `alternative_names` and `chapters_count`;
/// only the detail endpoint fills them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNovel {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub status: Option<String>,
    pub cover_url: Option<String>,
    pub cover_path: Option<String>,
    pub source_url: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub tags: Option<Vec<String>>,
    pub alternative_names: Option<Vec<AlternativeName>>,
    pub chapters_count: Option<u32>,
    pub chapters: Option<u32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// The normalized novel consumed by the views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Novel {
    pub id: u64,
    pub name: String,
    pub author: String,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub status: NovelStatus,
    /// Root-relative path or absolute URL of the cover image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_path: Option<String>,
    /// Upper-cased genre names.
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub alternative_names: Vec<AlternativeName>,
    pub chapters: u32,
    pub source_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Novel> for RawNovel {
    /// Express a view-model novel in the raw shape, as happens when a view
    /// receives an already-normalized novel from a list fetch.
    fn from(novel: Novel) -> Self {
        RawNovel {
            id: novel.id,
            name: novel.name,
            author: novel.author,
            description: novel.description,
            rating: novel.rating,
            status: Some(novel.status.into()),
            cover_url: None,
            cover_path: novel.cover_path,
            source_url: novel.source_url,
            genres: novel.genres,
            tags: Some(novel.tags),
            alternative_names: Some(novel.alternative_names),
            chapters_count: None,
            chapters: Some(novel.chapters),
            created_at: novel.created_at,
            updated_at: novel.updated_at,
        }
    }
}

/// A chapter entry from `/novels/{id}/chapters`, without its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: u64,
    pub novel_id: u64,
    /// 1-based position within the novel.
    pub order_number: u32,
    pub title: String,
    pub created_at: Option<String>,
}

/// A full chapter from `/chapters/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u64,
    pub novel_id: u64,
    pub order_number: u32,
    pub title: String,
    pub content: String,
    pub source_url: Option<String>,
    pub created_at: Option<String>,
}

/// Body of the health check at the API root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub message: Option<String>,
    pub version: Option<String>,
}
