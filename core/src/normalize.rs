//! Maps raw API novels onto the `Novel` view-model.
//!
//! Every rule here reads either the upstream field or the view-model field of
//! the same meaning, so normalizing an already-normalized novel is a no-op.

use crate::types::{Novel, NovelStatus, RawNovel};

/// Origin the backend bakes into `cover_url`. Stripping it leaves a
/// root-relative path that resolves against whatever host serves the client.
pub const BACKEND_ORIGIN: &str = "http://localhost:8000";

/// Translate an upstream status into the view vocabulary.
///
/// Only `completed` is renamed. Values outside the table pass through
/// unchanged; a missing status is `unknown`.
pub fn map_status(raw: Option<&str>) -> NovelStatus {
    match raw {
        Some("completed") => NovelStatus::Finished,
        Some("ongoing") => NovelStatus::Ongoing,
        Some("hiatus") => NovelStatus::Hiatus,
        Some("dropped") => NovelStatus::Dropped,
        Some(other) => NovelStatus::parse(other),
        None => NovelStatus::Unknown,
    }
}

fn cover_path(raw: &RawNovel) -> Option<String> {
    match &raw.cover_url {
        Some(url) => Some(url.strip_prefix(BACKEND_ORIGIN).unwrap_or(url).to_string()),
        None => raw.cover_path.clone(),
    }
}

fn tags(raw: &RawNovel) -> Vec<String> {
    match (&raw.genres, &raw.tags) {
        (Some(genres), _) => genres.iter().map(|g| g.name.to_uppercase()).collect(),
        (None, Some(tags)) => tags.clone(),
        (None, None) => Vec::new(),
    }
}

pub fn normalize_novel(raw: RawNovel) -> Novel {
    let cover_path = cover_path(&raw);
    let tags = tags(&raw);
    let chapters = raw
        .chapters_count
        .filter(|&count| count != 0)
        .or(raw.chapters)
        .unwrap_or(0);
    let status = map_status(raw.status.as_deref());
    let updated_at = raw.updated_at.or_else(|| raw.created_at.clone());

    Novel {
        id: raw.id,
        name: raw.name,
        author: raw.author,
        description: raw.description,
        rating: raw.rating,
        status,
        cover_path,
        tags,
        genres: raw.genres,
        alternative_names: raw.alternative_names.unwrap_or_default(),
        chapters,
        source_url: raw.source_url,
        created_at: raw.created_at,
        updated_at,
    }
}

/// Normalize every novel, preserving order.
pub fn normalize_novels(raws: Vec<RawNovel>) -> Vec<Novel> {
    raws.into_iter().map(normalize_novel).collect()
}
