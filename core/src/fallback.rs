//! Novel lookup with fallbacks for the detail view.
//!
//! The detail endpoint is tried first. When it fails, the best-rated and
//! recent lists are fetched together and searched for the id. When that also
//! fails or finds nothing, a placeholder novel stands in so the page always
//! has something to render. The placeholder is never cached or retried.

use tracing::warn;

use crate::client::ApiClient;
use crate::http::Transport;
use crate::normalize::normalize_novel;
use crate::query::{BestNovelsQuery, NovelListQuery};
use crate::types::{Novel, NovelStatus};

/// How many entries of each list the recovery step scans.
pub const RECOVERY_LIST_LIMIT: u32 = 50;

pub const PLACEHOLDER_AUTHOR: &str = "Desconocido";
pub const PLACEHOLDER_COVER: &str =
    "https://via.placeholder.com/300x450/374151/ffffff?text=Sin+Imagen";
pub const PLACEHOLDER_DESCRIPTION: &str = "Información no disponible en este momento.";

/// Where the novel shown by the detail view came from.
#[derive(Debug, Clone, PartialEq)]
pub enum NovelResolution {
    /// The detail endpoint answered.
    Found(Novel),
    /// The detail endpoint failed but the novel was in a list response.
    Recovered(Novel),
    /// Nothing could be fetched; a local stand-in.
    Placeholder(Novel),
}

impl NovelResolution {
    pub fn novel(&self) -> &Novel {
        match self {
            NovelResolution::Found(novel)
            | NovelResolution::Recovered(novel)
            | NovelResolution::Placeholder(novel) => novel,
        }
    }

    pub fn into_novel(self) -> Novel {
        match self {
            NovelResolution::Found(novel)
            | NovelResolution::Recovered(novel)
            | NovelResolution::Placeholder(novel) => novel,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, NovelResolution::Placeholder(_))
    }
}

/// Stand-in novel for an id nothing could be fetched for.
pub fn placeholder_novel(novel_id: u64) -> Novel {
    Novel {
        id: novel_id,
        name: format!("Novela {novel_id}"),
        author: PLACEHOLDER_AUTHOR.to_string(),
        description: Some(PLACEHOLDER_DESCRIPTION.to_string()),
        rating: Some(0.0),
        status: NovelStatus::Unknown,
        cover_path: Some(PLACEHOLDER_COVER.to_string()),
        tags: Vec::new(),
        genres: None,
        alternative_names: Vec::new(),
        chapters: 0,
        source_url: None,
        created_at: None,
        updated_at: None,
    }
}

/// Resolve a novel for the detail view. Never fails: the last resort is a
/// placeholder.
pub async fn resolve_novel<T: Transport>(api: &ApiClient<T>, novel_id: u64) -> NovelResolution {
    let err = match api.novel(novel_id).await {
        Ok(raw) => return NovelResolution::Found(normalize_novel(raw)),
        Err(err) => err,
    };
    warn!(novel_id, error = %err, "novel detail unavailable, searching lists");

    let best_query = BestNovelsQuery {
        limit: RECOVERY_LIST_LIMIT,
    };
    let recent_query = NovelListQuery::with_limit(RECOVERY_LIST_LIMIT);
    let lists = tokio::try_join!(api.best_novels(&best_query), api.novels(&recent_query));

    match lists {
        Ok((best, recent)) => {
            if let Some(raw) = best.into_iter().chain(recent).find(|n| n.id == novel_id) {
                return NovelResolution::Recovered(normalize_novel(raw));
            }
            warn!(novel_id, "novel not present in lists, using placeholder");
        }
        Err(err) => {
            warn!(novel_id, error = %err, "list fallback failed, using placeholder");
        }
    }
    NovelResolution::Placeholder(placeholder_novel(novel_id))
}
