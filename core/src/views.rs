//! Page loaders: what each page fetches on entry and how it fails.
//!
//! Every loader issues its own requests, normalizes what it shows, and turns
//! any failure into a `ViewFailure` with a generic message and the actions the
//! page offers (reload, back to home). The underlying error has already been
//! logged by `ApiClient`.

use tracing::warn;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::fallback::{resolve_novel, NovelResolution};
use crate::http::Transport;
use crate::normalize::normalize_novels;
use crate::query::{BestNovelsQuery, NovelListQuery, PageQuery};
use crate::routes::SearchParams;
use crate::types::{Chapter, ChapterSummary, Genre, Novel};

pub const HOME_BEST_LIMIT: u32 = 10;
pub const HOME_RECENT_LIMIT: u32 = 12;
pub const SEARCH_LIMIT: u32 = 50;
pub const DETAIL_CHAPTER_LIMIT: u32 = 100;
pub const READER_CHAPTER_LIMIT: u32 = 200;
pub const GENRE_PICKER_LIMIT: u32 = 100;

const HOME_ERROR: &str = "Error al cargar las novelas. Inténtalo de nuevo más tarde.";
const SEARCH_ERROR: &str = "Error al realizar la búsqueda. Inténtalo de nuevo más tarde.";
const NOVEL_ERROR: &str = "Error al cargar la novela. Inténtalo de nuevo más tarde.";
const CHAPTER_ERROR: &str = "Error al cargar el capítulo. Inténtalo de nuevo más tarde.";

/// What a page shows after a failed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFailure {
    pub message: String,
    /// The page offers a full reload.
    pub retry: bool,
    /// The page offers a link back to the home page.
    pub home: bool,
}

impl ViewFailure {
    fn new(message: &str, retry: bool, home: bool) -> Self {
        Self {
            message: message.to_string(),
            retry,
            home,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(ViewFailure),
}

impl<T> ViewState<T> {
    fn from_result(result: Result<T, ApiError>, failure: ViewFailure) -> Self {
        match result {
            Ok(page) => ViewState::Ready(page),
            Err(_) => ViewState::Failed(failure),
        }
    }

    pub fn ready(self) -> Option<T> {
        match self {
            ViewState::Ready(page) => Some(page),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomePage {
    /// First of the best-rated novels, shown in the hero section.
    pub featured: Option<Novel>,
    pub top: Vec<Novel>,
    pub recent: Vec<Novel>,
}

pub async fn load_home<T: Transport>(api: &ApiClient<T>) -> ViewState<HomePage> {
    let result: Result<HomePage, ApiError> = async {
        let best = api
            .best_novels(&BestNovelsQuery {
                limit: HOME_BEST_LIMIT,
            })
            .await?;
        let top = normalize_novels(best);
        let recent = api.novels(&NovelListQuery::with_limit(HOME_RECENT_LIMIT)).await?;
        Ok(HomePage {
            featured: top.first().cloned(),
            top,
            recent: normalize_novels(recent),
        })
    }
    .await;
    ViewState::from_result(result, ViewFailure::new(HOME_ERROR, true, false))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub params: SearchParams,
    pub title: String,
    pub filter_summary: String,
    pub results: Vec<Novel>,
}

/// Run a search, or list recent novels when no filter is set.
pub async fn search_or_recent<T: Transport>(
    api: &ApiClient<T>,
    params: &SearchParams,
) -> Result<Vec<Novel>, ApiError> {
    let raws = if params.is_empty() {
        api.novels(&NovelListQuery::with_limit(SEARCH_LIMIT)).await?
    } else {
        api.search_novels(&params.to_query(SEARCH_LIMIT)).await?
    };
    Ok(normalize_novels(raws))
}

pub async fn load_search<T: Transport>(
    api: &ApiClient<T>,
    params: SearchParams,
) -> ViewState<SearchPage> {
    let result = search_or_recent(api, &params).await.map(|results| SearchPage {
        title: params.title(),
        filter_summary: params.filter_summary(),
        params: params.clone(),
        results,
    });
    ViewState::from_result(result, ViewFailure::new(SEARCH_ERROR, true, true))
}

#[derive(Debug, Clone, PartialEq)]
pub struct NovelPage {
    pub resolution: NovelResolution,
    pub chapters: Vec<ChapterSummary>,
}

impl NovelPage {
    pub fn novel(&self) -> &Novel {
        self.resolution.novel()
    }

    /// Chapter count for display: the novel's own count, else the number of
    /// chapters listed.
    pub fn chapter_count(&self) -> usize {
        match self.novel().chapters {
            0 => self.chapters.len(),
            count => count as usize,
        }
    }
}

/// Novel detail page. The novel itself never fails (see `resolve_novel`);
/// the chapter list is fetched alongside it and its failure fails the page.
pub async fn load_novel_page<T: Transport>(
    api: &ApiClient<T>,
    novel_id: u64,
) -> ViewState<NovelPage> {
    let chapter_page = PageQuery::with_limit(DETAIL_CHAPTER_LIMIT);
    let (resolution, chapters) = tokio::join!(
        resolve_novel(api, novel_id),
        api.novel_chapters(novel_id, &chapter_page)
    );
    let result = chapters.map(|chapters| NovelPage {
        resolution,
        chapters,
    });
    ViewState::from_result(result, ViewFailure::new(NOVEL_ERROR, true, true))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReaderPage {
    pub chapter: Chapter,
    pub chapters: Vec<ChapterSummary>,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

/// Ids of the chapters listed just before and just after `chapter_id`.
/// Both are `None` when the chapter is not in the list.
pub fn neighbours(chapters: &[ChapterSummary], chapter_id: u64) -> (Option<u64>, Option<u64>) {
    let Some(index) = chapters.iter().position(|c| c.id == chapter_id) else {
        return (None, None);
    };
    let previous = index.checked_sub(1).map(|i| chapters[i].id);
    let next = chapters.get(index + 1).map(|c| c.id);
    (previous, next)
}

pub async fn load_reader<T: Transport>(api: &ApiClient<T>, chapter_id: u64) -> ViewState<ReaderPage> {
    let result: Result<ReaderPage, ApiError> = async {
        let chapter = api.chapter(chapter_id).await?;
        let chapters = api
            .novel_chapters(chapter.novel_id, &PageQuery::with_limit(READER_CHAPTER_LIMIT))
            .await?;
        let (previous, next) = neighbours(&chapters, chapter.id);
        Ok(ReaderPage {
            chapter,
            chapters,
            previous,
            next,
        })
    }
    .await;
    ViewState::from_result(result, ViewFailure::new(CHAPTER_ERROR, false, true))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub params: SearchParams,
    pub genres: Vec<Genre>,
}

/// Advanced search form. A failed genre fetch only empties the genre picker.
pub async fn load_search_form<T: Transport>(api: &ApiClient<T>, params: SearchParams) -> SearchForm {
    let genres = match api.genres(&PageQuery::with_limit(GENRE_PICKER_LIMIT)).await {
        Ok(genres) => genres,
        Err(err) => {
            warn!(error = %err, "genre picker left empty");
            Vec::new()
        }
    };
    SearchForm { params, genres }
}
