//! In-memory stand-in for the novel catalog API.
//!
//! Serves the read-only `/api/v1` surface the client consumes, with the same
//! response shapes as the real backend: list endpoints return bare novels with
//! an absolute `cover_url`, the detail endpoint adds genres, alternative names
//! and a chapter count. A catalog can be told to fail specific endpoints so
//! the client's fallback paths can be exercised end to end.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const API_PREFIX: &str = "/api/v1";

/// Origin the backend uses when building absolute cover URLs.
pub const ASSET_ORIGIN: &str = "http://localhost:8000";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlternativeName {
    pub id: u64,
    pub novel_id: u64,
    pub name: String,
}

/// A stored novel. Genre links and alternative names are kept inline.
#[derive(Clone, Debug)]
pub struct NovelRecord {
    pub id: u64,
    pub name: String,
    pub author: String,
    pub description: String,
    pub rating: Option<f64>,
    pub status: String,
    pub cover_path: Option<String>,
    pub source_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub genre_ids: Vec<u64>,
    pub alternative_names: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NovelResponse {
    pub id: u64,
    pub name: String,
    pub author: String,
    pub description: String,
    pub rating: Option<f64>,
    pub status: String,
    pub cover_path: Option<String>,
    pub cover_url: Option<String>,
    pub source_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NovelDetailResponse {
    #[serde(flatten)]
    pub novel: NovelResponse,
    pub genres: Vec<Genre>,
    pub alternative_names: Vec<AlternativeName>,
    pub chapters_count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: u64,
    pub novel_id: u64,
    pub order_number: u32,
    pub title: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u64,
    pub novel_id: u64,
    pub order_number: u32,
    pub title: String,
    pub content: String,
    pub source_url: Option<String>,
    pub created_at: String,
}

impl Chapter {
    fn summary(&self) -> ChapterSummary {
        ChapterSummary {
            id: self.id,
            novel_id: self.novel_id,
            order_number: self.order_number,
            title: self.title.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub novels: Vec<NovelRecord>,
    pub genres: Vec<Genre>,
    pub chapters: Vec<Chapter>,
    /// Novel ids whose detail endpoint answers 500.
    pub broken_details: HashSet<u64>,
    /// Make `/novels/` and `/novels/best/` answer 500.
    pub failing_lists: bool,
}

impl Catalog {
    pub fn with_broken_detail(mut self, novel_id: u64) -> Self {
        self.broken_details.insert(novel_id);
        self
    }

    pub fn with_failing_lists(mut self) -> Self {
        self.failing_lists = true;
        self
    }

    fn novel(&self, id: u64) -> Option<&NovelRecord> {
        self.novels.iter().find(|n| n.id == id)
    }

    /// Novels ordered by rating, best first; unrated novels last.
    fn by_rating(&self) -> Vec<&NovelRecord> {
        let mut novels: Vec<&NovelRecord> = self.novels.iter().collect();
        novels.sort_by(|a, b| {
            b.rating
                .unwrap_or(f64::MIN)
                .total_cmp(&a.rating.unwrap_or(f64::MIN))
                .then(a.id.cmp(&b.id))
        });
        novels
    }

    fn chapters_of(&self, novel_id: u64) -> Vec<&Chapter> {
        let mut chapters: Vec<&Chapter> =
            self.chapters.iter().filter(|c| c.novel_id == novel_id).collect();
        chapters.sort_by_key(|c| c.order_number);
        chapters
    }

    /// A small catalog covering every status and a few genres.
    pub fn sample() -> Self {
        let genres = ["fantasy", "mystery", "isekai", "romance"]
            .iter()
            .enumerate()
            .map(|(i, name)| Genre {
                id: i as u64 + 1,
                name: name.to_string(),
            })
            .collect();

        let novel = |id: u64, name: &str, author: &str, rating: Option<f64>, status: &str, genre_ids: &[u64]| {
            NovelRecord {
                id,
                name: name.to_string(),
                author: author.to_string(),
                description: format!("{name} description."),
                rating,
                status: status.to_string(),
                cover_path: Some(format!("/static/novels/{id}.webp")),
                source_url: None,
                created_at: format!("2024-05-{id:02}T10:00:00"),
                updated_at: format!("2024-06-{id:02}T10:00:00"),
                genre_ids: genre_ids.to_vec(),
                alternative_names: Vec::new(),
            }
        };

        let mut novels = vec![
            novel(1, "Lord of the Mysteries", "Cuttlefish That Loves Diving", Some(9.6), "completed", &[1, 2]),
            novel(2, "Omniscient Reader", "Sing Shong", Some(9.1), "completed", &[1]),
            novel(3, "Mushoku Tensei", "Rifujin na Magonote", Some(8.7), "hiatus", &[1, 3]),
            novel(4, "Second Life Ranker", "Sadoyeon", Some(7.9), "ongoing", &[1]),
            novel(5, "Abandoned Garden", "Anonymous", Some(5.2), "dropped", &[4]),
            novel(6, "Untitled Draft", "Unknown", None, "ongoing", &[]),
        ];
        novels[0].alternative_names = vec!["诡秘之主".to_string()];
        novels[5].cover_path = None;

        let mut chapters = Vec::new();
        let mut next_id = 100;
        for (novel_id, count) in [(1_u64, 3_u32), (2, 2)] {
            for order_number in 1..=count {
                next_id += 1;
                chapters.push(Chapter {
                    id: next_id,
                    novel_id,
                    order_number,
                    title: format!("Chapter {order_number}"),
                    content: format!("Text of chapter {order_number} of novel {novel_id}."),
                    source_url: None,
                    created_at: "2024-06-01T10:00:00".to_string(),
                });
            }
        }

        Catalog {
            novels,
            genres,
            chapters,
            ..Catalog::default()
        }
    }
}

pub type Db = Arc<Catalog>;

fn novel_response(novel: &NovelRecord) -> NovelResponse {
    NovelResponse {
        id: novel.id,
        name: novel.name.clone(),
        author: novel.author.clone(),
        description: novel.description.clone(),
        rating: novel.rating,
        status: novel.status.clone(),
        cover_path: novel.cover_path.clone(),
        cover_url: novel.cover_path.as_deref().map(|path| {
            let file = path.rsplit('/').next().unwrap_or(path);
            format!("{ASSET_ORIGIN}/images/{file}")
        }),
        source_url: novel.source_url.clone(),
        created_at: novel.created_at.clone(),
        updated_at: novel.updated_at.clone(),
    }
}

pub fn app() -> Router {
    app_with(Catalog::sample())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    Router::new()
        .route(&format!("{API_PREFIX}/"), get(health))
        .route(&format!("{API_PREFIX}/novels/"), get(list_novels))
        .route(&format!("{API_PREFIX}/novels/best/"), get(best_novels))
        .route(&format!("{API_PREFIX}/novels/search/"), get(search_novels))
        .route(&format!("{API_PREFIX}/novels/{{id}}"), get(get_novel))
        .route(&format!("{API_PREFIX}/novels/{{id}}/chapters"), get(list_chapters))
        .route(&format!("{API_PREFIX}/chapters/{{id}}"), get(get_chapter))
        .route(&format!("{API_PREFIX}/genres/"), get(list_genres))
        .route(&format!("{API_PREFIX}/genres/{{id}}"), get(get_genre))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Catalog::sample()).await
}

pub async fn run_with(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "API de Novelas funcionando correctamente",
        "version": "1.0.0",
        "docs": "/docs"
    }))
}

fn default_limit() -> usize {
    20
}

fn default_best_limit() -> usize {
    10
}

fn default_page_limit() -> usize {
    100
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub status: Option<String>,
    pub min_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BestParams {
    #[serde(default = "default_best_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub genre_id: Option<u64>,
    pub status: Option<String>,
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_page_limit")]
    pub limit: usize,
}

fn matches_filters(novel: &NovelRecord, status: Option<&str>, min_rating: Option<f64>) -> bool {
    let status_ok = status.is_none_or(|s| s.is_empty() || novel.status == s);
    let rating_ok = min_rating.is_none_or(|min| novel.rating.is_some_and(|r| r >= min));
    status_ok && rating_ok
}

async fn list_novels(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<NovelResponse>>, StatusCode> {
    if db.failing_lists {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let novels = db
        .by_rating()
        .into_iter()
        .filter(|n| matches_filters(n, params.status.as_deref(), params.min_rate))
        .skip(params.skip)
        .take(params.limit)
        .map(novel_response)
        .collect();
    Ok(Json(novels))
}

async fn best_novels(
    State(db): State<Db>,
    Query(params): Query<BestParams>,
) -> Result<Json<Vec<NovelResponse>>, StatusCode> {
    if db.failing_lists {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let novels = db
        .by_rating()
        .into_iter()
        .filter(|n| n.rating.is_some())
        .take(params.limit)
        .map(novel_response)
        .collect();
    Ok(Json(novels))
}

async fn search_novels(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<NovelResponse>> {
    let needle = params.q.as_deref().unwrap_or("").to_lowercase();
    let novels = db
        .by_rating()
        .into_iter()
        .filter(|n| needle.is_empty() || n.name.to_lowercase().contains(&needle))
        .filter(|n| params.genre_id.is_none_or(|g| n.genre_ids.contains(&g)))
        .filter(|n| matches_filters(n, params.status.as_deref(), params.min_rating))
        .skip(params.skip)
        .take(params.limit)
        .map(novel_response)
        .collect();
    Json(novels)
}

async fn get_novel(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<NovelDetailResponse>, StatusCode> {
    if db.broken_details.contains(&id) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let novel = db.novel(id).ok_or(StatusCode::NOT_FOUND)?;
    let genres = db
        .genres
        .iter()
        .filter(|g| novel.genre_ids.contains(&g.id))
        .cloned()
        .collect();
    let alternative_names = novel
        .alternative_names
        .iter()
        .enumerate()
        .map(|(i, name)| AlternativeName {
            id: i as u64 + 1,
            novel_id: novel.id,
            name: name.clone(),
        })
        .collect();
    Ok(Json(NovelDetailResponse {
        novel: novel_response(novel),
        genres,
        alternative_names,
        chapters_count: db.chapters_of(id).len() as u32,
    }))
}

async fn list_chapters(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<ChapterSummary>>, StatusCode> {
    db.novel(id).ok_or(StatusCode::NOT_FOUND)?;
    let chapters = db
        .chapters_of(id)
        .into_iter()
        .skip(page.skip)
        .take(page.limit)
        .map(Chapter::summary)
        .collect();
    Ok(Json(chapters))
}

async fn get_chapter(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Chapter>, StatusCode> {
    db.chapters
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_genres(State(db): State<Db>, Query(page): Query<PageParams>) -> Json<Vec<Genre>> {
    Json(db.genres.iter().skip(page.skip).take(page.limit).cloned().collect())
}

async fn get_genre(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Genre>, StatusCode> {
    db.genres
        .iter()
        .find(|g| g.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
