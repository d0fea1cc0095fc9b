//! Request builder, response parser, and the async API client on top.
//!
//! # Design
//! `NovelClient` holds only the configured API base and carries no mutable
//! state between calls. Each endpoint has a `build_*` method producing an
//! `HttpRequest`; every response goes through `parse_json`. The caller (or
//! `ApiClient`, via a `Transport`) executes the round-trip in between, keeping
//! request construction deterministic and free of I/O.
//!
//! `ApiClient` is the request wrapper the views use: it builds, executes,
//! checks the status, parses, and logs every failure before returning it.

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{merge_headers, HttpRequest, HttpResponse, RequestOptions, ReqwestTransport, Transport};
use crate::query::{BestNovelsQuery, NovelListQuery, PageQuery, SearchQuery};
use crate::types::{Chapter, ChapterSummary, Genre, Health, RawNovel};

/// Stateless request builder and response parser for the novel API.
#[derive(Debug, Clone)]
pub struct NovelClient {
    config: ClientConfig,
}

impl NovelClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a GET for `path` (relative to the API base, query string
    /// included) with the default headers merged under `options.headers`.
    pub fn build_request(&self, path: &str, options: &RequestOptions) -> HttpRequest {
        HttpRequest {
            url: format!("{}{path}", self.config.api_base()),
            headers: merge_headers(&options.headers),
        }
    }

    fn get(&self, path: &str) -> HttpRequest {
        self.build_request(path, &RequestOptions::default())
    }

    pub fn build_best_novels(&self, query: &BestNovelsQuery) -> HttpRequest {
        self.get(&format!("/novels/best/{}", query.to_query_string()))
    }

    pub fn build_novels(&self, query: &NovelListQuery) -> HttpRequest {
        self.get(&format!("/novels/{}", query.to_query_string()))
    }

    pub fn build_search_novels(&self, query: &SearchQuery) -> HttpRequest {
        self.get(&format!("/novels/search/{}", query.to_query_string()))
    }

    pub fn build_novel(&self, novel_id: u64) -> HttpRequest {
        self.get(&format!("/novels/{novel_id}"))
    }

    pub fn build_novel_chapters(&self, novel_id: u64, page: &PageQuery) -> HttpRequest {
        self.get(&format!("/novels/{novel_id}/chapters{}", page.to_query_string()))
    }

    pub fn build_chapter(&self, chapter_id: u64) -> HttpRequest {
        self.get(&format!("/chapters/{chapter_id}"))
    }

    pub fn build_genres(&self, page: &PageQuery) -> HttpRequest {
        self.get(&format!("/genres/{}", page.to_query_string()))
    }

    pub fn build_genre(&self, genre_id: u64) -> HttpRequest {
        self.get(&format!("/genres/{genre_id}"))
    }

    pub fn build_health(&self) -> HttpRequest {
        self.get("/")
    }

    /// Check for a 2xx status and deserialize the body. No validation beyond
    /// what the target type's shape requires.
    pub fn parse_json<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Async client: `NovelClient` plus a `Transport` that executes its requests.
///
/// One instance is built at startup and shared by every view. It does no
/// retrying, caching or deduplication; each call is an independent request.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    client: NovelClient,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(config, ReqwestTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: NovelClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &NovelClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch `path` (relative to the API base) and parse the JSON body.
    pub async fn request<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R, ApiError> {
        self.send(self.client.build_request(path, &options)).await
    }

    async fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let url = request.url.clone();
        debug!(%url, "api request");

        let result = match self.transport.execute(request).await {
            Ok(response) => self.client.parse_json(response),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            error!(%url, error = %err, "API Error");
        }
        result
    }

    pub async fn best_novels(&self, query: &BestNovelsQuery) -> Result<Vec<RawNovel>, ApiError> {
        self.send(self.client.build_best_novels(query)).await
    }

    pub async fn novels(&self, query: &NovelListQuery) -> Result<Vec<RawNovel>, ApiError> {
        self.send(self.client.build_novels(query)).await
    }

    pub async fn search_novels(&self, query: &SearchQuery) -> Result<Vec<RawNovel>, ApiError> {
        self.send(self.client.build_search_novels(query)).await
    }

    pub async fn novel(&self, novel_id: u64) -> Result<RawNovel, ApiError> {
        self.send(self.client.build_novel(novel_id)).await
    }

    pub async fn novel_chapters(
        &self,
        novel_id: u64,
        page: &PageQuery,
    ) -> Result<Vec<ChapterSummary>, ApiError> {
        self.send(self.client.build_novel_chapters(novel_id, page)).await
    }

    pub async fn chapter(&self, chapter_id: u64) -> Result<Chapter, ApiError> {
        self.send(self.client.build_chapter(chapter_id)).await
    }

    pub async fn genres(&self, page: &PageQuery) -> Result<Vec<Genre>, ApiError> {
        self.send(self.client.build_genres(page)).await
    }

    pub async fn genre(&self, genre_id: u64) -> Result<Genre, ApiError> {
        self.send(self.client.build_genre(genre_id)).await
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.send(self.client.build_health()).await
    }
}
