//! Async API client core for the novel reading client.
//!
//! # Overview
//! Fetches novels, chapters and genres from the catalog API and normalizes
//! them into the view-model the pages consume. Request construction and
//! response parsing are pure (`NovelClient`); the network round-trip sits
//! behind the `Transport` trait so tests can substitute it.
//!
//! # Design
//! - `NovelClient` is stateless; it holds only the injected `ClientConfig`.
//! - `ApiClient` pairs it with a `Transport` and logs every failed request.
//! - `normalize` maps raw API novels onto `Novel`, idempotently.
//! - `fallback::resolve_novel` is the only place a failure is absorbed: a
//!   failed detail fetch falls back to the list endpoints, then to a
//!   placeholder.
//! - `views` holds one loader per page; `routes` maps pages to paths.

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod http;
pub mod normalize;
pub mod query;
pub mod routes;
pub mod types;
pub mod views;

#[cfg(test)]
mod testing;

pub use client::{ApiClient, NovelClient};
pub use config::ClientConfig;
pub use error::ApiError;
pub use fallback::{placeholder_novel, resolve_novel, NovelResolution};
pub use http::{HttpRequest, HttpResponse, RequestOptions, ReqwestTransport, Transport};
pub use normalize::{normalize_novel, normalize_novels};
pub use query::{BestNovelsQuery, NovelListQuery, PageQuery, SearchQuery};
pub use routes::{Route, SearchParams};
pub use types::{AlternativeName, Chapter, ChapterSummary, Genre, Health, Novel, NovelStatus, RawNovel};
pub use views::{ViewFailure, ViewState};
