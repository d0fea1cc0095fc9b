//! Client-side routes.
//!
//! Pages are addressed by entity id, and search state lives in the query
//! string so a search can be shared or bookmarked as a plain link.

use std::fmt;

use crate::query::SearchQuery;

/// Search filters as carried in `/search?...`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub q: Option<String>,
    pub genre_id: Option<u64>,
    pub status: Option<String>,
    pub min_rating: Option<f64>,
}

impl SearchParams {
    /// Parse `q=..&genre_id=..&status=..&min_rating=..`. Unknown keys are
    /// ignored; empty or unparseable values count as absent.
    pub fn from_query(query: &str) -> Self {
        let mut params = SearchParams::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = decode(value);
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "q" => params.q = Some(value.to_string()),
                "genre_id" => params.genre_id = value.parse().ok(),
                "status" => params.status = Some(value.to_string()),
                "min_rating" => params.min_rating = value.parse().ok(),
                _ => {}
            }
        }
        params
    }

    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            pairs.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(genre_id) = self.genre_id {
            pairs.push(format!("genre_id={genre_id}"));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(format!("status={}", urlencoding::encode(status)));
        }
        if let Some(min_rating) = self.min_rating {
            pairs.push(format!("min_rating={min_rating}"));
        }
        pairs.join("&")
    }

    pub fn is_empty(&self) -> bool {
        !self.to_query(0).has_filters()
    }

    pub fn to_query(&self, limit: u32) -> SearchQuery {
        SearchQuery {
            q: self.q.clone(),
            genre_id: self.genre_id,
            status: self.status.clone(),
            min_rating: self.min_rating,
            skip: 0,
            limit,
        }
    }

    /// Heading of the results page.
    pub fn title(&self) -> String {
        match self.q.as_deref().filter(|q| !q.is_empty()) {
            Some(q) => format!("Resultados para \"{q}\""),
            None if !self.is_empty() => "Búsqueda con filtros".to_string(),
            None => "Novelas Recientes".to_string(),
        }
    }

    /// One-line description of the active filters, empty when there are none.
    pub fn filter_summary(&self) -> String {
        let mut filters = Vec::new();
        if let Some(genre_id) = self.genre_id {
            filters.push(format!("Género: {genre_id}"));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            filters.push(format!("Estado: {status}"));
        }
        if let Some(min_rating) = self.min_rating {
            filters.push(format!("Rating mínimo: {min_rating}"));
        }
        filters.join(", ")
    }
}

fn decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Novel(u64),
    Chapter(u64),
    Search(SearchParams),
    AdvancedSearch,
    NotFound(String),
}

impl Route {
    pub fn parse(location: &str) -> Route {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["novel", id] => id
                .parse()
                .map(Route::Novel)
                .unwrap_or_else(|_| Route::NotFound(location.to_string())),
            ["chapter", id] => id
                .parse()
                .map(Route::Chapter)
                .unwrap_or_else(|_| Route::NotFound(location.to_string())),
            ["search"] => Route::Search(SearchParams::from_query(query)),
            ["search", "advanced"] => Route::AdvancedSearch,
            _ => Route::NotFound(location.to_string()),
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Novel(id) => format!("/novel/{id}"),
            Route::Chapter(id) => format!("/chapter/{id}"),
            Route::Search(params) => {
                let query = params.to_query_string();
                if query.is_empty() {
                    "/search".to_string()
                } else {
                    format!("/search?{query}")
                }
            }
            Route::AdvancedSearch => "/search/advanced".to_string(),
            Route::NotFound(location) => location.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entity_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/novel/42"), Route::Novel(42));
        assert_eq!(Route::parse("/chapter/7/"), Route::Chapter(7));
        assert_eq!(Route::parse("/search/advanced"), Route::AdvancedSearch);
        assert_eq!(
            Route::parse("/novel/abc"),
            Route::NotFound("/novel/abc".to_string())
        );
        assert_eq!(Route::parse("/admin"), Route::NotFound("/admin".to_string()));
    }

    #[test]
    fn parses_search_state_from_query() {
        let route = Route::parse("/search?q=lord+of%20the&genre_id=3&status=completed&min_rating=7.5&page=2");
        assert_eq!(
            route,
            Route::Search(SearchParams {
                q: Some("lord of the".to_string()),
                genre_id: Some(3),
                status: Some("completed".to_string()),
                min_rating: Some(7.5),
            })
        );
    }

    #[test]
    fn empty_values_are_absent() {
        let params = SearchParams::from_query("q=&genre_id=&status=ongoing");
        assert_eq!(params.q, None);
        assert_eq!(params.genre_id, None);
        assert_eq!(params.status.as_deref(), Some("ongoing"));
    }

    #[test]
    fn search_route_round_trips() {
        let route = Route::Search(SearchParams {
            q: Some("señor de los misterios".to_string()),
            genre_id: Some(2),
            status: None,
            min_rating: Some(8.0),
        });
        let path = route.to_path();
        assert_eq!(Route::parse(&path), route);
        assert_eq!(Route::Search(SearchParams::default()).to_path(), "/search");
    }

    #[test]
    fn titles_follow_active_filters() {
        let with_q = SearchParams {
            q: Some("lord".to_string()),
            ..SearchParams::default()
        };
        assert_eq!(with_q.title(), "Resultados para \"lord\"");

        let filtered = SearchParams {
            status: Some("hiatus".to_string()),
            min_rating: Some(6.0),
            ..SearchParams::default()
        };
        assert_eq!(filtered.title(), "Búsqueda con filtros");
        assert_eq!(filtered.filter_summary(), "Estado: hiatus, Rating mínimo: 6");

        assert_eq!(SearchParams::default().title(), "Novelas Recientes");
        assert!(SearchParams::default().is_empty());
    }
}
