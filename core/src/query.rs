//! Query-string construction for the list, search and page endpoints.
//!
//! Optional filters are appended only when they carry a "truthy" value: an
//! empty string, a zero id and a zero rating all count as absent and are
//! never sent. This means `min_rate = 0` cannot be expressed; see DESIGN.md.

/// Options for `GET /novels/best/`.
#[derive(Debug, Clone, PartialEq)]
pub struct BestNovelsQuery {
    pub limit: u32,
}

impl Default for BestNovelsQuery {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl BestNovelsQuery {
    pub fn to_query_string(&self) -> String {
        format!("?limit={}", self.limit)
    }
}

/// Options for the paginated `GET /novels/`.
#[derive(Debug, Clone, PartialEq)]
pub struct NovelListQuery {
    pub skip: u32,
    pub limit: u32,
    pub status: Option<String>,
    pub min_rate: Option<f64>,
}

impl Default for NovelListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 20,
            status: None,
            min_rate: None,
        }
    }
}

impl NovelListQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut query = format!("?skip={}&limit={}", self.skip, self.limit);
        if let Some(status) = present_str(&self.status) {
            query.push_str(&format!("&status={status}"));
        }
        if let Some(min_rate) = present_rating(self.min_rate) {
            query.push_str(&format!("&min_rate={min_rate}"));
        }
        query
    }
}

/// Options for `GET /novels/search/`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub genre_id: Option<u64>,
    pub status: Option<String>,
    pub min_rating: Option<f64>,
    pub skip: u32,
    pub limit: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            q: None,
            genre_id: None,
            status: None,
            min_rating: None,
            skip: 0,
            limit: 20,
        }
    }
}

impl SearchQuery {
    /// Whether any filter would make it into the query string.
    pub fn has_filters(&self) -> bool {
        present_str(&self.q).is_some()
            || self.genre_id.filter(|&id| id != 0).is_some()
            || present_str(&self.status).is_some()
            || present_rating(self.min_rating).is_some()
    }

    pub fn to_query_string(&self) -> String {
        let mut query = format!("?skip={}&limit={}", self.skip, self.limit);
        if let Some(q) = present_str(&self.q) {
            query.push_str(&format!("&q={}", encode_component(q)));
        }
        if let Some(genre_id) = self.genre_id.filter(|&id| id != 0) {
            query.push_str(&format!("&genre_id={genre_id}"));
        }
        if let Some(status) = present_str(&self.status) {
            query.push_str(&format!("&status={status}"));
        }
        if let Some(min_rating) = present_rating(self.min_rating) {
            query.push_str(&format!("&min_rating={min_rating}"));
        }
        query
    }
}

/// `skip`/`limit` pair for chapter and genre listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub skip: u32,
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { skip: 0, limit: 50 }
    }
}

impl PageQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self { skip: 0, limit }
    }

    pub fn to_query_string(&self) -> String {
        format!("?skip={}&limit={}", self.skip, self.limit)
    }
}

/// Percent-encode a query value with the URI-component unreserved set, which
/// also leaves `!'()*` as they are.
fn encode_component(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escaped, mark) in [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")] {
        encoded = encoded.replace(escaped, mark);
    }
    encoded
}

fn present_str(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn present_rating(value: Option<f64>) -> Option<f64> {
    value.filter(|r| *r != 0.0 && !r.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_defaults_to_ten() {
        assert_eq!(BestNovelsQuery::default().to_query_string(), "?limit=10");
    }

    #[test]
    fn list_without_filters_has_no_filter_tokens() {
        let query = NovelListQuery::with_limit(20).to_query_string();
        assert_eq!(query, "?skip=0&limit=20");
        assert!(!query.contains("status"));
        assert!(!query.contains("min_rate"));
    }

    #[test]
    fn list_appends_status_exactly_once() {
        let query = NovelListQuery {
            status: Some("ongoing".to_string()),
            ..NovelListQuery::with_limit(20)
        }
        .to_query_string();
        assert_eq!(query, "?skip=0&limit=20&status=ongoing");
        assert_eq!(query.matches("&status=ongoing").count(), 1);
    }

    #[test]
    fn list_drops_falsy_filters() {
        let query = NovelListQuery {
            status: Some(String::new()),
            min_rate: Some(0.0),
            ..NovelListQuery::default()
        }
        .to_query_string();
        assert_eq!(query, "?skip=0&limit=20");
    }

    #[test]
    fn list_formats_min_rate() {
        let query = NovelListQuery {
            skip: 40,
            min_rate: Some(7.5),
            ..NovelListQuery::default()
        }
        .to_query_string();
        assert_eq!(query, "?skip=40&limit=20&min_rate=7.5");
    }

    #[test]
    fn search_encodes_q_and_orders_params() {
        let query = SearchQuery {
            q: Some("lord of mysteries & co".to_string()),
            genre_id: Some(3),
            status: Some("completed".to_string()),
            min_rating: Some(8.0),
            limit: 50,
            ..SearchQuery::default()
        };
        assert!(query.has_filters());
        assert_eq!(
            query.to_query_string(),
            "?skip=0&limit=50&q=lord%20of%20mysteries%20%26%20co&genre_id=3&status=completed&min_rating=8"
        );
    }

    #[test]
    fn search_term_keeps_uri_component_marks() {
        let query = SearchQuery {
            q: Some("it's (not) 100%*!".to_string()),
            ..SearchQuery::default()
        };
        assert_eq!(
            query.to_query_string(),
            "?skip=0&limit=20&q=it's%20(not)%20100%25*!"
        );
    }

    #[test]
    fn search_with_only_falsy_values_has_no_filters() {
        let query = SearchQuery {
            q: Some(String::new()),
            genre_id: Some(0),
            min_rating: Some(0.0),
            ..SearchQuery::default()
        };
        assert!(!query.has_filters());
        assert_eq!(query.to_query_string(), "?skip=0&limit=20");
    }

    #[test]
    fn page_defaults_to_fifty() {
        assert_eq!(PageQuery::default().to_query_string(), "?skip=0&limit=50");
        assert_eq!(PageQuery::with_limit(100).to_query_string(), "?skip=0&limit=100");
    }
}
