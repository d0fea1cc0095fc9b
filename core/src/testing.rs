//! In-memory `Transport` double shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub const BASE: &str = "http://api.test/api/v1";

/// Answers requests from a fixed table keyed by path (relative to `BASE`,
/// query string included). Unknown paths get a 404.
#[derive(Debug, Default)]
pub struct StubTransport {
    routes: HashMap<String, Result<HttpResponse, ApiError>>,
    seen: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, path: &str, body: serde_json::Value) -> Self {
        self.routes.insert(
            path.to_string(),
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn status(mut self, path: &str, status: u16) -> Self {
        self.routes.insert(
            path.to_string(),
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: String::new(),
            }),
        );
        self
    }

    pub fn offline(mut self, path: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Err(ApiError::TransportError("connection refused".to_string())),
        );
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.lock().unwrap().push(request.url.clone());
        let path = request.url.strip_prefix(BASE).unwrap_or(&request.url);
        self.routes.get(path).cloned().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: r#"{"detail":"Not Found"}"#.to_string(),
            })
        })
    }
}

pub fn stub_api(transport: StubTransport) -> ApiClient<StubTransport> {
    ApiClient::new(ClientConfig::new(BASE), transport)
}

/// A list-endpoint novel payload.
pub fn novel_json(id: u64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Novel {id}"),
        "author": "Author",
        "description": "",
        "rating": 8.0,
        "status": status,
        "cover_path": format!("/static/novels/{id}.jpg"),
        "cover_url": format!("http://localhost:8000/images/{id}.jpg"),
        "source_url": null,
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-02T00:00:00"
    })
}
