/// HTTP testing utilities
use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use patterncraft::http::owner::OWNER_HEADER;
use patterncraft::http::server::create_router;
use patterncraft::http::state::HttpServerState;
use patterncraft::patterns::PatternClassifier;
use patterncraft::storage::StorageInstance;
use patterncraft::test_utils::{multipart_content_type, multipart_file_body};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

const TEST_BODY_LIMIT: usize = 1024 * 1024;

/// HTTP test client for making requests to our app
pub struct TestApp {
    app: axum::Router,
}

impl TestApp {
    pub async fn new(storage: Arc<dyn StorageInstance>) -> Self {
        Self::with_upload_directory(storage, None).await
    }

    pub async fn with_upload_directory(
        storage: Arc<dyn StorageInstance>,
        upload_directory: Option<PathBuf>,
    ) -> Self {
        let state = HttpServerState {
            name: Arc::new("PatternCraft Test".to_string()),
            storage,
            classifier: Arc::new(PatternClassifier::default()),
            upload_directory,
            max_listed_patterns: 10,
        };

        // The router without the server-wide middleware
        let app = create_router(state, TEST_BODY_LIMIT);
        Self { app }
    }

    /// Uploads `content` as the `file` field of a multipart form.
    pub async fn upload(
        &self,
        owner: Option<&str>,
        file_name: &str,
        content_type: &str,
        content: &[u8],
    ) -> Result<TestResponse> {
        let mut request = Request::builder()
            .method("POST")
            .uri("/upload/csv")
            .header("content-type", multipart_content_type());
        if let Some(owner) = owner {
            request = request.header(OWNER_HEADER, owner);
        }
        let request = request.body(Body::from(multipart_file_body(
            "file",
            file_name,
            content_type,
            content,
        )))?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }

    /// Send a POST request with CSV data
    pub async fn post_csv(&self, path: &str, csv_data: &[u8]) -> Result<TestResponse> {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "text/csv")
            .body(Body::from(csv_data.to_vec()))?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }

    /// Send a GET request, as `owner` when given
    pub async fn get(&self, path: &str, owner: Option<&str>) -> Result<TestResponse> {
        let mut request = Request::builder().method("GET").uri(path);
        if let Some(owner) = owner {
            request = request.header(OWNER_HEADER, owner);
        }
        let request = request.body(Body::empty())?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }
}

/// Test response wrapper for easier assertions
pub struct TestResponse {
    status: StatusCode,
    body: String,
}

impl TestResponse {
    async fn new(response: axum::response::Response) -> Self {
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default()
            .to_vec();
        let body = String::from_utf8_lossy(&body_bytes).to_string();

        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse response body as JSON
    pub fn json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}. Body: {}",
            expected, self.status, self.body
        );
        self
    }
}
