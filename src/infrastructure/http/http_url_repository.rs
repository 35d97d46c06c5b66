//! HTTP implementation of the URL repository.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::Config;
use crate::domain::entities::{ShortenedUrl, UrlRecord, Visit, Visitor};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, map_reqwest_error, map_status_error};

/// Header Django reads the CSRF token from.
const CSRF_HEADER: &str = "X-CSRFToken";
const CSRF_COOKIE: &str = "csrftoken";

#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(rename = "shortenUrl")]
    shorten_url: String,
}

/// [`UrlRepository`] talking to the backend over HTTP.
///
/// Calls are neither retried nor cancelled. Without a configured timeout a
/// call waits for as long as the connection stays open.
#[derive(Debug, Clone)]
pub struct HttpUrlRepository {
    base_url: String,
    csrf_token: Option<String>,
    http: Client,
}

impl HttpUrlRepository {
    /// Creates a repository for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty base URL and
    /// [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        csrf_token: Option<String>,
    ) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(AppError::bad_request(
                "Backend base URL must not be empty",
                json!({}),
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            AppError::internal("Failed to build HTTP client", json!({ "reason": e.to_string() }))
        })?;

        Ok(Self {
            base_url,
            csrf_token: csrf_token.filter(|t| !t.is_empty()),
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            &config.api_url,
            config.request_timeout(),
            config.csrf_token.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.csrf_token {
            Some(token) => request
                .header(CSRF_HEADER, token)
                .header(COOKIE, format!("{CSRF_COOKIE}={token}")),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = self
            .with_csrf(request)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&self.base_url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Backend rejected request");
            return Err(map_status_error(status, &body));
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");

        self.send(self.http.get(&url))
            .await?
            .json::<T>()
            .await
            .map_err(|e| map_reqwest_error(&self.base_url, e))
    }
}

#[async_trait]
impl UrlRepository for HttpUrlRepository {
    async fn create(&self, url: &str) -> Result<ShortenedUrl, AppError> {
        let endpoint = self.endpoint("/url/create");
        tracing::debug!(url = %endpoint, "POST");

        let response = self
            .send(self.http.post(&endpoint).json(&json!({ "url": url })))
            .await?;
        let created = response.status() == StatusCode::CREATED;

        let body: CreateResponse = response
            .json()
            .await
            .map_err(|e| map_reqwest_error(&self.base_url, e))?;

        Ok(ShortenedUrl {
            shorten_url: body.shorten_url,
            created,
        })
    }

    async fn list(&self, query: &str) -> Result<Vec<UrlRecord>, AppError> {
        self.get_json(&format!("/url/all{query}")).await
    }

    async fn visits(&self, id: i64) -> Result<Vec<Visit>, AppError> {
        self.get_json(&format!("/url/{id}/visits")).await
    }

    async fn visitors(&self, id: i64) -> Result<Vec<Visitor>, AppError> {
        self.get_json(&format!("/url/{id}/visitors")).await
    }
}
