//! Repository trait for the shortener backend.

use crate::domain::entities::{ShortenedUrl, UrlRecord, Visit, Visitor};
use crate::error::AppError;
use async_trait::async_trait;

/// Access to the REST backend that owns shortened URLs and their statistics.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpUrlRepository`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/http_repository.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Shortens `url` (`POST /url/create`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the backend rejects the URL.
    /// Returns [`AppError::Transport`] when the backend is unreachable.
    async fn create(&self, url: &str) -> Result<ShortenedUrl, AppError>;

    /// Lists URLs (`GET /url/all<query>`).
    ///
    /// `query` is either empty or a complete `?`-prefixed query string as
    /// produced by [`crate::domain::query::build_query`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`] on any failed call.
    async fn list(&self, query: &str) -> Result<Vec<UrlRecord>, AppError>;

    /// Per-day visit counters of one URL (`GET /url/{id}/visits`).
    async fn visits(&self, id: i64) -> Result<Vec<Visit>, AppError>;

    /// Distinct visitors of one URL (`GET /url/{id}/visitors`).
    async fn visitors(&self, id: i64) -> Result<Vec<Visitor>, AppError>;
}
