//! Repository trait definitions for the domain layer.
//!
//! The backend is an external collaborator; services only see it through
//! [`UrlRepository`], injected at construction time.
//!
//! - Implementations live in `crate::infrastructure::http`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
