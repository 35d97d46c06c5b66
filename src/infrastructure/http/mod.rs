//! HTTP access to the shortener backend.

pub mod http_url_repository;

pub use http_url_repository::HttpUrlRepository;
