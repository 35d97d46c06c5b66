//! Core data structures of the client.
//!
//! # Entity Types
//!
//! - [`FilterState`] - Mutable filter record of the listing view
//! - [`UrlRecord`] - A shortened URL as listed by the backend
//! - [`Visit`] / [`Visitor`] - Statistics shown in the detail dialog
//! - [`ShortenedUrl`] - Result of a create call

pub mod filter;
pub mod url_record;
pub mod visit;

pub use filter::{DateFilterKind, DateFilterMode, FilterState, SortOrder};
pub use url_record::{ShortenedUrl, UrlRecord};
pub use visit::{Visit, Visitor};
