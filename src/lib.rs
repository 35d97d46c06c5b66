//! # URL Shortener Client
//!
//! Client-side controller logic for a URL shortening service: a form that
//! turns a URL into a short link, a listing with date/sort/limit filtering,
//! and a detail view with visit and visitor statistics.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Filter state, query builder and the backend trait
//! - **Application Layer** ([`application`]) - View controllers and user notices
//! - **Infrastructure Layer** ([`infrastructure`]) - `reqwest` backend client, terminal notices
//!
//! ## Query building
//!
//! The listing keeps a [`domain::entities::FilterState`]. Every mutation
//! regenerates a pending query string; [`application::services::ListingService::apply_query`]
//! commits it and fetches `GET /url/all<query>`:
//!
//! ```ignore
//! let mut listing = ListingService::new(repository, notifier);
//! listing.set_sort(Some("clicks"), SortOrder::Descending);
//! listing.set_limit(Some(5));
//! assert_eq!(listing.pending_query(), "?order_by=-clicks&results=5");
//! listing.apply_query().await?;
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::notice::{Notice, NoticeKind, Notifier};
    pub use crate::application::services::{
        DetailsService, DialogOutcome, ListingService, ShortenService, UrlDetails,
    };
    pub use crate::domain::entities::{
        DateFilterKind, DateFilterMode, FilterState, ShortenedUrl, SortOrder, UrlRecord, Visit,
        Visitor,
    };
    pub use crate::domain::query::{QueryBuilder, build_query};
    pub use crate::domain::repositories::UrlRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::http::HttpUrlRepository;
    pub use crate::infrastructure::notify::ConsoleNotifier;
}
