//! Application layer: view controllers built on the domain layer.
//!
//! Services receive their backend ([`crate::domain::repositories::UrlRepository`])
//! and their [`notice::Notifier`] through the constructor and report every
//! user-visible outcome as a [`notice::Notice`].
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Shorten form
//! - [`services::listing_service::ListingService`] - Filtered URL listing
//! - [`services::details_service::DetailsService`] - Visit/visitor statistics

pub mod notice;
pub mod services;
