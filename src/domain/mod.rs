//! Domain layer: filter state, query synthesis and the backend contract.
//!
//! - [`entities`] - Filter state and backend records
//! - [`query`] - Query builder turning a filter state into a list query
//! - [`repositories`] - Backend access trait
//!
//! Nothing in here performs I/O; the HTTP implementation of
//! [`repositories::UrlRepository`] lives in [`crate::infrastructure`].

pub mod entities;
pub mod query;
pub mod repositories;
