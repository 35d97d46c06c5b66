//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application
//! layers.
//!
//! # Modules
//!
//! - [`http`] - `reqwest` implementation of the backend repository
//! - [`notify`] - Terminal notice sink

pub mod http;
pub mod notify;
