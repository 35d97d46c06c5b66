//! Helper functions shared across layers.
//!
//! - [`date_format`] - `dd/MM/yyyy` formatting, parsing and serde adapter
//! - [`url_normalizer`] - Light cleanup of user supplied URLs before submission

pub mod date_format;
pub mod url_normalizer;
