//! Controllers of the three views: shorten form, listing and detail dialog.

pub mod details_service;
pub mod listing_service;
pub mod shorten_service;

pub use details_service::{DetailsService, DialogOutcome, UrlDetails};
pub use listing_service::ListingService;
pub use shorten_service::{ShortenForm, ShortenService};
