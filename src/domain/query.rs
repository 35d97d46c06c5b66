//! Query string synthesis for the URL listing.
//!
//! [`build_query`] is the pure translation of a [`FilterState`] into a query
//! string. [`QueryBuilder`] wraps it in the two-phase flow used by the listing
//! view: the pending query is regenerated whenever the observed filter state
//! changes, and only becomes visible to fetches after [`QueryBuilder::commit`].
//!
//! # Grammar
//!
//! ```text
//! query := "" | "?" param ("&" param)*
//! param := "from_date=" DATE "&to_date=" DATE
//!        | "date=" DATE
//!        | "order_by=" ["-"] FIELD
//!        | "results=" POSITIVE_INT
//! DATE  := dd/MM/yyyy
//! ```

use serde_json::json;
use url::form_urlencoded;

use crate::domain::entities::FilterState;
use crate::error::AppError;
use crate::utils::date_format::format_date;

pub const DATE_RANGE_MESSAGE: &str = "From date must be before due date";
pub const LIMIT_MESSAGE: &str = "Results limit must be a positive number";

/// Builds the list query for `filter`.
///
/// A non-positive `limit` is discarded from `filter` and contributes nothing;
/// this is the only mutation performed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when `from_date` is later than `to_date`.
/// `filter` is left untouched in that case.
pub fn build_query(filter: &mut FilterState) -> Result<String, AppError> {
    let mut params: Vec<String> = Vec::new();

    if let (Some(from), Some(to)) = (filter.from_date, filter.to_date) {
        if from > to {
            return Err(AppError::bad_request(
                DATE_RANGE_MESSAGE,
                json!({ "from_date": format_date(from), "to_date": format_date(to) }),
            ));
        }
        params.push(format!(
            "from_date={}&to_date={}",
            format_date(from),
            format_date(to)
        ));
    } else if let Some(date) = filter.date {
        params.push(format!("date={}", format_date(date)));
    }

    if let Some(sort) = filter.sort.as_deref() {
        let field: String = form_urlencoded::byte_serialize(sort.as_bytes()).collect();
        params.push(format!("order_by={}{}", filter.order.prefix(), field));
    }

    match filter.limit {
        Some(limit) if limit > 0 => params.push(format!("results={limit}")),
        Some(limit) => {
            tracing::debug!(limit, "Discarding non-positive result limit");
            filter.limit = None;
        }
        None => {}
    }

    if params.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("?{}", params.join("&")))
    }
}

/// Two-phase query state: regenerate on change, apply on demand.
#[derive(Debug, Default, Clone)]
pub struct QueryBuilder {
    observed: Option<FilterState>,
    /// Set while the last observed state failed to build.
    rejection: Option<AppError>,
    pending: String,
    committed: String,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the pending query if `filter` differs from the last observed state.
    ///
    /// A changed `from_date` first re-applies its constraints on `to_date`
    /// (see [`FilterState::follow_from_date`]).
    ///
    /// Returns `Ok(false)` when nothing changed.
    ///
    /// # Errors
    ///
    /// Propagates the validation error of [`build_query`]; the pending query
    /// keeps its previous value and the invalid state counts as observed.
    pub fn observe(&mut self, filter: &mut FilterState) -> Result<bool, AppError> {
        let from_changed = match &self.observed {
            Some(previous) if *previous == *filter => return Ok(false),
            Some(previous) => previous.from_date != filter.from_date,
            None => true,
        };

        if from_changed {
            filter.follow_from_date();
        }

        let result = build_query(filter);
        self.observed = Some(filter.clone());

        let query = result.inspect_err(|e| self.rejection = Some(e.clone()))?;
        tracing::debug!(query = %query, "Regenerated list query");
        self.rejection = None;
        self.pending = query;
        Ok(true)
    }

    /// Error of the last observed state, if it could not be turned into a query.
    pub fn rejection(&self) -> Option<&AppError> {
        self.rejection.as_ref()
    }

    /// Query built from the latest valid filter state, not yet applied.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Query used by list fetches.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Makes the pending query the one used by fetches.
    ///
    /// # Errors
    ///
    /// Returns the rejection of the last observed state; the pending query
    /// then belongs to an earlier state and the committed one is left as is.
    pub fn commit(&mut self) -> Result<&str, AppError> {
        if let Some(e) = &self.rejection {
            return Err(e.clone());
        }
        self.committed.clone_from(&self.pending);
        Ok(&self.committed)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
