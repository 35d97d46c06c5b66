//! Visit and visitor statistics of a single short URL.

use std::sync::Arc;

use crate::domain::entities::{Visit, Visitor};
use crate::domain::repositories::UrlRepository;

/// Statistics loaded for the detail dialog.
///
/// A `None` list failed to load; the other list is still usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlDetails {
    pub id: i64,
    pub visits: Option<Vec<Visit>>,
    pub visitors: Option<Vec<Visitor>>,
}

impl UrlDetails {
    /// Visits summed over all loaded days.
    pub fn total_visits(&self) -> i64 {
        self.visits
            .as_deref()
            .map(|visits| visits.iter().map(|v| v.visits).sum())
            .unwrap_or(0)
    }
}

/// How the user left the detail dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Closed with an answer.
    Answered(String),
    /// Closed without an answer.
    Hidden,
    Cancelled,
}

impl DialogOutcome {
    pub fn status_message(&self) -> String {
        match self {
            DialogOutcome::Answered(answer) => {
                format!("You said the information was \"{answer}\".")
            }
            DialogOutcome::Hidden => "You closed the dialog.".to_string(),
            DialogOutcome::Cancelled => "You cancelled the dialog.".to_string(),
        }
    }
}

pub struct DetailsService<R: UrlRepository> {
    repository: Arc<R>,
}

impl<R: UrlRepository> DetailsService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Loads visits and visitors of URL `id` concurrently.
    ///
    /// Failures are logged and leave the corresponding list unset.
    pub async fn load(&self, id: i64) -> UrlDetails {
        let (visits, visitors) =
            tokio::join!(self.repository.visits(id), self.repository.visitors(id));

        let visits = visits
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to load visits"))
            .ok();
        let visitors = visitors
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to load visitors"))
            .ok();

        UrlDetails {
            id,
            visits,
            visitors,
        }
    }
}
