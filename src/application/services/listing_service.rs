//! URL listing view: filter state, query lifecycle and the displayed list.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::notice::{Notice, Notifier, SHORT_DELAY};
use crate::application::services::details_service::{DetailsService, DialogOutcome, UrlDetails};
use crate::domain::entities::{DateFilterKind, FilterState, SortOrder, UrlRecord};
use crate::domain::query::{LIMIT_MESSAGE, QueryBuilder};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Controller of the listing view.
///
/// Every filter mutation goes through an observe step: the `from_date`
/// constraints are re-applied and the pending query is rebuilt when the state
/// actually changed. Fetches only ever use the committed query.
///
/// # Concurrency
///
/// The service has a single owner. A later fetch overwrites the displayed list
/// regardless of how earlier fetches ended.
pub struct ListingService<R: UrlRepository, N: Notifier> {
    repository: Arc<R>,
    notifier: Arc<N>,
    details: DetailsService<R>,
    filter: FilterState,
    query: QueryBuilder,
    urls: Vec<UrlRecord>,
    status: Option<String>,
}

impl<R: UrlRepository, N: Notifier> ListingService<R, N> {
    /// Creates the view with an unset filter and an empty list.
    ///
    /// Call [`Self::refresh`] to perform the initial fetch.
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        let mut service = Self {
            details: DetailsService::new(repository.clone()),
            repository,
            notifier,
            filter: FilterState::new(),
            query: QueryBuilder::new(),
            urls: Vec::new(),
            status: None,
        };
        service.observe();
        service
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn urls(&self) -> &[UrlRecord] {
        &self.urls
    }

    pub fn pending_query(&self) -> &str {
        self.query.pending()
    }

    pub fn committed_query(&self) -> &str {
        self.query.committed()
    }

    /// Status line left by the last detail dialog.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Applies an arbitrary mutation to the filter state.
    ///
    /// Returns `false` if the resulting state was rejected (inverted date range
    /// or non-positive limit); the user has been notified. An inverted range
    /// keeps the previous pending query and blocks [`Self::apply_query`] until
    /// it is corrected.
    pub fn update(&mut self, mutate: impl FnOnce(&mut FilterState)) -> bool {
        mutate(&mut self.filter);
        self.observe()
    }

    /// Switches between range and single-date filtering, seeded with `today`.
    pub fn select_date_filter(&mut self, kind: DateFilterKind, today: NaiveDate) -> bool {
        self.update(|f| f.select_mode(kind, today))
    }

    pub fn set_from_date(&mut self, date: Option<NaiveDate>) -> bool {
        self.update(|f| f.from_date = date)
    }

    pub fn set_to_date(&mut self, date: Option<NaiveDate>) -> bool {
        self.update(|f| f.to_date = date)
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) -> bool {
        self.update(|f| f.date = date)
    }

    pub fn set_sort(&mut self, field: Option<&str>, order: SortOrder) -> bool {
        self.update(|f| f.set_sort(field, order))
    }

    /// Sets the result cap.
    ///
    /// A non-positive value is discarded by the rebuild, the user is notified
    /// and `false` is returned.
    pub fn set_limit(&mut self, limit: Option<i64>) -> bool {
        self.update(|f| f.limit = limit)
    }

    /// Fetches with the currently committed query.
    pub async fn refresh(&mut self) -> Result<&[UrlRecord], AppError> {
        let query = self.query.committed().to_string();
        self.query_urls(&query).await
    }

    /// Commits the pending query and fetches with it.
    ///
    /// # Errors
    ///
    /// When the current filter state was rejected nothing is requested: the
    /// user is notified again and the validation error is returned.
    pub async fn apply_query(&mut self) -> Result<&[UrlRecord], AppError> {
        let query = match self.query.commit() {
            Ok(query) => query.to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "Refusing to apply rejected filter");
                self.notifier.notify(Notice::error(e.user_message()));
                return Err(e);
            }
        };
        self.query_urls(&query).await
    }

    /// Clears all filters and fetches the unfiltered list.
    pub async fn reset_filters(&mut self) -> Result<&[UrlRecord], AppError> {
        self.filter.reset();
        self.query.reset();
        self.observe();
        self.query_urls("").await
    }

    /// Fetches the list for `query` and replaces the displayed rows on success.
    ///
    /// # Errors
    ///
    /// Transport failures are returned after notifying the user; the
    /// previously displayed list is kept.
    pub async fn query_urls(&mut self, query: &str) -> Result<&[UrlRecord], AppError> {
        self.notifier.notify(Notice::info("Processing..."));

        match self.repository.list(query).await {
            Ok(urls) => {
                tracing::debug!(query, count = urls.len(), "Fetched URL list");
                self.notifier
                    .notify(Notice::info("Done!").hide_after(SHORT_DELAY));
                self.urls = urls;
                Ok(&self.urls)
            }
            Err(e) => {
                tracing::error!(query, error = %e, "Failed to fetch URL list");
                self.notifier
                    .notify(Notice::error("Something went wrong").hide_after(SHORT_DELAY));
                Err(e)
            }
        }
    }

    /// Loads the statistics shown in the detail dialog of URL `id`.
    pub async fn open_details(&self, id: i64) -> UrlDetails {
        self.details.load(id).await
    }

    pub fn record_dialog_outcome(&mut self, outcome: DialogOutcome) {
        self.status = Some(outcome.status_message());
    }

    fn observe(&mut self) -> bool {
        let discarded_limit = self.filter.limit.filter(|limit| *limit <= 0);
        match self.query.observe(&mut self.filter) {
            Ok(_) if discarded_limit.is_some() => {
                tracing::debug!(limit = ?discarded_limit, "Result limit rejected");
                self.notifier.notify(Notice::error(LIMIT_MESSAGE));
                false
            }
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Filter state rejected");
                self.notifier.notify(Notice::error(e.user_message()));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::notice::MockNotifier;
    use crate::domain::query::{DATE_RANGE_MESSAGE, LIMIT_MESSAGE};
    use crate::domain::repositories::MockUrlRepository;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: i64) -> UrlRecord {
        UrlRecord {
            id,
            short_url: format!("http://sho.rt/url/{id:05}"),
            redirect_url: "http://example.com".to_string(),
            created: ymd(2024, 1, 1),
            last_ip: String::new(),
            visits: 0,
        }
    }

    fn recording_notifier() -> (MockNotifier, Arc<Mutex<Vec<Notice>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .returning(move |notice| sink.lock().unwrap().push(notice));
        (notifier, log)
    }

    #[tokio::test]
    async fn test_pending_query_is_used_only_after_apply() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list()
            .withf(|query| query.is_empty())
            .times(1)
            .returning(|_| Ok(vec![record(1), record(2)]));
        repo.expect_list()
            .withf(|query| query == "?order_by=-clicks&results=5")
            .times(1)
            .returning(|_| Ok(vec![record(2)]));
        let (notifier, _log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        service.set_sort(Some("clicks"), SortOrder::Descending);
        service.set_limit(Some(5));

        assert_eq!(service.pending_query(), "?order_by=-clicks&results=5");
        assert_eq!(service.committed_query(), "");

        assert_eq!(service.refresh().await.unwrap().len(), 2);
        assert_eq!(service.apply_query().await.unwrap().len(), 1);
        assert_eq!(service.committed_query(), "?order_by=-clicks&results=5");
    }

    #[tokio::test]
    async fn test_fetch_notices() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list().returning(|_| Ok(vec![]));
        let (notifier, log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        service.refresh().await.unwrap();

        let notices = log.lock().unwrap();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].message, "Processing...");
        assert_eq!(notices[1].message, "Done!");
        assert_eq!(notices[1].hide_delay, Some(SHORT_DELAY));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let calls = AtomicUsize::new(0);
        let mut repo = MockUrlRepository::new();
        repo.expect_list().times(2).returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![record(1)])
            } else {
                Err(AppError::transport("Server responded with 500", json!({})))
            }
        });
        let (notifier, log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        service.refresh().await.unwrap();
        assert!(service.refresh().await.is_err());

        assert_eq!(service.urls(), &[record(1)]);
        let notices = log.lock().unwrap();
        let last = notices.last().unwrap();
        assert_eq!(last.message, "Something went wrong");
        assert!(last.is_error());
    }

    #[test]
    fn test_inverted_range_notifies_and_keeps_pending() {
        let repo = MockUrlRepository::new();
        let (notifier, log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        assert!(service.select_date_filter(DateFilterKind::Range, ymd(2024, 1, 10)));
        assert_eq!(
            service.pending_query(),
            "?from_date=10/01/2024&to_date=10/01/2024"
        );

        assert!(!service.set_to_date(Some(ymd(2024, 1, 5))));

        assert_eq!(
            service.pending_query(),
            "?from_date=10/01/2024&to_date=10/01/2024"
        );
        let notices = log.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, DATE_RANGE_MESSAGE);
        assert!(notices[0].is_error());
    }

    #[test]
    fn test_from_date_change_clamps_to_date() {
        let repo = MockUrlRepository::new();
        let (notifier, log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        service.select_date_filter(DateFilterKind::Range, ymd(2024, 1, 5));

        assert!(service.set_from_date(Some(ymd(2024, 1, 12))));

        assert_eq!(service.filter().to_date, Some(ymd(2024, 1, 12)));
        assert_eq!(service.filter().min_to_date, Some(ymd(2024, 1, 12)));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_switching_modes_rebuilds_query() {
        let repo = MockUrlRepository::new();
        let (notifier, _log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        service.select_date_filter(DateFilterKind::Range, ymd(2024, 3, 1));
        service.select_date_filter(DateFilterKind::Date, ymd(2024, 3, 1));
        service.set_sort(Some("name"), SortOrder::Ascending);
        service.set_limit(Some(10));

        assert_eq!(
            service.pending_query(),
            "?date=01/03/2024&order_by=name&results=10"
        );
    }

    #[test]
    fn test_non_positive_limit_is_cleared_and_notified() {
        let repo = MockUrlRepository::new();
        let (notifier, log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        service.set_sort(Some("name"), SortOrder::Ascending);
        assert!(!service.set_limit(Some(-3)));

        assert!(service.filter().limit.is_none());
        assert_eq!(service.pending_query(), "?order_by=name");
        let notices = log.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, LIMIT_MESSAGE);
        assert!(notices[0].is_error());
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let repo = MockUrlRepository::new();
        let (notifier, log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        assert!(!service.set_limit(Some(0)));
        assert!(service.set_limit(Some(2)));

        assert_eq!(service.pending_query(), "?results=2");
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_apply_after_inverted_range_sends_nothing() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list()
            .withf(|query| query == "?from_date=05/01/2024&to_date=20/01/2024")
            .times(1)
            .returning(|_| Ok(vec![record(1)]));
        let (notifier, log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        service.select_date_filter(DateFilterKind::Range, ymd(2024, 1, 5));
        service.set_to_date(Some(ymd(2024, 1, 10)));
        assert!(!service.set_to_date(Some(ymd(2024, 1, 1))));

        let err = service.apply_query().await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.committed_query(), "");
        {
            let notices = log.lock().unwrap();
            assert_eq!(notices.len(), 2);
            assert!(notices.iter().all(|n| n.message == DATE_RANGE_MESSAGE));
        }

        assert!(service.set_to_date(Some(ymd(2024, 1, 20))));
        assert_eq!(service.apply_query().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_filters() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list()
            .withf(|query| query == "?results=3")
            .times(1)
            .returning(|_| Ok(vec![record(1)]));
        repo.expect_list()
            .withf(|query| query.is_empty())
            .times(1)
            .returning(|_| Ok(vec![record(1), record(2), record(3), record(4)]));
        let (notifier, _log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        service.set_limit(Some(3));
        service.apply_query().await.unwrap();

        let urls = service.reset_filters().await.unwrap();
        assert_eq!(urls.len(), 4);
        assert_eq!(service.filter(), &FilterState::default());
        assert_eq!(service.pending_query(), "");
        assert_eq!(service.committed_query(), "");
    }

    #[tokio::test]
    async fn test_details_and_dialog_status() {
        let mut repo = MockUrlRepository::new();
        repo.expect_visits().returning(|_| Ok(vec![]));
        repo.expect_visitors().returning(|_| Ok(vec![]));
        let (notifier, _log) = recording_notifier();

        let mut service = ListingService::new(Arc::new(repo), Arc::new(notifier));
        let details = service.open_details(9).await;
        assert_eq!(details.id, 9);
        assert!(service.status().is_none());

        service.record_dialog_outcome(DialogOutcome::Cancelled);
        assert_eq!(service.status(), Some("You cancelled the dialog."));
    }
}
