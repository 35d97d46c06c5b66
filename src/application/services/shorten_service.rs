//! Shorten form: submit a URL and keep the resulting short link.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use validator::Validate;

use crate::application::notice::{Notice, Notifier};
use crate::domain::entities::ShortenedUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::prepare_url;

pub const INVALID_URL_MESSAGE: &str = "Provide us a valid URL address";

/// Body of `POST /url/create`.
#[derive(Debug, Serialize, Validate)]
pub struct ShortenRequest {
    #[validate(url(message = "Provide us a valid URL address"))]
    pub url: String,
}

/// State of the shorten form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShortenForm {
    pub url: Option<String>,
    pub short_url: Option<String>,
    /// Set once a short link was produced, until the form is reset.
    pub submit_disabled: bool,
}

/// Service behind the shorten form.
///
/// Invalid input never reaches the backend. Every outcome is reported to the
/// [`Notifier`] as well as returned.
pub struct ShortenService<R: UrlRepository, N: Notifier> {
    repository: Arc<R>,
    notifier: Arc<N>,
    form: ShortenForm,
}

impl<R: UrlRepository, N: Notifier> ShortenService<R, N> {
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
            form: ShortenForm::default(),
        }
    }

    pub fn form(&self) -> &ShortenForm {
        &self.form
    }

    /// Submits `input` for shortening.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input is empty or not an HTTP(S)
    /// URL, or if a short link is already shown and the form was not reset.
    /// Backend failures are passed through unchanged.
    pub async fn shorten(&mut self, input: &str) -> Result<ShortenedUrl, AppError> {
        if self.form.submit_disabled {
            let err = AppError::bad_request(
                "Reset the form before shortening another URL",
                json!({ "short_url": self.form.short_url }),
            );
            self.notifier.notify(Notice::error(err.user_message()));
            return Err(err);
        }

        self.form.url = Some(input.to_string());

        let request = match prepare_url(input) {
            Ok(url) => ShortenRequest { url },
            Err(e) => return Err(self.reject(json!({ "reason": e.to_string() }))),
        };
        if let Err(e) = request.validate() {
            return Err(self.reject(json!({ "reason": e.to_string() })));
        }

        tracing::debug!(url = %request.url, "Submitting URL for shortening");

        match self.repository.create(&request.url).await {
            Ok(shortened) => {
                tracing::info!(
                    short_url = %shortened.shorten_url,
                    created = shortened.created,
                    "URL shortened"
                );
                self.form.short_url = Some(shortened.shorten_url.clone());
                self.form.submit_disabled = true;
                self.notifier.notify(Notice::info(shortened.shorten_url.clone()));
                Ok(shortened)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Shortening failed");
                self.form.short_url = None;
                self.notifier.notify(Notice::error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Clears input and result so another URL can be submitted.
    pub fn reset_results(&mut self) {
        self.form = ShortenForm::default();
    }

    fn reject(&self, details: serde_json::Value) -> AppError {
        self.notifier.notify(Notice::error(INVALID_URL_MESSAGE));
        AppError::bad_request(INVALID_URL_MESSAGE, details)
    }
}
