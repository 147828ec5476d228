//! Search cycle state machine for one finder screen.
//!
//! `Idle -> Validating -> Requesting -> Idle`. Validation failures return to
//! `Idle` with a warning and never reach the network. A request failure
//! returns to `Idle` with an error and leaves the previous results alone.

use tracing::{info, warn};

use crate::finder::client::StationSource;
use crate::finder::errors::FinderError;
use crate::finder::form::SearchForm;
use crate::finder::notification::{Notification, NotificationKind};
use crate::models::{SearchQuery, SearchResultSet, StationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Requesting,
}

/// Display state of the finder: form, loading flag, results and dialog
#[derive(Debug, Default)]
pub struct FinderController {
    pub form: SearchForm,
    results: SearchResultSet,
    loading: bool,
    phase: Phase,
    notification: Option<Notification>,
}

impl FinderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: SearchForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn results(&self) -> &[StationResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Submit is disabled while a request is outstanding
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Validate the form and enter `Requesting`.
    ///
    /// Returns the query to send, or `None` when validation failed and a
    /// warning is now showing.
    pub fn begin_submit(&mut self) -> Option<SearchQuery> {
        self.phase = Phase::Validating;

        match self.form.to_query() {
            Ok(query) => {
                info!(
                    "Submitting search: lat={} lon={} type={}",
                    query.latitude,
                    query.longitude,
                    query.charging_type.as_str()
                );
                self.phase = Phase::Requesting;
                self.loading = true;
                self.notification = Some(Notification::progress());
                Some(query)
            }
            Err(err) => {
                warn!("Search not submitted: {}", err);
                self.phase = Phase::Idle;
                self.notification = Some(Notification::from_error(&err));
                None
            }
        }
    }

    /// Settle a request. Results are replaced only on success.
    pub fn complete(&mut self, outcome: Result<SearchResultSet, FinderError>) {
        match outcome {
            Ok(stations) => {
                info!("Showing {} stations", stations.len());
                self.results = stations;
                self.notification = None;
            }
            Err(err) => {
                warn!("Station search failed: {}", err);
                self.notification = Some(Notification::from_error(&err));
            }
        }

        self.loading = false;
        self.phase = Phase::Idle;
    }

    /// Run one full search cycle against `source`
    pub async fn submit(&mut self, source: &dyn StationSource) {
        if let Some(query) = self.begin_submit() {
            let outcome = source.find_stations(&query).await;
            self.complete(outcome);
        }
    }

    /// Close a warning or error dialog. The progress dialog stays up.
    pub fn dismiss_notification(&mut self) -> bool {
        match &self.notification {
            Some(note) if note.is_dismissible() => {
                self.notification = None;
                true
            }
            _ => false,
        }
    }

    pub fn has_blocking_notification(&self) -> bool {
        self.notification
            .as_ref()
            .map(|n| n.kind == NotificationKind::Progress)
            .unwrap_or(false)
    }
}
