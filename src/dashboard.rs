use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::client::RankingBackend;
use crate::data_models::{Query, SearchResult};
use crate::error::{ClientError, FAILURE_MESSAGE, ValidationError};
use crate::input::InputCollector;
use crate::rank::{RankOutcome, derive_rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    Idle,
    Loading,
    Success,
    Error,
}

/// User-visible problem attached to the `Error` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Validation(ValidationError),
    Failure,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Validation(e) => e.to_string(),
            Notice::Failure => FAILURE_MESSAGE.to_string(),
        }
    }
}

/// A submission that passed validation and is waiting for its response.
#[derive(Debug, Clone)]
pub struct Submission {
    pub generation: u64,
    pub query: Query,
    pub cancel: CancellationToken,
}

/// Serializable copy of everything the dashboard panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: UiState,
    pub generation: u64,
    pub input: InputCollector,
    pub results: Vec<SearchResult>,
    pub rank: Option<RankOutcome>,
    pub rank_message: Option<String>,
    pub error: Option<String>,
}

/// The dashboard model: inputs, the request state machine and the last
/// applied response.
///
/// Every submission bumps `generation`; a completion is applied only when it
/// carries the current generation, so an older response that arrives late is
/// dropped instead of overwriting newer state.
#[derive(Debug)]
pub struct Dashboard {
    input: InputCollector,
    state: UiState,
    results: Vec<SearchResult>,
    rank: Option<RankOutcome>,
    notice: Option<Notice>,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard {
            input: InputCollector::new(),
            state: UiState::Idle,
            results: Vec::new(),
            rank: None,
            notice: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn input(&self) -> &InputCollector {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputCollector {
        &mut self.input
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn rank(&self) -> Option<&RankOutcome> {
        self.rank.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new submission from the current inputs.
    ///
    /// Clears the previous results, rank and notice, and cancels whatever
    /// request was still in flight. On invalid input the dashboard moves to
    /// `Error` with a validation notice and nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<Submission, ValidationError> {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.generation += 1;
        self.results.clear();
        self.rank = None;
        self.notice = None;

        match self.input.validate() {
            Ok(query) => {
                let cancel = CancellationToken::new();
                self.in_flight = Some(cancel.clone());
                self.state = UiState::Loading;
                Ok(Submission {
                    generation: self.generation,
                    query,
                    cancel,
                })
            }
            Err(e) => {
                self.state = UiState::Error;
                self.notice = Some(Notice::Validation(e.clone()));
                Err(e)
            }
        }
    }

    /// Fill the inputs from `query` and start a submission in one step, so no
    /// other edit can land between the two.
    pub fn begin_check(&mut self, query: &Query) -> Result<Submission, ValidationError> {
        self.input.fill(query);
        self.begin_submit()
    }

    /// Apply the outcome of `submission`. Returns `false` (and changes
    /// nothing) when a newer submission has started since.
    pub fn complete(
        &mut self,
        submission: Submission,
        outcome: Result<Vec<SearchResult>, ClientError>,
    ) -> bool {
        if submission.generation != self.generation {
            log::debug!(
                "dropping stale response for generation {} (current {})",
                submission.generation,
                self.generation
            );
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(results) => {
                self.rank = derive_rank(&results, &submission.query.business);
                self.results = results;
                self.state = UiState::Success;
            }
            Err(e) => {
                log::error!("ranking request failed: {e:#}");
                self.results.clear();
                self.rank = None;
                self.notice = Some(Notice::Failure);
                self.state = UiState::Error;
            }
        }
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            generation: self.generation,
            input: self.input.clone(),
            results: self.results.clone(),
            rank: self.rank.clone(),
            rank_message: self.rank.as_ref().map(|r| r.to_string()),
            error: self.notice.as_ref().map(Notice::message),
        }
    }
}

/// Shared handle pairing a [`Dashboard`] with the backend it submits to.
///
/// The dashboard lock is never held while waiting on the backend.
pub struct DashboardHandle<B> {
    dashboard: Arc<Mutex<Dashboard>>,
    backend: Arc<B>,
}

impl<B> Clone for DashboardHandle<B> {
    fn clone(&self) -> Self {
        Self {
            dashboard: self.dashboard.clone(),
            backend: self.backend.clone(),
        }
    }
}

impl<B: RankingBackend> DashboardHandle<B> {
    pub fn new(backend: B) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<B>) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(Dashboard::new())),
            backend,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.dashboard.lock().await.snapshot()
    }

    pub async fn update_input<F>(&self, edit: F)
    where
        F: FnOnce(&mut InputCollector),
    {
        edit(self.dashboard.lock().await.input_mut());
    }

    /// Fill the inputs from `query` and submit.
    pub async fn check(&self, query: &Query) -> Snapshot {
        self.run(|dashboard| dashboard.begin_check(query)).await
    }

    /// Submit the current inputs and wait for the response, or for a newer
    /// submission to supersede this one.
    pub async fn submit(&self) -> Snapshot {
        self.run(Dashboard::begin_submit).await
    }

    async fn run<F>(&self, begin: F) -> Snapshot
    where
        F: FnOnce(&mut Dashboard) -> Result<Submission, ValidationError>,
    {
        let submission = {
            let mut dashboard = self.dashboard.lock().await;
            match begin(&mut *dashboard) {
                Ok(submission) => submission,
                Err(e) => {
                    log::warn!("submission rejected: {e}");
                    return dashboard.snapshot();
                }
            }
        };

        let cancel = submission.cancel.clone();
        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                log::debug!("generation {} superseded before completion", submission.generation);
                return self.snapshot().await;
            }
            outcome = self.backend.scrape(&submission.query) => outcome,
        };

        let mut dashboard = self.dashboard.lock().await;
        dashboard.complete(submission, outcome);
        dashboard.snapshot()
    }
}
