use anyhow::Result;
use std::sync::Mutex;
use std::time::Duration;

use gmb_ranker::client::RankingBackend;
use gmb_ranker::dashboard::{Dashboard, DashboardHandle, Notice, UiState};
use gmb_ranker::data_models::{Query, SearchResult};
use gmb_ranker::error::{ClientError, FAILURE_MESSAGE, ValidationError};

mod test_helpers {
    use super::*;

    pub enum Script {
        Results(Vec<SearchResult>),
        Fail,
    }

    /// Records every query and answers according to its script. Queries with
    /// the keyword "slow" never complete.
    pub struct ScriptedBackend {
        pub calls: Mutex<Vec<Query>>,
        script: Script,
    }

    impl ScriptedBackend {
        pub fn new(script: Script) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                script,
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl RankingBackend for ScriptedBackend {
        async fn scrape(&self, query: &Query) -> Result<Vec<SearchResult>, ClientError> {
            self.calls.lock().unwrap().push(query.clone());
            if query.keyword == "slow" {
                std::future::pending::<()>().await;
            }
            match &self.script {
                Script::Results(results) => Ok(results.clone()),
                Script::Fail => Err(network_failure()),
            }
        }
    }

    pub fn network_failure() -> ClientError {
        ClientError::Parse(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err())
    }

    pub fn bean_house() -> Vec<SearchResult> {
        vec![SearchResult::new("Bean House", "12 Hill Rd, Mumbai", Some(4.6))]
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_valid_submission_calls_backend_once() -> Result<()> {
    let handle = DashboardHandle::new(ScriptedBackend::new(Script::Results(bean_house())));
    let snapshot = handle.check(&Query::new("Cafe", "Mumbai", "bean")).await;

    assert_eq!(handle.backend().call_count(), 1);
    assert_eq!(
        handle.backend().calls.lock().unwrap()[0],
        Query::new("Cafe", "Mumbai", "bean")
    );
    assert_eq!(snapshot.state, UiState::Success);
    assert_eq!(snapshot.results, bean_house());
    assert_eq!(snapshot.rank_message.as_deref(), Some("'bean' is ranked #1"));
    assert!(snapshot.error.is_none());
    Ok(())
}

#[tokio::test]
async fn test_business_read_at_submission_time() -> Result<()> {
    let handle = DashboardHandle::new(ScriptedBackend::new(Script::Results(bean_house())));
    handle
        .update_input(|input| {
            input.set_keyword("Cafe");
            input.set_location("Mumbai");
            input.set_business("Old Name");
        })
        .await;
    handle
        .update_input(|input| input.set_business("Cafe Deluxe"))
        .await;

    let snapshot = handle.submit().await;
    assert_eq!(handle.backend().calls.lock().unwrap()[0].business, "Cafe Deluxe");
    assert_eq!(
        snapshot.rank_message.as_deref(),
        Some("'Cafe Deluxe' is not found in top 1")
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_fields_never_reach_backend() -> Result<()> {
    let handle = DashboardHandle::new(ScriptedBackend::new(Script::Results(bean_house())));

    for query in [
        Query::new("", "Mumbai", "bean"),
        Query::new("Cafe", "", "bean"),
        Query::new("  ", " ", ""),
    ] {
        let snapshot = handle.check(&query).await;
        assert_eq!(snapshot.state, UiState::Error);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Please fill in both keyword and location.")
        );
        assert!(snapshot.results.is_empty());
        assert!(snapshot.rank_message.is_none());
    }
    assert_eq!(handle.backend().call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_results_are_success() -> Result<()> {
    let handle = DashboardHandle::new(ScriptedBackend::new(Script::Results(Vec::new())));
    let snapshot = handle.check(&Query::new("Cafe", "Mumbai", "")).await;

    assert_eq!(snapshot.state, UiState::Success);
    assert!(snapshot.results.is_empty());
    assert!(snapshot.error.is_none());
    assert!(snapshot.rank.is_none());
    Ok(())
}

#[tokio::test]
async fn test_failure_shows_generic_message() -> Result<()> {
    let handle = DashboardHandle::new(ScriptedBackend::new(Script::Fail));
    let snapshot = handle.check(&Query::new("Cafe", "Mumbai", "bean")).await;

    assert_eq!(snapshot.state, UiState::Error);
    assert_eq!(snapshot.error.as_deref(), Some(FAILURE_MESSAGE));
    assert!(snapshot.results.is_empty());
    assert!(snapshot.rank_message.is_none());
    Ok(())
}

#[tokio::test]
async fn test_resubmission_after_error_recovers() -> Result<()> {
    let handle = DashboardHandle::new(ScriptedBackend::new(Script::Results(bean_house())));
    let failed = handle.check(&Query::new("", "Mumbai", "")).await;
    assert_eq!(failed.state, UiState::Error);

    let ok = handle.check(&Query::new("Cafe", "Mumbai", "")).await;
    assert_eq!(ok.state, UiState::Success);
    assert!(ok.error.is_none());
    assert_eq!(ok.generation, 2);
    Ok(())
}

#[tokio::test]
async fn test_newer_submission_supersedes_in_flight_one() -> Result<()> {
    let handle = DashboardHandle::new(ScriptedBackend::new(Script::Results(bean_house())));

    let slow = handle.clone();
    let first = tokio::spawn(async move { slow.check(&Query::new("slow", "Mumbai", "")).await });

    // Wait until the slow request is actually with the backend.
    tokio::time::timeout(Duration::from_secs(5), async {
        while handle.backend().call_count() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await?;

    let second = handle.check(&Query::new("Cafe", "Mumbai", "bean")).await;
    assert_eq!(second.state, UiState::Success);
    assert_eq!(second.generation, 2);

    // The first submission resolves once cancelled, without touching state.
    tokio::time::timeout(Duration::from_secs(5), first).await??;

    let current = handle.snapshot().await;
    assert_eq!(current, second);
    assert_eq!(handle.backend().call_count(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checks_submit_their_own_inputs() -> Result<()> {
    let handle = DashboardHandle::new(ScriptedBackend::new(Script::Results(bean_house())));

    for round in 0..50 {
        let mut tasks = Vec::new();
        for caller in 0..4 {
            let checker = handle.clone();
            let keyword = format!("kw-{round}-{caller}");
            tasks.push(tokio::spawn(async move {
                checker.check(&Query::new(keyword, "Mumbai", "")).await
            }));
            let editor = handle.clone();
            tasks.push(tokio::spawn(async move {
                editor
                    .update_input(|input| input.set_keyword("edited"))
                    .await;
                editor.snapshot().await
            }));
        }
        for task in tasks {
            task.await?;
        }
    }

    let calls = handle.backend().calls.lock().unwrap().clone();
    assert!(calls.iter().all(|q| q.keyword != "edited"));
    let mut keywords: Vec<&str> = calls.iter().map(|q| q.keyword.as_str()).collect();
    let total = keywords.len();
    keywords.sort();
    keywords.dedup();
    assert_eq!(keywords.len(), total, "a query was submitted twice");
    Ok(())
}

#[test]
fn test_begin_check_fills_and_submits_together() {
    let mut dashboard = Dashboard::new();
    dashboard.input_mut().set_keyword("stale");

    let submission = dashboard
        .begin_check(&Query::new("Cafe", "Mumbai", "bean"))
        .unwrap();
    assert_eq!(submission.query, Query::new("Cafe", "Mumbai", "bean"));
    assert_eq!(dashboard.input().keyword(), "Cafe");
    assert_eq!(dashboard.state(), UiState::Loading);

    assert!(dashboard.begin_check(&Query::new("", "Mumbai", "")).is_err());
    assert!(submission.cancel.is_cancelled());
}

#[test]
fn test_stale_completion_is_dropped() {
    let mut dashboard = Dashboard::new();
    dashboard.input_mut().set_keyword("Cafe");
    dashboard.input_mut().set_location("Mumbai");

    let first = dashboard.begin_submit().unwrap();
    assert!(!first.cancel.is_cancelled());
    let second = dashboard.begin_submit().unwrap();
    assert!(first.cancel.is_cancelled());

    let applied = dashboard.complete(
        first,
        Ok(vec![SearchResult::new("Stale", "old", None)]),
    );
    assert!(!applied);
    assert_eq!(dashboard.state(), UiState::Loading);
    assert!(dashboard.results().is_empty());

    assert!(dashboard.complete(second, Ok(bean_house())));
    assert_eq!(dashboard.state(), UiState::Success);
    assert_eq!(dashboard.results(), bean_house().as_slice());
}

#[test]
fn test_invalid_submit_invalidates_in_flight_request() {
    let mut dashboard = Dashboard::new();
    dashboard.input_mut().set_keyword("Cafe");
    dashboard.input_mut().set_location("Mumbai");
    let pending = dashboard.begin_submit().unwrap();

    dashboard.input_mut().set_location("");
    assert_eq!(
        dashboard.begin_submit().unwrap_err(),
        ValidationError::MissingRequiredField
    );
    assert!(!dashboard.complete(pending, Ok(bean_house())));
    assert_eq!(
        dashboard.notice(),
        Some(&Notice::Validation(ValidationError::MissingRequiredField))
    );
    assert_eq!(dashboard.state(), UiState::Error);
}

#[test]
fn test_state_machine_starts_idle() {
    let dashboard = Dashboard::new();
    assert_eq!(dashboard.state(), UiState::Idle);
    assert_eq!(dashboard.generation(), 0);
    assert!(dashboard.rank().is_none());
    assert!(dashboard.notice().is_none());
}

#[test]
fn test_failure_after_results_clears_list() {
    let mut dashboard = Dashboard::new();
    dashboard.input_mut().set_keyword("Cafe");
    dashboard.input_mut().set_location("Mumbai");

    let ok = dashboard.begin_submit().unwrap();
    dashboard.complete(ok, Ok(bean_house()));
    assert_eq!(dashboard.results().len(), 1);

    let failing = dashboard.begin_submit().unwrap();
    assert_eq!(dashboard.state(), UiState::Loading);
    dashboard.complete(failing, Err(network_failure()));
    assert_eq!(dashboard.state(), UiState::Error);
    assert!(dashboard.results().is_empty());
    assert_eq!(dashboard.notice(), Some(&Notice::Failure));
}
