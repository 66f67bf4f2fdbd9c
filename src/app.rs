use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::client::RankingBackend;
use crate::config::Config;
use crate::dashboard::{DashboardHandle, Snapshot};
use crate::data_models::{Query, Report};
use crate::error::{ApiError, ConfigError};
use crate::render;
use crate::views::{ReportCard, ReportHistory, View, ViewSwitcher};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct About {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

impl Default for About {
    fn default() -> Self {
        About {
            name: "GMB Ranker",
            version: env!("CARGO_PKG_VERSION"),
            description: "Checks where a business ranks in local search results for a \
                          keyword and location, using an external scraping backend.",
        }
    }
}

/// Read-only view of the effective configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub api_url: String,
    pub timeout_secs: Option<u64>,
    pub reports_file: Option<String>,
    pub bind_addr: String,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Settings {
            api_url: config.api_url.to_string(),
            timeout_secs: config.timeout.map(|t| t.as_secs()),
            reports_file: config.reports_file.clone(),
            bind_addr: config.bind_addr.to_string(),
        }
    }
}

/// The whole application: the dashboard plus the static panels around it.
pub struct App<B> {
    dashboard: DashboardHandle<B>,
    views: Arc<Mutex<ViewSwitcher>>,
    reports: Arc<ReportHistory>,
    locations: Arc<Vec<String>>,
    settings: Arc<Settings>,
    about: About,
}

impl<B> Clone for App<B> {
    fn clone(&self) -> Self {
        Self {
            dashboard: self.dashboard.clone(),
            views: self.views.clone(),
            reports: self.reports.clone(),
            locations: self.locations.clone(),
            settings: self.settings.clone(),
            about: self.about.clone(),
        }
    }
}

impl<B: RankingBackend> App<B> {
    pub fn new(
        backend: B,
        reports: ReportHistory,
        locations: Vec<String>,
        settings: Settings,
    ) -> Self {
        Self {
            dashboard: DashboardHandle::new(backend),
            views: Arc::new(Mutex::new(ViewSwitcher::new())),
            reports: Arc::new(reports),
            locations: Arc::new(locations),
            settings: Arc::new(settings),
            about: About::default(),
        }
    }

    pub fn from_config(backend: B, config: &Config) -> Result<Self, ConfigError> {
        let reports = ReportHistory::load(config.reports_file.as_deref())?;
        Ok(Self::new(
            backend,
            reports,
            config.locations.clone(),
            Settings::from(config),
        ))
    }

    pub fn dashboard(&self) -> &DashboardHandle<B> {
        &self.dashboard
    }

    pub fn reports(&self) -> &ReportHistory {
        &self.reports
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn about(&self) -> &About {
        &self.about
    }

    pub async fn current_view(&self) -> View {
        self.views.lock().await.current()
    }

    pub async fn switch_to(&self, view: View) {
        self.views.lock().await.switch_to(view);
    }

    /// Switch to `view` and render it as text.
    pub async fn show(&self, view: View) -> String {
        self.switch_to(view).await;
        match view {
            View::Dashboard => render::render_dashboard(&self.dashboard.snapshot().await),
            View::Locations => render::render_locations(self.locations()),
            View::Reports => render::render_reports(&self.report_cards().await),
            View::About => render::render_about(self.about()),
            View::Settings => render::render_settings(self.settings()),
        }
    }

    pub async fn report_cards(&self) -> Vec<ReportCard> {
        self.views.lock().await.report_cards(&self.reports)
    }

    pub async fn hover_report(&self, id: &str) -> Result<Vec<ReportCard>, ApiError> {
        self.require_report(id)?;
        let mut views = self.views.lock().await;
        views.hover(id);
        Ok(views.report_cards(&self.reports))
    }

    pub async fn unhover_report(&self, id: &str) -> Result<Vec<ReportCard>, ApiError> {
        self.require_report(id)?;
        let mut views = self.views.lock().await;
        views.unhover(id);
        Ok(views.report_cards(&self.reports))
    }

    /// Run a ranking check from the dashboard panel.
    pub async fn check(&self, query: &Query) -> Snapshot {
        self.switch_to(View::Dashboard).await;
        self.dashboard.check(query).await
    }

    /// Copy a stored report back into the inputs and submit it again.
    pub async fn rerun(&self, id: &str) -> Result<Snapshot, ApiError> {
        let query = self.require_report(id)?.query();
        log::info!("re-running report {id}");
        Ok(self.check(&query).await)
    }

    fn require_report(&self, id: &str) -> Result<&Report, ApiError> {
        self.reports
            .get(id)
            .ok_or_else(|| ApiError::ReportNotFound(id.to_string()))
    }
}
