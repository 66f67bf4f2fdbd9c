use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::str::FromStr;

use crate::data_models::Report;
use crate::error::{ConfigError, ViewError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Locations,
    Reports,
    About,
    Settings,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Locations,
        View::Reports,
        View::About,
        View::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Locations => "Locations",
            View::Reports => "Reports",
            View::About => "About",
            View::Settings => "Settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for View {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.title().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ViewError::Unknown(s.to_string()))
    }
}

/// Report history shown on the reports panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportHistory {
    reports: Vec<Report>,
}

impl ReportHistory {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { reports }
    }

    /// The sample history used when no reports file is configured.
    pub fn sample() -> Self {
        let created_on = NaiveDate::from_ymd_opt(2025, 6, 12).unwrap_or_default();
        Self::new(vec![Report {
            id: "sample-1".to_string(),
            keyword: "Dentist".to_string(),
            location: "Mumbai".to_string(),
            business: "Smile Dental".to_string(),
            created_on,
            last_rank: Some(3),
        }])
    }

    /// Read a JSON array of reports. Entries without an `id` get a generated one.
    pub fn from_json(raw: &str, path: &str) -> Result<Self, ConfigError> {
        let reports = serde_json::from_str(raw).map_err(|source| ConfigError::ReportsParse {
            path: path.to_string(),
            source,
        })?;
        Ok(Self::new(reports))
    }

    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::sample());
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReportsIo {
            path: path.to_string(),
            source,
        })?;
        let history = Self::from_json(&raw, path)?;
        log::info!("loaded {} reports from {path}", history.reports.len());
        Ok(history)
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardStyle {
    pub background: &'static str,
    pub shadow: &'static str,
    pub raised: bool,
}

impl CardStyle {
    pub const RESTING: CardStyle = CardStyle {
        background: "#ffffff",
        shadow: "0 2px 6px rgba(0,0,0,0.08)",
        raised: false,
    };

    pub const HOVERED: CardStyle = CardStyle {
        background: "#eef5fb",
        shadow: "0 6px 14px rgba(0,0,0,0.16)",
        raised: true,
    };

    pub fn for_hover(hovered: bool) -> CardStyle {
        if hovered { Self::HOVERED } else { Self::RESTING }
    }
}

/// A report paired with the style its card should be drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCard {
    pub report: Report,
    pub hovered: bool,
    pub style: CardStyle,
}

/// Which panel is showing, plus the interaction state of the reports panel.
#[derive(Debug, Clone, Default)]
pub struct ViewSwitcher {
    current: View,
    hovered_report: Option<String>,
}

impl ViewSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn switch_to(&mut self, view: View) {
        if self.current != view {
            log::debug!("switching view {} -> {}", self.current, view);
        }
        self.current = view;
        if view != View::Reports {
            self.hovered_report = None;
        }
    }

    pub fn hover(&mut self, report_id: &str) {
        self.hovered_report = Some(report_id.to_string());
    }

    pub fn unhover(&mut self, report_id: &str) {
        if self.hovered_report.as_deref() == Some(report_id) {
            self.hovered_report = None;
        }
    }

    pub fn hovered_report(&self) -> Option<&str> {
        self.hovered_report.as_deref()
    }

    pub fn report_cards(&self, history: &ReportHistory) -> Vec<ReportCard> {
        history
            .reports()
            .iter()
            .map(|report| {
                let hovered = self.hovered_report.as_deref() == Some(report.id.as_str());
                ReportCard {
                    report: report.clone(),
                    hovered,
                    style: CardStyle::for_hover(hovered),
                }
            })
            .collect()
    }
}
