//! Plain-text rendering of the dashboard and its side panels.

use std::fmt::Write;

use crate::app::{About, Settings};
use crate::dashboard::{Snapshot, UiState};
use crate::data_models::SearchResult;
use crate::views::ReportCard;

pub const SUBMIT_LABEL: &str = "Check Ranking";
pub const LOADING_LABEL: &str = "Scraping...";

pub fn submit_label(state: UiState) -> &'static str {
    match state {
        UiState::Loading => LOADING_LABEL,
        _ => SUBMIT_LABEL,
    }
}

pub fn render_dashboard(snapshot: &Snapshot) -> String {
    let mut out = String::from("GMB Ranking Tool\n\n");
    let input = &snapshot.input;
    let _ = writeln!(out, "Keyword:  {}", input.keyword());
    let _ = writeln!(out, "Location: {}", input.location());
    let _ = writeln!(out, "Business: {}", input.business());
    let _ = writeln!(out, "[{}]", submit_label(snapshot.state));

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "\n{error}");
    }
    if let Some(rank) = &snapshot.rank_message {
        let _ = writeln!(out, "\n{rank}");
    }

    if !snapshot.results.is_empty() {
        out.push_str("\nTop Results\n");
        out.push_str(&render_results(&snapshot.results));
    }
    out
}

/// Numbered list in response order.
pub fn render_results(results: &[SearchResult]) -> String {
    let mut out = String::new();
    for (idx, result) in results.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", idx + 1, result.name);
        let _ = writeln!(out, "     Address: {}", result.address);
        match result.rating {
            Some(rating) => {
                let _ = writeln!(out, "     Rating: {rating}");
            }
            None => out.push_str("     Rating: n/a\n"),
        }
    }
    out
}

pub fn render_locations(locations: &[String]) -> String {
    let mut out = String::from("Locations\n\n");
    if locations.is_empty() {
        out.push_str("No locations configured.\n");
    }
    for location in locations {
        let _ = writeln!(out, "- {location}");
    }
    out
}

pub fn render_reports(cards: &[ReportCard]) -> String {
    let mut out = String::from("Reports\n\n");
    if cards.is_empty() {
        out.push_str("No reports yet.\n");
    }
    for card in cards {
        let report = &card.report;
        let edge = if card.style.raised { '#' } else { '|' };
        let _ = writeln!(
            out,
            "{edge} [{}] {} in {} ({})",
            report.id, report.keyword, report.location, report.created_on
        );
        if !report.business.is_empty() {
            let rank = report
                .last_rank
                .map(|r| format!("#{r}"))
                .unwrap_or_else(|| "not ranked".to_string());
            let _ = writeln!(out, "{edge}   {}: {rank}", report.business);
        }
    }
    out
}

pub fn render_about(about: &About) -> String {
    format!("About\n\n{} v{}\n{}\n", about.name, about.version, about.description)
}

pub fn render_settings(settings: &Settings) -> String {
    let mut out = String::from("Settings\n\n");
    let _ = writeln!(out, "Scrape endpoint: {}", settings.api_url);
    let timeout = settings
        .timeout_secs
        .map(|s| format!("{s}s"))
        .unwrap_or_else(|| "none".to_string());
    let _ = writeln!(out, "Request timeout: {timeout}");
    let _ = writeln!(
        out,
        "Reports file:    {}",
        settings.reports_file.as_deref().unwrap_or("(built-in sample)")
    );
    let _ = writeln!(out, "Bind address:    {}", settings.bind_addr);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::data_models::Report;
    use crate::views::CardStyle;
    use chrono::NaiveDate;

    #[test]
    fn test_results_keep_response_order() {
        let results = vec![
            SearchResult::new("Zeta Dental", "9 Z Rd", Some(4.9)),
            SearchResult::new("Alpha Dental", "1 A Rd", None),
        ];
        let text = render_results(&results);
        let zeta = text.find("Zeta Dental").unwrap();
        let alpha = text.find("Alpha Dental").unwrap();
        assert!(zeta < alpha);
        assert!(text.contains("  1. Zeta Dental"));
        assert!(text.contains("  2. Alpha Dental"));
        assert!(text.contains("Rating: n/a"));
    }

    #[test]
    fn test_idle_dashboard_has_no_results_section() {
        let text = render_dashboard(&Dashboard::new().snapshot());
        assert!(text.contains("[Check Ranking]"));
        assert!(!text.contains("Top Results"));
    }

    #[test]
    fn test_loading_label() {
        assert_eq!(submit_label(UiState::Loading), LOADING_LABEL);
        assert_eq!(submit_label(UiState::Error), SUBMIT_LABEL);
    }

    #[test]
    fn test_hovered_card_is_drawn_raised() {
        let report = Report::new("Dentist", "Mumbai", "Smile", NaiveDate::default(), Some(2));
        let cards = vec![ReportCard {
            report,
            hovered: true,
            style: CardStyle::HOVERED,
        }];
        let text = render_reports(&cards);
        assert!(text.lines().nth(2).unwrap().starts_with('#'));
        assert!(text.contains("Smile: #2"));
    }
}
