use axum::{
    Json,
    extract::{Path, State},
};

use crate::app::{About, App, Settings};
use crate::client::RankingBackend;
use crate::dashboard::Snapshot;
use crate::data_models::Query;
use crate::error::ApiError;

use super::models::{LocationsResponse, ReportsResponse, ViewBody};

/// Validation and backend failures are reported inside the snapshot, so this
/// always answers 200.
pub async fn rank_handler<B: RankingBackend>(
    State(app): State<App<B>>,
    Json(query): Json<Query>,
) -> Json<Snapshot> {
    Json(app.check(&query).await)
}

pub async fn dashboard_handler<B: RankingBackend>(State(app): State<App<B>>) -> Json<Snapshot> {
    Json(app.dashboard().snapshot().await)
}

pub async fn view_handler<B: RankingBackend>(State(app): State<App<B>>) -> Json<ViewBody> {
    Json(ViewBody {
        view: app.current_view().await,
    })
}

pub async fn switch_view_handler<B: RankingBackend>(
    State(app): State<App<B>>,
    Json(body): Json<ViewBody>,
) -> Json<ViewBody> {
    app.switch_to(body.view).await;
    Json(body)
}

pub async fn locations_handler<B: RankingBackend>(
    State(app): State<App<B>>,
) -> Json<LocationsResponse> {
    Json(LocationsResponse {
        locations: app.locations().to_vec(),
    })
}

pub async fn reports_handler<B: RankingBackend>(State(app): State<App<B>>) -> Json<ReportsResponse> {
    Json(ReportsResponse {
        reports: app.report_cards().await,
    })
}

pub async fn rerun_handler<B: RankingBackend>(
    State(app): State<App<B>>,
    Path(id): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(app.rerun(&id).await?))
}

pub async fn hover_handler<B: RankingBackend>(
    State(app): State<App<B>>,
    Path(id): Path<String>,
) -> Result<Json<ReportsResponse>, ApiError> {
    let reports = app.hover_report(&id).await?;
    Ok(Json(ReportsResponse { reports }))
}

pub async fn unhover_handler<B: RankingBackend>(
    State(app): State<App<B>>,
    Path(id): Path<String>,
) -> Result<Json<ReportsResponse>, ApiError> {
    let reports = app.unhover_report(&id).await?;
    Ok(Json(ReportsResponse { reports }))
}

pub async fn about_handler<B: RankingBackend>(State(app): State<App<B>>) -> Json<About> {
    Json(app.about().clone())
}

pub async fn settings_handler<B: RankingBackend>(State(app): State<App<B>>) -> Json<Settings> {
    Json(app.settings().clone())
}
