use serde::{Deserialize, Serialize};

use crate::views::{ReportCard, View};

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewBody {
    pub view: View,
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportsResponse {
    pub reports: Vec<ReportCard>,
}
