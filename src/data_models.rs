use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One ranking query, captured from the input fields at submission time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub location: String,
    /// Business to locate in the results. May be empty.
    #[serde(default)]
    pub business: String,
}

impl Query {
    pub fn new(
        keyword: impl Into<String>,
        location: impl Into<String>,
        business: impl Into<String>,
    ) -> Query {
        Query {
            keyword: keyword.into(),
            location: location.into(),
            business: business.into(),
        }
    }
}

/// A business listing returned by the scrape backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f64>,
}

// Scrapers hand back ratings as numbers, numeric strings or null.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

impl SearchResult {
    pub fn new(name: impl Into<String>, address: impl Into<String>, rating: Option<f64>) -> Self {
        SearchResult {
            name: name.into(),
            address: address.into(),
            rating,
        }
    }
}

/// An entry of the report history panel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
    #[serde(default = "generate_report_id")]
    pub id: String,
    pub keyword: String,
    pub location: String,
    #[serde(default)]
    pub business: String,
    pub created_on: NaiveDate,
    /// Rank recorded when the report was produced, if the business was found.
    #[serde(default)]
    pub last_rank: Option<usize>,
}

impl Report {
    pub fn new(
        keyword: impl Into<String>,
        location: impl Into<String>,
        business: impl Into<String>,
        created_on: NaiveDate,
        last_rank: Option<usize>,
    ) -> Report {
        Report {
            id: generate_report_id(),
            keyword: keyword.into(),
            location: location.into(),
            business: business.into(),
            created_on,
            last_rank,
        }
    }

    pub fn query(&self) -> Query {
        Query::new(&self.keyword, &self.location, &self.business)
    }
}

fn generate_report_id() -> String {
    nanoid::nanoid!(8)
}
