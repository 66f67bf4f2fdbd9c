use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::data_models::{Query, SearchResult};
use crate::error::ClientError;

/// Anything that can answer a ranking query with an ordered result list.
pub trait RankingBackend: Send + Sync + 'static {
    fn scrape(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<SearchResult>, ClientError>> + Send;
}

/// Talks to the external scrape service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRankingClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpRankingClient {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.api_url.clone(), config.timeout)
    }
}

impl RankingBackend for HttpRankingClient {
    async fn scrape(&self, query: &Query) -> Result<Vec<SearchResult>, ClientError> {
        log::info!(
            "scraping keyword={:?} location={:?} via {}",
            query.keyword,
            query.location,
            self.endpoint
        );

        let res = self
            .http
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = res.bytes().await?;
        let results = decode_results(&body)?;
        log::debug!("backend returned {} results", results.len());
        Ok(results)
    }
}

/// Decode a scrape response body.
///
/// The body must be valid JSON. A missing or non-array `results` field (or a
/// body that isn't an object at all) decodes to an empty list.
pub fn decode_results(body: &[u8]) -> Result<Vec<SearchResult>, serde_json::Error> {
    let body: Value = serde_json::from_slice(body)?;
    match body.get("results") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| SearchResult::deserialize(item))
            .collect(),
        _ => Ok(Vec::new()),
    }
}
