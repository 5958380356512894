use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;
use url::Url;

use crate::domain::error::OracleError;
use crate::domain::model::Scores;
use crate::domain::ports::ScoringPort;

/// HTTP adapter for the external scoring service.
///
/// The client carries a bounded request timeout so an unresponsive service
/// cannot hold a request indefinitely; a timeout surfaces as
/// `OracleError::Unreachable` like any other transport failure.
pub struct HttpOracleClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct ScoreRequest<'a> {
    rows: &'a [Map<String, Value>],
}

#[derive(Deserialize)]
struct ScoreResponse {
    probabilities: Vec<f64>,
    #[serde(default)]
    feature_importances: std::collections::BTreeMap<String, f64>,
}

impl HttpOracleClient {
    /// # Errors
    /// Returns the underlying `reqwest` error if the client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    fn predict_url(&self) -> Result<Url, OracleError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| OracleError::Unreachable("invalid scoring service base URL".to_owned()))?
            .pop_if_empty()
            .push("predict");
        Ok(url)
    }
}

#[async_trait]
impl ScoringPort for HttpOracleClient {
    #[instrument(skip_all, fields(oracle = %self.base_url, rows = rows.len()))]
    async fn score(&self, rows: &[Map<String, Value>]) -> Result<Scores, OracleError> {
        let url = self.predict_url()?;

        let response = self
            .http
            .post(url)
            .json(&ScoreRequest { rows })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "scoring request failed");
                OracleError::Unreachable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "scoring service returned an error status");
            return Err(OracleError::BadResponse(format!("HTTP {status}")));
        }

        let body: ScoreResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "scoring response body was not parsable");
            OracleError::BadResponse(e.to_string())
        })?;

        Ok(Scores {
            probabilities: body.probabilities,
            feature_importances: body.feature_importances,
        })
    }
}
