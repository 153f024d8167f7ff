use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::{FailureKind, InsightsError};

/// User-facing message when the service supplies no usable detail.
pub const GENERIC_FETCH_ERROR: &str = "fetching insights failed";

const INSIGHTS_PATH: &str = "fetch-insights/";
const HEALTH_PATH: &str = "health";
const WEBSITE_URL_PARAM: &str = "website_url";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait InsightsApi: Send + Sync {
    /// Fetches the insights document for one storefront URL.
    ///
    /// Resolves exactly once and never retries internally; the
    /// configured timeouts bound how long a call can stay open.
    async fn fetch_insights(&self, website_url: &str) -> Result<Value, InsightsError>;

    /// Probes the service health endpoint.
    async fn health(&self) -> Result<(), InsightsError>;
}

/// Error envelope the service sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpInsightsClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpInsightsClient {
    pub fn new(settings: ClientSettings) -> Result<Self, InsightsError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| InsightsError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| InsightsError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, InsightsError> {
        self.base_url
            .join(path)
            .map_err(|err| InsightsError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl InsightsApi for HttpInsightsClient {
    async fn fetch_insights(&self, website_url: &str) -> Result<Value, InsightsError> {
        let mut endpoint = self.endpoint(INSIGHTS_PATH)?;
        endpoint
            .query_pairs_mut()
            .append_pair(WEBSITE_URL_PARAM, website_url);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the service's own `detail` message; anything else
            // collapses to the generic one.
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(InsightsError::new(
                FailureKind::HttpStatus(status.as_u16()),
                detail.unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string()),
            ));
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_timeout() {
                InsightsError::new(FailureKind::Timeout, err.to_string())
            } else {
                InsightsError::new(FailureKind::Payload, err.to_string())
            }
        })
    }

    async fn health(&self) -> Result<(), InsightsError> {
        let endpoint = self.endpoint(HEALTH_PATH)?;
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightsError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> InsightsError {
    if err.is_timeout() {
        return InsightsError::new(FailureKind::Timeout, err.to_string());
    }
    InsightsError::new(FailureKind::Network, err.to_string())
}
