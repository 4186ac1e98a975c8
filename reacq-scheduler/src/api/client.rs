//! HTTP client for the satellite scheduling service.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use reacq_common::{Error, PotentialWindow, Result, ScheduleRequest, TargetMetadata};

use super::{SchedulingApi, discard_placeholder_windows};
use crate::config::SchedulerConfig;

const TARGET_PATH: &str = "satellite-target";
const POTENTIALS_PATH: &str = "satellite-target-potentials";
const SEARCH_INSTRUCTION_PATH: &str = "search-instruction";

/// HTTP implementation of [`SchedulingApi`] with bearer-token auth.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(config: &SchedulerConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("reacq-scheduler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> std::result::Result<Url, String> {
        let raw = format!("{}/{}", self.base_url, path);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| format!("invalid URL {}: {}", raw, e))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        }
    }

    /// Send and turn any non-2xx answer into an error string carrying status and body.
    async fn send(&self, request: RequestBuilder) -> std::result::Result<Response, String> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(format!("HTTP {}: {}", status, body))
        }
    }
}

#[async_trait]
impl SchedulingApi for ApiClient {
    async fn fetch_target(&self, target_id: &str) -> Result<TargetMetadata> {
        let failed = |message: String| Error::MetadataFetchFailed {
            target_id: target_id.to_string(),
            message,
        };

        let url = self.endpoint(TARGET_PATH, &[("id", target_id)]).map_err(failed)?;
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await.map_err(failed)?;
        response
            .json::<TargetMetadata>()
            .await
            .map_err(|e| failed(format!("malformed response: {}", e)))
    }

    async fn fetch_potentials(&self, target_id: &str, until: &str) -> Result<Vec<PotentialWindow>> {
        let failed = |message: String| Error::PotentialsFetchFailed {
            target_id: target_id.to_string(),
            message,
        };

        let url = self
            .endpoint(POTENTIALS_PATH, &[("satelliteTargetId", target_id), ("until", until)])
            .map_err(failed)?;
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await.map_err(failed)?;
        let body = response
            .bytes()
            .await
            .map_err(|e| failed(format!("failed to read response: {}", e)))?;

        decode_potentials(target_id, &body)
    }

    async fn submit_schedule(&self, request: &ScheduleRequest) -> Result<()> {
        let failed = |message: String| Error::ScheduleSubmissionFailed {
            target_id: request.target_id.clone(),
            message,
        };

        let url = self.endpoint(SEARCH_INSTRUCTION_PATH, &[]).map_err(failed)?;
        tracing::debug!("POST {} ({} steps)", url, request.steps.len());

        self.send(self.client.post(url).json(request)).await.map_err(failed)?;
        Ok(())
    }
}

/// Decode a potentials response body and drop placeholder windows.
fn decode_potentials(target_id: &str, body: &[u8]) -> Result<Vec<PotentialWindow>> {
    let windows: Vec<PotentialWindow> =
        serde_json::from_slice(body).map_err(|e| Error::PotentialsFetchFailed {
            target_id: target_id.to_string(),
            message: format!("malformed response: {}", e),
        })?;

    let total = windows.len();
    let windows = discard_placeholder_windows(windows);
    if windows.len() < total {
        tracing::debug!(
            "Dropped {} placeholder window(s) for {}",
            total - windows.len(),
            target_id
        );
    }

    Ok(windows)
}
