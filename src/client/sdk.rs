//! HTTP client for the job API.
//!
//! One method per API operation, each issuing exactly one request. Status
//! codes map back onto the crate error taxonomy: 404 → `NotFound`,
//! 400 → `Validation`, anything else unsuccessful → `StoreFault`.
//! Connection and decoding failures become `Transport`.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::JobApi;
use crate::error::{Error, ErrorCode, Result};
use crate::model::{JobApplication, JobPayload};

/// Typed client for a running job API server.
#[derive(Debug, Clone)]
pub struct JobClient {
    client: Client,
    base_url: Url,
}

impl JobClient {
    /// Build a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the URL cannot be parsed or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid server URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid server URL '{base_url}'")));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The server this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/jobs` or `<base>/jobs/<id>`, with the id percent-encoded.
    fn jobs_url(&self, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::Config(format!("invalid server URL '{}'", self.base_url)))?;
            segments.pop_if_empty().push("jobs");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send<T>(&self, request: RequestBuilder, id: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        debug!(status = %resp.status(), url = %resp.url(), "Job API response");
        Self::decode_response(resp, id).await
    }

    async fn decode_response<T>(resp: Response, id: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<T>()
                .await
                .map_err(|e| Error::Transport(format!("failed to decode response: {e}")));
        }

        let body = resp
            .text()
            .await
            .unwrap_or_else(|err| format!("response body error: {err}"));
        let envelope: Option<serde_json::Value> = serde_json::from_str(&body).ok();
        let error = envelope.as_ref().map(|v| &v["error"]);

        let message = error
            .and_then(|e| e["message"].as_str())
            .map(ToString::to_string)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body.clone()
                }
            });

        match status {
            StatusCode::NOT_FOUND => Err(Error::not_found(id.unwrap_or_default())),
            _ if status.is_client_error() => {
                let code = error
                    .and_then(|e| e["code"].as_str())
                    .and_then(ErrorCode::from_code_str)
                    .filter(|c| c.http_status() == 400)
                    .unwrap_or(ErrorCode::InvalidArgument);
                let field = error
                    .and_then(|e| e["field"].as_str())
                    .unwrap_or("request")
                    .to_string();
                let message = message
                    .strip_prefix(&format!("{field}: "))
                    .map(ToString::to_string)
                    .unwrap_or(message);
                Err(Error::Validation {
                    code,
                    field,
                    message,
                })
            }
            _ => Err(Error::StoreFault(message)),
        }
    }
}

impl JobApi for JobClient {
    async fn create_job(&self, payload: &JobPayload) -> Result<JobApplication> {
        let url = self.jobs_url(None)?;
        self.send(self.client.post(url).json(payload), None).await
    }

    async fn list_jobs(&self) -> Result<Vec<JobApplication>> {
        let url = self.jobs_url(None)?;
        self.send(self.client.get(url), None).await
    }

    async fn get_job(&self, id: &str) -> Result<JobApplication> {
        let url = self.jobs_url(Some(id))?;
        self.send(self.client.get(url), Some(id)).await
    }

    async fn update_job(&self, id: &str, payload: &JobPayload) -> Result<JobApplication> {
        let url = self.jobs_url(Some(id))?;
        self.send(self.client.put(url).json(payload), Some(id)).await
    }

    async fn delete_job(&self, id: &str) -> Result<JobApplication> {
        let url = self.jobs_url(Some(id))?;
        self.send(self.client.delete(url), Some(id)).await
    }
}
