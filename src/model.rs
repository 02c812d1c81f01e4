// Core structs: ScrapeRequest, JobHandle, JobResult
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ProbeError, Result};

/// Extra knobs understood by the scraping service. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrapeOptions {
    pub filter: Option<String>,
    pub click_selector: Option<String>,
    pub origin: Option<String>,
    pub referer: Option<String>,
    pub wait_for: Option<String>,
    pub iframe: bool,
    pub screenshot: bool,
}

impl ScrapeOptions {
    /// Query pairs in the service's parameter names.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let optional = [
            ("filter", &self.filter),
            ("clickSelector", &self.click_selector),
            ("origin", &self.origin),
            ("referer", &self.referer),
            ("waitFor", &self.wait_for),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                pairs.push((key, v.clone()));
            }
        }
        if self.iframe {
            pairs.push(("iframe", "true".to_string()));
        }
        if self.screenshot {
            pairs.push(("screenshot", "true".to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub url: String,
    pub options: ScrapeOptions,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: ScrapeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScrapeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("url", self.url.clone())];
        pairs.extend(self.options.query_pairs());
        pairs
    }
}

/// Acknowledgment of a queued job, as returned with `202 Accepted`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobHandle {
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "status_endpoint")]
    pub status_path: String,
}

impl JobHandle {
    pub fn from_body(body: &str) -> Result<Self> {
        let handle: JobHandle = serde_json::from_str(body)
            .map_err(|e| ProbeError::MalformedHandle(format!("{}: {}", e, body)))?;
        if handle.job_id.trim().is_empty() {
            return Err(ProbeError::MalformedHandle("empty jobId".into()));
        }
        if handle.status_path.trim().is_empty() {
            return Err(ProbeError::MalformedHandle("empty status_endpoint".into()));
        }
        Ok(handle)
    }
}

/// Raw answer from a status check.
#[derive(Debug, Clone)]
pub struct StatusResponse {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultBody {
    Json(Value),
    /// Success body that was not valid JSON.
    Raw(String),
}

impl ResultBody {
    pub fn parse(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => ResultBody::Json(value),
            Err(_) => ResultBody::Raw(body),
        }
    }
}

/// Terminal outcome of polling a job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobResult {
    Succeeded(ResultBody),
    Failed(String),
    Unexpected(StatusCode),
}

impl JobResult {
    pub fn is_success(&self) -> bool {
        matches!(self, JobResult::Succeeded(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollDecision {
    Pending,
    Done(JobResult),
}

impl PollDecision {
    pub fn classify(response: StatusResponse) -> Self {
        match response.status {
            StatusCode::OK => PollDecision::Done(JobResult::Succeeded(ResultBody::parse(response.body))),
            StatusCode::INTERNAL_SERVER_ERROR => PollDecision::Done(JobResult::Failed(response.body)),
            StatusCode::ACCEPTED => PollDecision::Pending,
            other => PollDecision::Done(JobResult::Unexpected(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CapturedRequest {
    pub url: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Payload the scraping service produces for a finished job.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrapeReport {
    pub message: String,
    #[serde(default)]
    pub requests: Vec<CapturedRequest>,
    #[serde(default)]
    pub screenshot: Option<String>,
}

impl ScrapeReport {
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
