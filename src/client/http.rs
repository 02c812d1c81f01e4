use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::client::traits::ScrapeApi;
use crate::error::{ProbeError, Result};
use crate::model::{JobHandle, ScrapeRequest, StatusResponse};

pub struct HttpScrapeClient {
    pub client: Client,
    base_url: String,
}

impl HttpScrapeClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("scrape-probe/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Shares an existing connection pool.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn status_url(&self, status_path: &str) -> String {
        if status_path.starts_with('/') {
            format!("{}{}", self.base_url, status_path)
        } else {
            format!("{}/{}", self.base_url, status_path)
        }
    }
}

#[async_trait::async_trait]
impl ScrapeApi for HttpScrapeClient {
    async fn submit(&self, req: &ScrapeRequest) -> Result<JobHandle> {
        info!("Requesting scrape for {}", req.url);
        let response = self
            .client
            .get(format!("{}/api/scrape", self.base_url))
            .query(&req.query_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::ACCEPTED {
            warn!("Scrape for {} rejected [{}]", req.url, status);
            return Err(ProbeError::SubmissionRejected { status, body });
        }

        let handle = JobHandle::from_body(&body)?;
        info!("Job queued: {}", handle.job_id);
        Ok(handle)
    }

    async fn check_status(&self, status_path: &str) -> Result<StatusResponse> {
        let response = self.client.get(self.status_url(status_path)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(StatusResponse { status, body })
    }
}
