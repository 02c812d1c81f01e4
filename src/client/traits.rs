use crate::error::Result;
use crate::model::{JobHandle, ScrapeRequest, StatusResponse};

/// Remote side of a scrape job: queue it, then ask how it is doing.
#[async_trait::async_trait]
pub trait ScrapeApi: Send + Sync {
    async fn submit(&self, req: &ScrapeRequest) -> Result<JobHandle>;
    async fn check_status(&self, status_path: &str) -> Result<StatusResponse>;
}
