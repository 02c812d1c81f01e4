use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::client::{poll_job, PollSettings, ScrapeApi};
use crate::error::{ProbeError, Result};
use crate::model::{JobResult, ScrapeRequest};
use crate::report;

/// What happened to one target URL.
#[derive(Debug)]
pub struct WorkerOutcome {
    pub url: String,
    pub job_id: Option<String>,
    pub result: Result<JobResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl WorkerOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(&self.result, Ok(r) if r.is_success())
    }

    pub fn elapsed(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

/// Submits one request, polls its job to a terminal state and prints the result.
pub async fn run_worker<A>(api: &A, req: ScrapeRequest, settings: PollSettings) -> WorkerOutcome
where
    A: ScrapeApi + ?Sized,
{
    let started_at = Utc::now();
    let mut job_id = None;

    let result = match api.submit(&req).await {
        Ok(handle) => {
            job_id = Some(handle.job_id.clone());
            poll_job(api, &handle, settings).await
        }
        Err(e) => Err(e),
    };

    match &result {
        Ok(job_result) => {
            info!("Job for {} finished: success = {}", req.url, job_result.is_success());
            println!("{}", report::render_result(job_result));
        }
        Err(e) => {
            warn!("Worker for {} stopped: {}", req.url, e);
            println!("{}", report::render_error(e));
        }
    }

    WorkerOutcome {
        url: req.url,
        job_id,
        result,
        started_at,
        finished_at: Utc::now(),
    }
}

/// Runs one worker per request, at most `limit` at a time, and waits for all of them.
///
/// Workers share nothing but `api`; one failing (or panicking) never stops the rest.
pub async fn run_all<A>(
    api: Arc<A>,
    requests: Vec<ScrapeRequest>,
    settings: PollSettings,
    limit: usize,
) -> Vec<WorkerOutcome>
where
    A: ScrapeApi + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    info!("Starting {} workers (limit {})", requests.len(), limit);

    let urls: Vec<String> = requests.iter().map(|r| r.url.clone()).collect();
    let handles: Vec<_> = requests
        .into_iter()
        .map(|req| {
            let api = api.clone();
            let semaphore = semaphore.clone();
            tokio::spawn(async move {
                // The semaphore is never closed, so acquiring only waits.
                let _permit = semaphore.acquire_owned().await.ok();
                run_worker(api.as_ref(), req, settings).await
            })
        })
        .collect();

    let started_at = Utc::now();
    join_all(handles)
        .await
        .into_iter()
        .zip(urls)
        .map(|(joined, url)| match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Worker for {} aborted: {}", url, e);
                WorkerOutcome {
                    url,
                    job_id: None,
                    result: Err(ProbeError::Join(e)),
                    started_at,
                    finished_at: Utc::now(),
                }
            }
        })
        .collect()
}
