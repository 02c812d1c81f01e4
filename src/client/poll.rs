use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::client::traits::ScrapeApi;
use crate::error::{ProbeError, Result};
use crate::model::{JobHandle, JobResult, PollDecision};

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

/// Polls the handle's status path until the job reaches a terminal state.
///
/// `202` keeps the loop going after `settings.interval`; every other status ends it.
/// Transport errors are returned as is, nothing is retried.
pub async fn poll_job<A>(api: &A, handle: &JobHandle, settings: PollSettings) -> Result<JobResult>
where
    A: ScrapeApi + ?Sized,
{
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        info!("Polling {}", handle.status_path);
        let response = api.check_status(&handle.status_path).await?;

        match PollDecision::classify(response) {
            PollDecision::Done(result) => return Ok(result),
            PollDecision::Pending => {
                debug!("Job {} still pending (attempt {})", handle.job_id, attempts);
                if settings.max_attempts.is_some_and(|max| attempts >= max) {
                    return Err(ProbeError::PollAttemptsExhausted {
                        status_path: handle.status_path.clone(),
                        attempts,
                    });
                }
                sleep(settings.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResultBody, ScrapeRequest, StatusResponse};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Replays canned status responses and records every path it was asked about.
    struct ScriptedApi {
        responses: Mutex<VecDeque<(u16, &'static str)>>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn new(responses: &[(u16, &'static str)]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().copied().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl ScrapeApi for ScriptedApi {
        async fn submit(&self, _req: &ScrapeRequest) -> Result<JobHandle> {
            unreachable!("polling never submits")
        }

        async fn check_status(&self, status_path: &str) -> Result<StatusResponse> {
            self.seen.lock().unwrap().push(status_path.to_string());
            let (code, body) = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("polled past the end of the script");
            Ok(StatusResponse {
                status: StatusCode::from_u16(code).unwrap(),
                body: body.to_string(),
            })
        }
    }

    fn handle() -> JobHandle {
        JobHandle {
            job_id: "abc".into(),
            status_path: "/api/status/abc".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn waits_between_pending_polls_then_succeeds() {
        let api = ScriptedApi::new(&[(202, ""), (202, ""), (200, r#"{"title":"Result"}"#)]);
        let started = Instant::now();

        let result = poll_job(&api, &handle(), PollSettings::default()).await.unwrap();

        assert_eq!(
            result,
            JobResult::Succeeded(ResultBody::Json(json!({"title": "Result"})))
        );
        assert_eq!(api.calls(), 3);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(10) && waited < Duration::from_secs(11));
        assert!(api.seen.lock().unwrap().iter().all(|p| p == "/api/status/abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_stops_immediately() {
        let api = ScriptedApi::new(&[(500, "browser crashed"), (200, "{}")]);
        let result = poll_job(&api, &handle(), PollSettings::default()).await.unwrap();
        assert_eq!(result, JobResult::Failed("browser crashed".into()));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unexpected_status_stops_immediately() {
        let api = ScriptedApi::new(&[(202, ""), (404, "no such job"), (200, "{}")]);
        let result = poll_job(&api, &handle(), PollSettings::default()).await.unwrap();
        assert_eq!(result, JobResult::Unexpected(StatusCode::NOT_FOUND));
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn attempt_cap_ends_pending_job() {
        let api = ScriptedApi::new(&[(202, ""), (202, ""), (202, ""), (200, "{}")]);
        let settings = PollSettings {
            max_attempts: Some(3),
            ..Default::default()
        };
        let err = poll_job(&api, &handle(), settings).await.unwrap_err();
        assert!(matches!(
            err,
            ProbeError::PollAttemptsExhausted { attempts: 3, .. }
        ));
        assert_eq!(api.calls(), 3);
    }
}
