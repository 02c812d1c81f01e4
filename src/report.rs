// Console output for finished jobs and the end-of-run summary
use crate::error::ProbeError;
use crate::model::{JobResult, ResultBody, ScrapeReport};
use crate::worker::WorkerOutcome;

pub fn render_result(result: &JobResult) -> String {
    match result {
        JobResult::Succeeded(ResultBody::Json(value)) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            match ScrapeReport::from_value(value) {
                Some(report) => format!("Job completed: {}\n{}", describe_report(&report), pretty),
                None => format!("Job completed:\n{}", pretty),
            }
        }
        JobResult::Succeeded(ResultBody::Raw(text)) => format!("Job completed:\n{}", text),
        JobResult::Failed(text) => format!("Job failed: {}", text),
        JobResult::Unexpected(status) => format!("Unexpected status code: {}", status.as_u16()),
    }
}

pub fn render_error(err: &ProbeError) -> String {
    match err {
        ProbeError::SubmissionRejected { body, .. } => format!("Error queuing job: {}", body),
        other => format!("Error: {}", other),
    }
}

fn describe_report(report: &ScrapeReport) -> String {
    format!(
        "{} ({} requests captured, screenshot: {})",
        report.message,
        report.requests.len(),
        if report.screenshot.is_some() { "yes" } else { "no" }
    )
}

pub fn render_summary(outcomes: &[WorkerOutcome]) -> String {
    let mut out = String::from("Summary:\n");
    for outcome in outcomes {
        let state = match &outcome.result {
            Ok(JobResult::Succeeded(_)) => "succeeded".to_string(),
            Ok(JobResult::Failed(_)) => "failed".to_string(),
            Ok(JobResult::Unexpected(status)) => format!("unexpected {}", status.as_u16()),
            Err(e) => format!("error: {}", e),
        };
        out.push_str(&format!(
            "  {} [{}] {} in {}s\n",
            outcome.url,
            outcome.job_id.as_deref().unwrap_or("-"),
            state,
            outcome.elapsed().num_seconds()
        ));
    }
    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    out.push_str(&format!("{}/{} jobs succeeded", succeeded, outcomes.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn plain_json_result_is_pretty_printed() {
        let rendered = render_result(&JobResult::Succeeded(ResultBody::Json(json!({"title": "Result"}))));
        assert_eq!(rendered, "Job completed:\n{\n  \"title\": \"Result\"\n}");
    }

    #[test]
    fn service_payload_gets_a_headline() {
        let rendered = render_result(&JobResult::Succeeded(ResultBody::Json(json!({
            "message": "Successfully scraped https://example.com",
            "requests": [{"url": "https://example.com/", "method": "GET", "headers": {}}],
            "screenshot": "aGVsbG8="
        }))));
        assert!(rendered.starts_with(
            "Job completed: Successfully scraped https://example.com (1 requests captured, screenshot: yes)"
        ));
    }

    #[test]
    fn failures_and_unexpected_codes() {
        assert_eq!(render_result(&JobResult::Failed("boom".into())), "Job failed: boom");
        assert_eq!(
            render_result(&JobResult::Unexpected(StatusCode::GONE)),
            "Unexpected status code: 410"
        );
        assert_eq!(
            render_result(&JobResult::Succeeded(ResultBody::Raw("not json".into()))),
            "Job completed:\nnot json"
        );
    }

    #[test]
    fn rejected_submission_shows_body() {
        let err = ProbeError::SubmissionRejected {
            status: StatusCode::NOT_FOUND,
            body: "not found".into(),
        };
        assert_eq!(render_error(&err), "Error queuing job: not found");
    }

    #[test]
    fn summary_counts_successes() {
        let finished_at = Utc::now();
        let started_at = finished_at - Duration::seconds(15);
        let outcomes = vec![
            WorkerOutcome {
                url: "https://a".into(),
                job_id: Some("1".into()),
                result: Ok(JobResult::Succeeded(ResultBody::Raw("ok".into()))),
                started_at,
                finished_at,
            },
            WorkerOutcome {
                url: "https://b".into(),
                job_id: None,
                result: Err(ProbeError::SubmissionRejected {
                    status: StatusCode::BAD_REQUEST,
                    body: "bad".into(),
                }),
                started_at,
                finished_at,
            },
        ];
        let summary = render_summary(&outcomes);
        assert!(summary.contains("  https://a [1] succeeded in 15s"));
        assert!(summary.contains("  https://b [-] error: Error queuing job [400 Bad Request]: bad"));
        assert!(summary.ends_with("1/2 jobs succeeded"));
    }
}
