//! Export job monitor responses.

use serde::Deserialize;
use serde_json::Value;

/// State of an export job as reported by the monitor endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
    /// Any status string the workflow does not know about.
    Unrecognized(String),
}

impl From<&str> for JobStatus {
    fn from(status: &str) -> Self {
        match status {
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            other => JobStatus::Unrecognized(other.to_string()),
        }
    }
}

/// Body of `GET /characters/{id}/monitor`.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub job_result: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl MonitorResponse {
    pub fn job_status(&self) -> JobStatus {
        JobStatus::from(self.status.as_str())
    }

    /// URL of the exported file, when the job result is one.
    pub fn result_url(&self) -> Option<&str> {
        self.job_result
            .as_ref()
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Diagnostic text combining the remote message and job result.
    pub fn diagnostic(&self) -> String {
        let message = match &self.message {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::from("no message"),
            Some(other) => other.to_string(),
        };
        match &self.job_result {
            Some(Value::Null) | None => message,
            Some(result) => format!("{} (result: {})", message, result),
        }
    }
}
