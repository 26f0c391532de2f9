use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, check_not_empty};
use crate::pagination::{PageQuery, PageRequest};

/// Identifies a job within a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    pub project_id: String,
    pub job_id: String,
}

impl JobReference {
    pub fn new(project_id: impl Into<String>, job_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            job_id: job_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_not_empty(&self.project_id, "project_id")?;
        check_not_empty(&self.job_id, "job_id")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobState {
    Pending,
    Running,
    Done,
}

/// Job as reported by the query service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub reference: JobReference,
    pub state: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(reference: JobReference, state: JobState) -> Self {
        Self {
            reference,
            state,
            created_at: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == JobState::Done
    }
}

/// Wire request of the job listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsRequest {
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_filter: Option<JobState>,
    #[serde(flatten)]
    pub page: PageQuery,
}

impl ListJobsRequest {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            state_filter: None,
            page: PageQuery::default(),
        }
    }
}

impl PageRequest for ListJobsRequest {
    fn set_page_size(&mut self, page_size: u32) {
        self.page.set_page_size(page_size);
    }

    fn set_page_token(&mut self, page_token: String) {
        self.page.set_page_token(page_token);
    }
}

/// Caller-side options of a job listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListJobsOptions {
    pub page_size: Option<u32>,
    pub state_filter: Option<JobState>,
}

impl ListJobsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_state_filter(mut self, state: JobState) -> Self {
        self.state_filter = Some(state);
        self
    }

    /// Copy the non-paging options onto a freshly built request
    pub fn modify_request(&self, request: &mut ListJobsRequest) {
        if let Some(state) = self.state_filter {
            request.state_filter = Some(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_validation() {
        assert!(JobReference::new("proj", "job-1").validate().is_ok());
        assert!(JobReference::new("", "job-1").validate().is_err());
        assert!(JobReference::new("proj", " ").validate().is_err());
    }

    #[test]
    fn test_list_request_wire_shape() {
        let mut request = ListJobsRequest::new("proj");
        ListJobsOptions::new()
            .with_state_filter(JobState::Running)
            .modify_request(&mut request);
        request.set_page_size(20);
        request.set_page_token("abc".to_string());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "projectId": "proj",
                "stateFilter": "RUNNING",
                "pageSize": 20,
                "pageToken": "abc"
            })
        );
    }
}
