use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use log::debug;

use super::{SimError, page_window, parse_offset};
use crate::jobs::{Job, JobReference, JobService, JobState, ListJobsRequest};
use crate::pagination::Page;

const DONE: u32 = u32::MAX;

/// Job service holding a fixed set of jobs in memory.
///
/// Every `get_job` call moves a job forward; it reports `Done` on its
/// `ready_after`-th check. Calls are counted so callers can verify how much
/// remote traffic a helper produced.
pub struct InMemoryJobService {
    jobs: Vec<JobReference>,
    ready_after: u32,
    fail_get_on: Option<usize>,
    checks: Mutex<HashMap<String, u32>>,
    list_requests: Mutex<Vec<ListJobsRequest>>,
    get_calls: AtomicUsize,
}

impl InMemoryJobService {
    pub fn new(project_id: &str, total: usize) -> Self {
        let jobs = (1..=total)
            .map(|n| JobReference::new(project_id, format!("job-{:04}", n)))
            .collect();

        Self {
            jobs,
            ready_after: 1,
            fail_get_on: None,
            checks: Mutex::new(HashMap::new()),
            list_requests: Mutex::new(Vec::new()),
            get_calls: AtomicUsize::new(0),
        }
    }

    /// Number of status checks before a job reports `Done`
    pub fn with_ready_after(mut self, checks: u32) -> Self {
        self.ready_after = checks.max(1);
        self
    }

    /// Fail the `call`-th `get_job` call (1-based)
    pub fn with_failure_on_get(mut self, call: usize) -> Self {
        self.fail_get_on = Some(call);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_requests().len()
    }

    pub fn list_requests(&self) -> Vec<ListJobsRequest> {
        self.list_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn state_of(&self, checks: &HashMap<String, u32>, reference: &JobReference) -> JobState {
        match checks.get(&reference.job_id).copied().unwrap_or(0) {
            0 => JobState::Pending,
            n if n >= self.ready_after => JobState::Done,
            _ => JobState::Running,
        }
    }

    fn find(&self, reference: &JobReference) -> Result<&JobReference, SimError> {
        self.jobs
            .iter()
            .find(|job| *job == reference)
            .ok_or_else(|| SimError::JobNotFound(reference.job_id.clone()))
    }
}

impl JobService for InMemoryJobService {
    type Error = SimError;

    fn list_jobs(&self, request: ListJobsRequest) -> Result<Page<Job>, SimError> {
        self.list_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let offset = parse_offset(request.page.page_token.as_deref())?;
        let checks = self.checks.lock().unwrap_or_else(PoisonError::into_inner);

        let matching: Vec<Job> = self
            .jobs
            .iter()
            .filter(|job| job.project_id == request.project_id)
            .map(|job| Job::new(job.clone(), self.state_of(&checks, job)))
            .filter(|job| request.state_filter.is_none_or(|state| job.state == state))
            .collect();

        let (start, end, next_page_token) = page_window(offset, request.page.page_size, matching.len());
        debug!("Listing jobs {}..{} of {}", start, end, matching.len());

        Ok(Page::new(matching[start..end].to_vec(), next_page_token))
    }

    fn get_job(&self, reference: &JobReference) -> Result<Job, SimError> {
        let call = self.get_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_get_on == Some(call) {
            return Err(SimError::Injected(call));
        }

        let job = self.find(reference)?;
        let mut checks = self.checks.lock().unwrap_or_else(PoisonError::into_inner);
        let count = checks.entry(job.job_id.clone()).or_insert(0);
        *count = count.saturating_add(1);

        Ok(Job::new(job.clone(), self.state_of(&checks, job)))
    }

    fn cancel_job(&self, reference: &JobReference) -> Result<Job, SimError> {
        let job = self.find(reference)?;
        let mut checks = self.checks.lock().unwrap_or_else(PoisonError::into_inner);
        checks.insert(job.job_id.clone(), DONE);

        Ok(Job::new(job.clone(), JobState::Done))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_progresses_with_checks() {
        let service = InMemoryJobService::new("proj", 1).with_ready_after(3);
        let reference = JobReference::new("proj", "job-0001");

        assert_eq!(service.get_job(&reference).unwrap().state, JobState::Running);
        assert_eq!(service.get_job(&reference).unwrap().state, JobState::Running);
        assert_eq!(service.get_job(&reference).unwrap().state, JobState::Done);
        assert_eq!(service.get_calls(), 3);
    }

    #[test]
    fn test_unknown_job() {
        let service = InMemoryJobService::new("proj", 1);
        let result = service.get_job(&JobReference::new("proj", "job-9999"));

        assert!(matches!(result, Err(SimError::JobNotFound(_))));
    }

    #[test]
    fn test_list_filters_by_state() {
        let service = InMemoryJobService::new("proj", 3);
        service.cancel_job(&JobReference::new("proj", "job-0002")).unwrap();

        let mut request = ListJobsRequest::new("proj");
        request.state_filter = Some(JobState::Done);
        let page = service.list_jobs(request).unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].reference.job_id, "job-0002");
        assert!(!page.has_more());
    }
}
