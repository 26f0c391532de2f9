use log::info;

use super::models::{Job, JobReference, ListJobsOptions, ListJobsRequest};
use super::service::JobService;
use crate::errors::{Result, check_not_empty};
use crate::pagination::{Page, PagedSequence};
use crate::poll::{Clock, DeadlinePoller, PollSettings};

/// Job helpers over a [`JobService`]
pub struct JobClient<S> {
    service: S,
}

impl<S: JobService> JobClient<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Lazily list the jobs of a project, page by page
    pub fn list_jobs(
        &self,
        project_id: &str,
        options: ListJobsOptions,
    ) -> Result<
        PagedSequence<
            impl FnMut() -> ListJobsRequest + '_,
            impl FnMut(ListJobsRequest) -> std::result::Result<Page<Job>, S::Error> + '_,
            Job,
        >,
    > {
        check_not_empty(project_id, "project_id")?;
        info!("Listing jobs for project {}", project_id);

        let project_id = project_id.to_string();
        let page_size = options.page_size;
        let factory = move || {
            let mut request = ListJobsRequest::new(project_id.clone());
            options.modify_request(&mut request);
            request
        };
        let fetch = move |request: ListJobsRequest| self.service.list_jobs(request);

        let sequence = PagedSequence::new(factory, fetch).with_label("job listing");
        match page_size {
            Some(page_size) => sequence.with_page_size(page_size),
            None => Ok(sequence),
        }
    }

    pub fn get_job(&self, reference: &JobReference) -> std::result::Result<Job, S::Error> {
        reference.validate()?;
        self.service.get_job(reference)
    }

    pub fn cancel_job(&self, reference: &JobReference) -> std::result::Result<Job, S::Error> {
        reference.validate()?;
        info!("Cancelling job {}", reference.job_id);
        self.service.cancel_job(reference)
    }

    /// Block until the job reaches [`JobState::Done`](super::JobState::Done)
    pub fn poll_job(
        &self,
        reference: &JobReference,
        settings: PollSettings,
    ) -> std::result::Result<Job, S::Error> {
        let poller = DeadlinePoller::new(settings)?;
        self.poll_job_with(reference, &poller)
    }

    /// Like [`poll_job`](Self::poll_job) with a caller-configured poller
    pub fn poll_job_with<C: Clock>(
        &self,
        reference: &JobReference,
        poller: &DeadlinePoller<C>,
    ) -> std::result::Result<Job, S::Error> {
        reference.validate()?;
        let operation = format!("Job {}", reference.job_id);
        poller.wait_for(&operation, || self.service.get_job(reference), Job::is_done)
    }
}
