use super::models::{Job, JobReference, ListJobsRequest};
use crate::errors::Error;
use crate::pagination::Page;

/// Remote calls of the job endpoints, supplied by the transport layer
pub trait JobService {
    /// Transport or service failure; must be able to carry this crate's errors
    type Error: From<Error>;

    /// One page of the job listing
    fn list_jobs(&self, request: ListJobsRequest) -> Result<Page<Job>, Self::Error>;

    fn get_job(&self, reference: &JobReference) -> Result<Job, Self::Error>;

    fn cancel_job(&self, reference: &JobReference) -> Result<Job, Self::Error>;
}
