mod client;
mod models;
mod service;

pub use client::JobClient;
pub use models::{Job, JobReference, JobState, ListJobsOptions, ListJobsRequest};
pub use service::JobService;
