use anyhow::Result;
use log::info;
use std::io::Write;

use crate::config::AppConfig;
use crate::errors::with_remote_context;
use crate::jobs::{JobClient, ListJobsOptions};
use crate::sim::InMemoryJobService;

use super::progress::ListingProgress;

pub struct ListingService {
    config: AppConfig,
    client: JobClient<InMemoryJobService>,
}

impl ListingService {
    pub fn new(config: AppConfig, total: usize) -> Self {
        let service = InMemoryJobService::new(&config.paging.project_id, total);
        Self {
            config,
            client: JobClient::new(service),
        }
    }

    pub fn client(&self) -> &JobClient<InMemoryJobService> {
        &self.client
    }

    /// Write every listed job as one JSON line, stopping after `limit` jobs
    pub fn run(&self, limit: Option<usize>, out: &mut impl Write) -> Result<usize> {
        info!("=== Listing Jobs ===");

        let project_id = &self.config.paging.project_id;
        let mut jobs = self.client.list_jobs(project_id, self.build_options())?;
        let mut progress = ListingProgress::new("job listing", limit);

        while !progress.reached_limit() {
            let Some(job) = jobs.next() else {
                break;
            };
            let job = with_remote_context(job, "list jobs")?;
            writeln!(out, "{}", serde_json::to_string(&job)?)?;
            progress.increment();
        }

        info!(
            "  → Listed {} jobs with {} remote calls",
            progress.count(),
            jobs.pages_fetched()
        );
        Ok(progress.count())
    }

    fn build_options(&self) -> ListJobsOptions {
        match self.config.paging.page_size {
            Some(page_size) => ListJobsOptions::new().with_page_size(page_size),
            None => ListJobsOptions::new(),
        }
    }
}
