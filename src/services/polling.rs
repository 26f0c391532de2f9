use anyhow::{Context, Result};
use log::info;
use std::io::Write;

use crate::config::AppConfig;
use crate::jobs::{Job, JobClient, JobReference};
use crate::poll::{Clock, DeadlinePoller};
use crate::sim::InMemoryJobService;

pub struct PollingService {
    config: AppConfig,
    client: JobClient<InMemoryJobService>,
}

impl PollingService {
    pub fn new(config: AppConfig, ready_after: u32) -> Self {
        let service = InMemoryJobService::new(&config.paging.project_id, 1).with_ready_after(ready_after);
        Self {
            config,
            client: JobClient::new(service),
        }
    }

    pub fn client(&self) -> &JobClient<InMemoryJobService> {
        &self.client
    }

    /// Wait for the simulated job and write its final state as JSON
    pub fn run(&self, out: &mut impl Write) -> Result<Job> {
        let poller = DeadlinePoller::new(self.config.polling.to_poll_settings())?;
        self.run_with(&poller, out)
    }

    pub fn run_with<C: Clock>(&self, poller: &DeadlinePoller<C>, out: &mut impl Write) -> Result<Job> {
        info!("=== Polling Job ===");

        let reference = JobReference::new(self.config.paging.project_id.as_str(), "job-0001");
        let job = self
            .client
            .poll_job_with(&reference, poller)
            .with_context(|| format!("Failed waiting for {}", reference.job_id))?;

        info!("  → {} finished after {} checks", reference.job_id, self.client.service().get_calls());
        writeln!(out, "{}", serde_json::to_string(&job)?)?;
        Ok(job)
    }
}
