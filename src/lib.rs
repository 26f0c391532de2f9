pub mod cancel;
pub mod cli;
pub mod config;
pub mod errors;
pub mod jobs;
pub mod pagination;
pub mod poll;
pub mod query;
pub mod services;
pub mod sim;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;
use tokio_util::sync::CancellationToken;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::listing::ListingService;
use crate::services::polling::PollingService;
use crate::services::querying::QueryingService;

pub use errors::{Error, Result as PagerResult};
pub use pagination::{Page, PageCursor, PageQuery, PageRequest, PagedSequence, PagedStream, Pages};
pub use poll::{Clock, DeadlinePoller, ManualClock, PollSettings, PollStatus, SystemClock, WaitBudget};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_list(total: usize, page_size: Option<u32>, limit: Option<usize>) -> Result<()> {
    let mut config = AppConfig::new();
    if page_size.is_some() {
        config.paging.page_size = page_size;
    }

    let service = ListingService::new(config, total);
    service.run(limit, &mut std::io::stdout().lock())?;
    Ok(())
}

pub fn handle_poll(
    ready_after: u32,
    max_attempts: Option<u64>,
    interval_ms: Option<u64>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let mut config = AppConfig::new();
    if max_attempts.is_some() {
        config.polling.max_attempts = max_attempts;
    }
    if let Some(interval_ms) = interval_ms {
        config.polling.interval_ms = interval_ms;
    }
    if timeout_secs.is_some() {
        config.polling.timeout_secs = timeout_secs;
    }

    let service = PollingService::new(config, ready_after);
    service.run(&mut std::io::stdout().lock())?;
    Ok(())
}

pub fn handle_query(kind: &str, count: usize, page_size: Option<u32>) -> Result<()> {
    let mut config = AppConfig::new();
    if page_size.is_some() {
        config.paging.page_size = page_size;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let token = CancellationToken::new();
        spawn_interrupt_listener(token.clone());

        let service = QueryingService::new(config, kind, count)?;
        service.run(kind, token, &mut std::io::stdout()).await?;
        Ok::<(), anyhow::Error>(())
    })
}

fn spawn_interrupt_listener(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling");
            token.cancel();
        }
    });
}
