use anyhow::Result;

use cloud_pager::cli::Command;
use cloud_pager::{handle_list, handle_poll, handle_query, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::List {
            total,
            page_size,
            limit,
        } => handle_list(*total, *page_size, *limit),
        Command::Poll {
            ready_after,
            max_attempts,
            interval_ms,
            timeout_secs,
        } => handle_poll(*ready_after, *max_attempts, *interval_ms, *timeout_secs),
        Command::Query {
            kind,
            count,
            page_size,
        } => handle_query(kind, *count, *page_size),
    }
}
