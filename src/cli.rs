use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "cloud-pager paging and polling demo")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List simulated jobs page by page
    List {
        /// Number of jobs held by the simulated service
        #[arg(short, long, default_value_t = 25)]
        total: usize,
        /// Page size hint sent with every request
        #[arg(short, long)]
        page_size: Option<u32>,
        /// Stop after this many jobs
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Wait for a simulated job to finish
    Poll {
        /// Status checks before the job reports done
        #[arg(short, long, default_value_t = 3)]
        ready_after: u32,
        /// Give up after this many checks
        #[arg(short, long)]
        max_attempts: Option<u64>,
        /// Delay between checks in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Stream simulated entities of one kind
    Query {
        /// Entity kind
        #[arg(short, long, default_value = "Task")]
        kind: String,
        /// Number of entities held by the simulated store
        #[arg(short, long, default_value_t = 25)]
        count: usize,
        /// Page size hint sent with every request
        #[arg(short, long)]
        page_size: Option<u32>,
    },
}
