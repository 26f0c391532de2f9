mod client;
mod models;
mod service;

pub use client::QueryClient;
pub use models::{Entity, PartitionId, Query, QueryRequest, ReadConsistency};
pub use service::QueryService;
