use anyhow::Result;
use futures_util::StreamExt;
use log::info;
use std::io::Write;
use std::pin::pin;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::errors::with_remote_context;
use crate::query::{Query, QueryClient};
use crate::sim::InMemoryEntityStore;

pub struct QueryingService {
    config: AppConfig,
    client: QueryClient<InMemoryEntityStore>,
}

impl QueryingService {
    pub fn new(config: AppConfig, kind: &str, count: usize) -> Result<Self> {
        let store = InMemoryEntityStore::new().with_entities(kind, count);
        let client = QueryClient::new(&config.paging.project_id, "", store)?;
        Ok(Self { config, client })
    }

    pub fn client(&self) -> &QueryClient<InMemoryEntityStore> {
        &self.client
    }

    /// Stream every entity of `kind` as JSON lines until done or cancelled
    pub async fn run(&self, kind: &str, token: CancellationToken, out: &mut impl Write) -> Result<usize> {
        info!("=== Querying {} ===", kind);

        let mut query = Query::kind(kind);
        if let Some(page_size) = self.config.paging.page_size {
            query = query.with_page_size(page_size);
        }

        let mut entities = pin!(self.client.run_query_until(query, token)?);
        let mut count = 0;
        while let Some(entity) = entities.next().await {
            let entity = with_remote_context(entity, "run query")?;
            writeln!(out, "{}", serde_json::to_string(&entity)?)?;
            count += 1;
        }

        info!("  → Streamed {} entities", count);
        Ok(count)
    }
}
