use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{SimError, page_window, parse_offset};
use crate::pagination::Page;
use crate::query::{Entity, QueryRequest, QueryService};

/// Document store answering kind queries from memory
pub struct InMemoryEntityStore {
    entities: Vec<(String, Entity)>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            latency: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Add `count` entities of `kind`, keyed `kind/n` with an `index` property
    pub fn with_entities(mut self, kind: &str, count: usize) -> Self {
        for index in 0..count {
            let entity = Entity::new(format!("{}/{}", kind, index)).with_property("index", index);
            self.entities.push((kind.to_string(), entity));
        }
        self
    }

    /// Delay every query by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryService for InMemoryEntityStore {
    type Error = SimError;

    async fn run_query(&self, request: QueryRequest) -> Result<Page<Entity>, SimError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let offset = parse_offset(request.page.page_token.as_deref())?;
        let matching: Vec<&Entity> = self
            .entities
            .iter()
            .filter(|(kind, _)| *kind == request.kind)
            .map(|(_, entity)| entity)
            .collect();

        let (start, end, next_page_token) = page_window(offset, request.page.page_size, matching.len());
        let items = matching[start..end].iter().map(|entity| (*entity).clone()).collect();

        Ok(Page::new(items, next_page_token))
    }
}
