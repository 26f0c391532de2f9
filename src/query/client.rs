use futures_util::Stream;
use log::info;
use tokio_util::sync::CancellationToken;

use super::models::{Entity, PartitionId, Query, QueryRequest};
use super::service::QueryService;
use crate::errors::{Result, check_not_empty};
use crate::pagination::{Page, PageQuery, PageRequest, PagedStream, check_page_size};

/// Query helpers over a [`QueryService`], scoped to one partition
pub struct QueryClient<S> {
    service: S,
    partition: PartitionId,
}

impl<S: QueryService> QueryClient<S> {
    pub fn new(project_id: &str, namespace_id: &str, service: S) -> Result<Self> {
        check_not_empty(project_id, "project_id")?;
        Ok(Self {
            service,
            partition: PartitionId {
                project_id: project_id.to_string(),
                namespace_id: namespace_id.to_string(),
            },
        })
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn partition(&self) -> &PartitionId {
        &self.partition
    }

    /// Fetch only the first page of `query`
    pub async fn run_query_single_call(&self, query: &Query) -> std::result::Result<Page<Entity>, S::Error> {
        let mut request = self.base_request(query)?;
        if let Some(page_size) = query.page_size {
            request.set_page_size(check_page_size(page_size)?);
        }
        self.service.run_query(request).await
    }

    /// Stream every entity matching `query`, fetching pages on demand
    pub fn run_query(
        &self,
        query: Query,
    ) -> Result<impl Stream<Item = std::result::Result<Entity, S::Error>> + '_> {
        self.entity_stream(query, None)
    }

    /// Like [`run_query`](Self::run_query), stopping once `token` is cancelled
    pub fn run_query_until(
        &self,
        query: Query,
        token: CancellationToken,
    ) -> Result<impl Stream<Item = std::result::Result<Entity, S::Error>> + '_> {
        self.entity_stream(query, Some(token))
    }

    fn entity_stream(
        &self,
        query: Query,
        cancellation: Option<CancellationToken>,
    ) -> Result<impl Stream<Item = std::result::Result<Entity, S::Error>> + '_> {
        let base = self.base_request(&query)?;
        info!("Running query on kind {}", query.kind);

        let factory = move || base.clone();
        let fetch = move |request: QueryRequest| self.service.run_query(request);

        let mut paged = PagedStream::new(factory, fetch).with_label(format!("query on {}", query.kind));
        if let Some(page_size) = query.page_size {
            paged = paged.with_page_size(page_size)?;
        }
        if let Some(token) = cancellation {
            paged = paged.with_cancellation(token);
        }
        Ok(paged.into_stream())
    }

    fn base_request(&self, query: &Query) -> Result<QueryRequest> {
        check_not_empty(&query.kind, "kind")?;
        Ok(QueryRequest {
            partition_id: self.partition.clone(),
            kind: query.kind.clone(),
            read_consistency: query.read_consistency,
            page: PageQuery::default(),
        })
    }
}
