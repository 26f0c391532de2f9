use std::future::Future;

use super::models::{Entity, QueryRequest};
use crate::errors::Error;
use crate::pagination::Page;

/// Remote query endpoint of the document store, supplied by the transport layer
pub trait QueryService {
    type Error: From<Error>;

    /// Run one page of a query
    fn run_query(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = Result<Page<Entity>, Self::Error>> + Send;
}
