use std::future::Future;

use futures_util::stream::{self, Stream, TryStreamExt};
use tokio_util::sync::CancellationToken;

use super::page::{Page, PageRequest, check_page_size};
use super::state::PageState;
use crate::cancel;
use crate::errors::{Error, Result};

/// Asynchronous counterpart of [`PagedSequence`](super::PagedSequence).
///
/// The fetch step returns a future; pages are still requested strictly one
/// after another. With a cancellation token attached, an in-flight fetch is
/// dropped as soon as the token fires.
pub struct PagedStream<F, G> {
    state: PageState<F>,
    fetch: G,
}

impl<F, G, Fut, Req, T, E> PagedStream<F, G>
where
    F: FnMut() -> Req,
    Req: PageRequest,
    G: FnMut(Req) -> Fut,
    Fut: Future<Output = std::result::Result<Page<T>, E>>,
    E: From<Error>,
{
    pub fn new(factory: F, fetch: G) -> Self {
        Self {
            state: PageState::new(factory),
            fetch,
        }
    }

    /// Attach the same page size hint to every request
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        self.state.set_page_size(check_page_size(page_size)?);
        Ok(self)
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.state.set_cancellation(token);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.state.set_label(label.into());
        self
    }

    /// One stream element per remote call
    pub fn into_page_stream(self) -> impl Stream<Item = std::result::Result<Page<T>, E>> {
        stream::unfold(self, |mut this| async move {
            let request = match this.state.begin()? {
                Ok(request) => request,
                Err(err) => return Some((Err(err.into()), this)),
            };

            let fetch = (this.fetch)(request);
            let finished = cancel::run_until_cancelled(this.state.cancellation(), fetch).await;
            let outcome = match finished {
                Some(outcome) => this.state.complete(outcome),
                None => Err(this.state.abandon().into()),
            };
            Some((outcome, this))
        })
    }

    /// Items of all pages, concatenated in fetch order
    pub fn into_stream(self) -> impl Stream<Item = std::result::Result<T, E>> {
        self.into_page_stream()
            .map_ok(|page| stream::iter(page.items.into_iter().map(Ok)))
            .try_flatten()
    }
}
