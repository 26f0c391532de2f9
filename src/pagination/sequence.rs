use std::iter::FusedIterator;

use tokio_util::sync::CancellationToken;

use super::page::{Page, PageRequest, check_page_size};
use super::state::PageState;
use crate::errors::{Error, Result};

/// Blocking, lazy, single-pass view over a paged listing.
///
/// Built from a factory producing a fresh request and a fetch step that
/// performs one remote call. Pages are requested only when the items of the
/// previous page have been consumed, so dropping the sequence early never
/// triggers further calls. To start over, build a new sequence.
///
/// A fetch error is yielded once, unchanged, and ends the sequence.
pub struct PagedSequence<F, G, T> {
    pages: Pages<F, G>,
    buffer: std::vec::IntoIter<T>,
}

/// Page-level view of a listing: one item per remote call
pub struct Pages<F, G> {
    state: PageState<F>,
    fetch: G,
}

impl<F, G, Req, T, E> PagedSequence<F, G, T>
where
    F: FnMut() -> Req,
    Req: PageRequest,
    G: FnMut(Req) -> std::result::Result<Page<T>, E>,
    E: From<Error>,
{
    pub fn new(factory: F, fetch: G) -> Self {
        Self {
            pages: Pages {
                state: PageState::new(factory),
                fetch,
            },
            buffer: Vec::new().into_iter(),
        }
    }

    /// Attach the same page size hint to every request
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        self.pages.state.set_page_size(check_page_size(page_size)?);
        Ok(self)
    }

    /// Stop issuing requests once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.pages.state.set_cancellation(token);
        self
    }

    /// Name used in logs and in the cancellation error
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.pages.state.set_label(label.into());
        self
    }

    pub fn pages_fetched(&self) -> u64 {
        self.pages.state.pages_fetched()
    }

    /// Switch to page-level iteration.
    ///
    /// Call before consuming items; records already buffered from a fetched
    /// page are not replayed.
    pub fn into_pages(self) -> Pages<F, G> {
        self.pages
    }

    /// Transform each record into one item, keeping order
    pub fn map_items<U>(self, mut f: impl FnMut(T) -> U) -> impl Iterator<Item = std::result::Result<U, E>> {
        self.map(move |item| item.map(&mut f))
    }
}

impl<F, G, Req, T, E> Iterator for Pages<F, G>
where
    F: FnMut() -> Req,
    Req: PageRequest,
    G: FnMut(Req) -> std::result::Result<Page<T>, E>,
    E: From<Error>,
{
    type Item = std::result::Result<Page<T>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let request = match self.state.begin()? {
            Ok(request) => request,
            Err(err) => return Some(Err(err.into())),
        };
        let outcome = (self.fetch)(request);
        Some(self.state.complete(outcome))
    }
}

impl<F, G, Req, T, E> FusedIterator for Pages<F, G>
where
    F: FnMut() -> Req,
    Req: PageRequest,
    G: FnMut(Req) -> std::result::Result<Page<T>, E>,
    E: From<Error>,
{
}

impl<F, G, Req, T, E> Iterator for PagedSequence<F, G, T>
where
    F: FnMut() -> Req,
    Req: PageRequest,
    G: FnMut(Req) -> std::result::Result<Page<T>, E>,
    E: From<Error>,
{
    type Item = std::result::Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            match self.pages.next()? {
                Ok(page) => self.buffer = page.items.into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<F, G, Req, T, E> FusedIterator for PagedSequence<F, G, T>
where
    F: FnMut() -> Req,
    Req: PageRequest,
    G: FnMut(Req) -> std::result::Result<Page<T>, E>,
    E: From<Error>,
{
}
