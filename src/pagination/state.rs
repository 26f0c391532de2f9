use log::debug;
use tokio_util::sync::CancellationToken;

use super::cursor::PageCursor;
use super::page::{Page, PageRequest};
use crate::cancel;
use crate::errors::Error;

const DEFAULT_LABEL: &str = "paged listing";

/// Request-building half of a paged listing, shared by the blocking and async forms
pub(crate) struct PageState<F> {
    factory: F,
    page_size: Option<u32>,
    cursor: PageCursor,
    cancellation: Option<CancellationToken>,
    label: String,
    pages_fetched: u64,
}

impl<F> PageState<F> {
    pub(crate) fn new(factory: F) -> Self {
        Self {
            factory,
            page_size: None,
            cursor: PageCursor::new(),
            cancellation: None,
            label: DEFAULT_LABEL.to_string(),
            pages_fetched: 0,
        }
    }

    pub(crate) fn set_page_size(&mut self, page_size: u32) {
        self.page_size = Some(page_size);
    }

    pub(crate) fn set_cancellation(&mut self, token: CancellationToken) {
        self.cancellation = Some(token);
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    pub(crate) fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Build the request for the next page.
    ///
    /// `None` once the listing is done; a cancelled listing reports
    /// [`Error::Cancelled`] once and is done afterwards.
    pub(crate) fn begin<Req>(&mut self) -> Option<Result<Req, Error>>
    where
        F: FnMut() -> Req,
        Req: PageRequest,
    {
        if self.cursor.is_done() {
            return None;
        }
        if cancel::is_cancelled(self.cancellation()) {
            return Some(Err(self.abandon()));
        }

        let mut request = (self.factory)();
        if let Some(page_size) = self.page_size {
            request.set_page_size(page_size);
        }
        if let Some(token) = self.cursor.token() {
            request.set_page_token(token.to_string());
        }

        self.pages_fetched += 1;
        debug!("{}: fetching page {}", self.label, self.pages_fetched);
        Some(Ok(request))
    }

    /// Record the outcome of a fetch and move the cursor
    pub(crate) fn complete<T, E>(&mut self, outcome: Result<Page<T>, E>) -> Result<Page<T>, E> {
        match &outcome {
            Ok(page) => {
                debug!(
                    "{}: page {} returned {} items",
                    self.label,
                    self.pages_fetched,
                    page.len()
                );
                self.cursor.advance(page.next_page_token.clone());
            }
            Err(_) => {
                debug!("{}: page {} failed", self.label, self.pages_fetched);
                self.cursor.finish();
            }
        }
        outcome
    }

    /// Stop the listing because the caller cancelled it
    pub(crate) fn abandon(&mut self) -> Error {
        debug!("{}: cancelled after {} pages", self.label, self.pages_fetched);
        self.cursor.finish();
        Error::cancelled(self.label.clone())
    }
}
