use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// One response of a paged listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records in response order; absent means no records
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    /// Page that ends the listing
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    pub fn has_more(&self) -> bool {
        self.next_page_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map every record to exactly one item, keeping order and token
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_page_token: self.next_page_token,
        }
    }
}

/// A request that can be sent to a paged listing endpoint
pub trait PageRequest {
    fn set_page_size(&mut self, page_size: u32);
    fn set_page_token(&mut self, page_token: String);
}

/// Paging fields shared by list requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl PageRequest for PageQuery {
    fn set_page_size(&mut self, page_size: u32) {
        self.page_size = Some(page_size);
    }

    fn set_page_token(&mut self, page_token: String) {
        self.page_token = Some(page_token);
    }
}

/// Page size hints must be positive
pub fn check_page_size(page_size: u32) -> Result<u32> {
    if page_size == 0 {
        return Err(Error::invalid_argument("page_size", "must be positive"));
    }
    Ok(page_size)
}
