use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::{PageQuery, PageRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadConsistency {
    Strong,
    Eventual,
}

/// Project and namespace every request of a client is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionId {
    pub project_id: String,
    /// Empty for the default namespace
    #[serde(default)]
    pub namespace_id: String,
}

/// Stored document returned by a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub key: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Entity {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Caller-side description of a kind query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub kind: String,
    pub page_size: Option<u32>,
    pub read_consistency: Option<ReadConsistency>,
}

impl Query {
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            page_size: None,
            read_consistency: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_read_consistency(mut self, consistency: ReadConsistency) -> Self {
        self.read_consistency = Some(consistency);
        self
    }
}

/// Wire request of the query endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub partition_id: PartitionId,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_consistency: Option<ReadConsistency>,
    #[serde(flatten)]
    pub page: PageQuery,
}

impl PageRequest for QueryRequest {
    fn set_page_size(&mut self, page_size: u32) {
        self.page.set_page_size(page_size);
    }

    fn set_page_token(&mut self, page_token: String) {
        self.page.set_page_token(page_token);
    }
}
