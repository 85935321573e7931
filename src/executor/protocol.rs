//! Payloads exchanged with the backend.
//!
//! The core treats these as opaque beyond the fields below; the concrete wire
//! encoding belongs to the transport collaborator.

use serde::{Deserialize, Serialize};

/// Default page offset per dimension.
pub const DEFAULT_OFFSET: [u32; 2] = [0, 0];

/// Default page size per dimension.
pub const DEFAULT_LIMIT: [u32; 2] = [1000, 1000];

/// Descriptor returned when an execution is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescriptor {
    /// Header descriptors per result dimension
    #[serde(default)]
    pub dimensions: Vec<serde_json::Value>,
    pub links: ExecutionLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLinks {
    /// Where pages of the result are fetched from
    pub execution_result: String,
}

/// One page of an execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    #[serde(default)]
    pub data: serde_json::Value,
    pub paging: Paging,
    #[serde(default)]
    pub header_items: serde_json::Value,
}

/// Paging metadata of a result page, per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub count: Vec<u32>,
    pub offset: Vec<u32>,
    pub total: Vec<u32>,
}

impl Paging {
    /// Whether rows beyond this page exist in the first dimension.
    pub fn has_more(&self) -> bool {
        match (self.offset.first(), self.count.first(), self.total.first()) {
            (Some(offset), Some(count), Some(total)) => offset + count < *total,
            _ => false,
        }
    }
}

/// Requested window of a result, per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub offset: Vec<u32>,
    pub limit: Vec<u32>,
}

impl PageRequest {
    pub fn new(offset: Vec<u32>, limit: Vec<u32>) -> Self {
        Self { offset, limit }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_OFFSET.to_vec(), DEFAULT_LIMIT.to_vec())
    }
}
