//! Response envelopes used by every REST collection endpoint.

use serde::{Deserialize, Serialize};

use super::pagination::PaginationMeta;

/// `GET /{resource}` response: `{ data: T[], pagination?: {...} }`
///
/// The unpaginated variant (dropdown lists) omits `pagination`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ListEnvelope<T> {
    /// Total number of matching items on the server.
    ///
    /// Falls back to the number of rows received when the backend
    /// did not send pagination metadata.
    pub fn total(&self) -> u64 {
        self.pagination
            .map(|p| p.total)
            .unwrap_or(self.data.len() as u64)
    }
}

/// `POST|PUT|DELETE /{resource}/{id}` response: `{ data?: T, error?: string }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Default for MutationEnvelope<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
