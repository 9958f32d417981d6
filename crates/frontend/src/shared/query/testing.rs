//! In-memory transport for query-layer tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::cache::MemoryQueryCache;
use super::client::QueryClient;
use super::error::ApiError;
use super::list_state::ListParams;
use super::transport::{Method, Transport};
use crate::system::auth::storage::StaticCredentials;

pub type SentRequest = (Method, String, ListParams, Option<Value>);

#[derive(Default)]
struct MockState {
    get_responses: HashMap<String, Result<Value, ApiError>>,
    get_queries: Vec<(String, ListParams)>,
    send_responses: VecDeque<Result<Value, ApiError>>,
    sent: Vec<SentRequest>,
    held_get: Option<Arc<Notify>>,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn respond_get(&self, path: &str, body: Value) {
        self.state
            .lock()
            .unwrap()
            .get_responses
            .insert(path.to_string(), Ok(body));
    }

    pub fn fail_get(&self, path: &str, err: ApiError) {
        self.state
            .lock()
            .unwrap()
            .get_responses
            .insert(path.to_string(), Err(err));
    }

    /// The next GET reads its response immediately but only returns once
    /// the returned gate is notified.
    pub fn hold_next_get(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().held_get = Some(gate.clone());
        gate
    }

    pub fn respond_send(&self, body: Value) {
        self.state.lock().unwrap().send_responses.push_back(Ok(body));
    }

    pub fn fail_next_send(&self, err: ApiError) {
        self.state.lock().unwrap().send_responses.push_back(Err(err));
    }

    pub fn get_count(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .get_queries
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    pub fn last_query(&self, path: &str) -> Option<ListParams> {
        self.state
            .lock()
            .unwrap()
            .get_queries
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.state.lock().unwrap().sent.clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &ListParams) -> Result<Value, ApiError> {
        let (response, held) = {
            let mut state = self.state.lock().unwrap();
            state.get_queries.push((path.to_string(), query.clone()));
            let response = state.get_responses.get(path).cloned().unwrap_or_else(|| {
                Err(ApiError::Http {
                    status: 404,
                    message: format!("no mock for {}", path),
                })
            });
            (response, state.held_get.take())
        };
        if let Some(gate) = held {
            gate.notified().await;
        }
        response
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &ListParams,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut state = self.state.lock().unwrap();
        state
            .sent
            .push((method, path.to_string(), query.clone(), body.cloned()));
        state.send_responses.pop_front().unwrap_or(Ok(Value::Null))
    }
}

/// Client wired to a fresh mock transport and the given cache
pub fn client_with(cache: MemoryQueryCache) -> (QueryClient, MockTransport, MemoryQueryCache) {
    let transport = MockTransport::default();
    let client = QueryClient::new(
        Arc::new(transport.clone()),
        Arc::new(cache.clone()),
        Arc::new(StaticCredentials::new(Some("test-token"), None)),
        500,
    );
    (client, transport, cache)
}
