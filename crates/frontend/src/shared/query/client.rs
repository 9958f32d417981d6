//! `QueryClient`: cached list reads and mutations with cache invalidation.

use contracts::enums::PortalType;
use contracts::shared::envelope::{ListEnvelope, MutationEnvelope};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::cache::{QueryCache, QueryKey};
use super::error::ApiError;
use super::list_state::{canonical_params, ListParams, LIMIT_PARAM, PAGE_PARAM};
use super::transport::{Method, Transport};
use crate::system::auth::storage::CredentialStore;

/// Marker set on placeholder rows inserted by optimistic creates
pub const OPTIMISTIC_FLAG: &str = "optimistic";

/// A REST collection, optionally scoped to one portal (`?portal=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resource {
    name: &'static str,
    portal: Option<PortalType>,
}

impl Resource {
    pub const fn new(name: &'static str) -> Self {
        Self { name, portal: None }
    }

    pub const fn scoped(name: &'static str, portal: PortalType) -> Self {
        Self {
            name,
            portal: Some(portal),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn portal(&self) -> Option<PortalType> {
        self.portal
    }

    pub fn path(&self) -> String {
        format!("/{}", self.name)
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.name, urlencoding::encode(id))
    }

    /// Prefix shared by every cached query of this resource
    pub fn family(&self) -> QueryKey {
        let key = QueryKey::new([self.name]);
        match self.portal {
            Some(portal) => key.child(portal.code()),
            None => key,
        }
    }

    pub fn list_key(&self, params: &ListParams) -> QueryKey {
        self.family().child("list").child(canonical_params(params))
    }

    pub fn all_key(&self) -> QueryKey {
        self.family().child("all")
    }

    /// Whether a freshly created row shows up in the cached query `key`:
    /// the unpaginated list and unfiltered first pages.
    pub fn shows_new_rows(&self, key: &QueryKey) -> bool {
        if *key == self.all_key() {
            return true;
        }
        let list = self.family().child("list");
        let canonical = match key.segments().split_last() {
            Some((canonical, parent)) if parent == list.segments() => canonical,
            _ => return false,
        };
        let first_page = format!("{}=1", PAGE_PARAM);
        canonical.split('&').all(|pair| {
            pair == first_page || pair.split('=').next() == Some(LIMIT_PARAM)
        })
    }

    fn scope_params(&self) -> ListParams {
        let mut params = ListParams::new();
        if let Some(portal) = self.portal {
            params.insert("portal".to_string(), portal.code().to_string());
        }
        params
    }

    fn with_scope(&self, params: &ListParams) -> ListParams {
        let mut merged = params.clone();
        merged.extend(self.scope_params());
        merged
    }
}

/// One page of a collection, or the whole collection for `list_all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOp {
    /// `payload` must be row-shaped: it doubles as the optimistic placeholder
    Create { payload: Value },
    Update { id: String, payload: Value },
    Delete { id: String },
}

impl MutationOp {
    pub fn label(&self) -> &'static str {
        match self {
            MutationOp::Create { .. } => "create",
            MutationOp::Update { .. } => "update",
            MutationOp::Delete { .. } => "delete",
        }
    }
}

#[derive(Clone)]
pub struct QueryClient {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn QueryCache>,
    credentials: Arc<dyn CredentialStore>,
    dropdown_limit: u32,
}

impl QueryClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn QueryCache>,
        credentials: Arc<dyn CredentialStore>,
        dropdown_limit: u32,
    ) -> Self {
        Self {
            transport,
            cache,
            credentials,
            dropdown_limit: dropdown_limit.max(1),
        }
    }

    pub fn cache(&self) -> &Arc<dyn QueryCache> {
        &self.cache
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Paginated read; identical params are served from the cache
    pub async fn list<T>(
        &self,
        resource: &Resource,
        params: &ListParams,
    ) -> Result<ListPage<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let key = resource.list_key(params);
        self.cached_read(key, resource, resource.with_scope(params)).await
    }

    /// Unpaginated read for dropdowns, capped at the configured limit
    pub async fn list_all<T>(&self, resource: &Resource) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut params = resource.scope_params();
        params.insert(LIMIT_PARAM.to_string(), self.dropdown_limit.to_string());
        let page: ListPage<T> = self.cached_read(resource.all_key(), resource, params).await?;
        Ok(page.items)
    }

    async fn cached_read<T>(
        &self,
        key: QueryKey,
        resource: &Resource,
        params: ListParams,
    ) -> Result<ListPage<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        if let Some(cached) = self.cache.get(&key) {
            log::debug!("cache hit {}", key);
            return decode_page(cached);
        }

        let generation = self.cache.generation(&key);
        let body = self.transport.get(&resource.path(), &params).await?;
        let envelope: ListEnvelope<Value> = serde_json::from_value(body)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        let total = envelope.total();
        let raw = serde_json::to_value(ListPage {
            items: envelope.data,
            total,
        })
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

        // Validate rows before anything lands in the cache.
        let page = decode_page(raw.clone())?;
        if !self.cache.fill(key.clone(), raw, generation) {
            // Invalidated mid-flight: the body predates the mutation.
            log::debug!("not caching {}, invalidated while loading", key);
        }
        Ok(page)
    }

    /// Run a mutation, keeping every cached list of the resource consistent.
    ///
    /// Create and delete are applied optimistically to cached lists (a
    /// created row only to lists it belongs to on arrival) and
    /// rolled back to the exact snapshot when the request fails. Any success
    /// invalidates the whole resource family.
    pub async fn mutate(&self, resource: &Resource, op: MutationOp) -> Result<Value, ApiError> {
        let family = resource.family();
        let snapshot = self.cache.entries(&family);
        let optimistic = self.apply_optimistic(resource, &snapshot, &op);

        let scope = resource.scope_params();
        let result = match &op {
            MutationOp::Create { payload } => {
                self.transport
                    .send(Method::Post, &resource.path(), &scope, Some(payload))
                    .await
            }
            MutationOp::Update { id, payload } => {
                self.transport
                    .send(Method::Put, &resource.item_path(id), &scope, Some(payload))
                    .await
            }
            MutationOp::Delete { id } => {
                self.transport
                    .send(Method::Delete, &resource.item_path(id), &scope, None)
                    .await
            }
        }
        .and_then(unwrap_mutation_body);

        match result {
            Ok(data) => {
                let dropped = self.cache.invalidate(&family);
                log::debug!(
                    "{} on {} succeeded, invalidated {} cached queries",
                    op.label(),
                    family,
                    dropped
                );
                Ok(data)
            }
            Err(err) => {
                if optimistic {
                    for (key, value) in snapshot {
                        self.cache.set(key, value);
                    }
                }
                log::warn!("{} on {} failed: {}", op.label(), family, err);
                Err(err)
            }
        }
    }

    fn apply_optimistic(
        &self,
        resource: &Resource,
        snapshot: &[(QueryKey, Value)],
        op: &MutationOp,
    ) -> bool {
        let placeholder = match op {
            MutationOp::Create { payload } => Some(placeholder_row(payload)),
            MutationOp::Delete { .. } => None,
            MutationOp::Update { .. } => return false,
        };
        for (key, value) in snapshot {
            let mut page = value.clone();
            let changed = match (op, &placeholder) {
                (MutationOp::Create { .. }, Some(row)) if resource.shows_new_rows(key) => {
                    insert_row(&mut page, row)
                }
                (MutationOp::Delete { id }, _) => remove_row(&mut page, id),
                _ => false,
            };
            if changed {
                self.cache.set(key.clone(), page);
            }
        }
        true
    }
}

fn decode_page<T: DeserializeOwned>(value: Value) -> Result<ListPage<T>, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

fn unwrap_mutation_body(body: Value) -> Result<Value, ApiError> {
    if body.is_null() {
        return Ok(Value::Null);
    }
    let envelope: MutationEnvelope<Value> = serde_json::from_value(body)
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
    match envelope.error.filter(|e| !e.trim().is_empty()) {
        Some(message) => Err(ApiError::Rejected(message)),
        None => Ok(envelope.data.unwrap_or(Value::Null)),
    }
}

/// Synthetic row shown until the server confirms a create
pub(crate) fn placeholder_row(payload: &Value) -> Value {
    let mut row = match payload {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    row.insert(
        "id".to_string(),
        Value::String(format!("{}-{}", OPTIMISTIC_FLAG, uuid::Uuid::new_v4())),
    );
    row.insert(OPTIMISTIC_FLAG.to_string(), Value::Bool(true));
    Value::Object(row)
}

/// Whether a cached row is an unconfirmed optimistic placeholder
pub fn is_optimistic_row(row: &Value) -> bool {
    row.get(OPTIMISTIC_FLAG).and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn insert_row(page: &mut Value, row: &Value) -> bool {
    let Some(obj) = page.as_object_mut() else {
        return false;
    };
    let Some(items) = obj.get_mut("items").and_then(Value::as_array_mut) else {
        return false;
    };
    items.insert(0, row.clone());
    let total = obj.get("total").and_then(Value::as_u64).unwrap_or(0);
    obj.insert("total".to_string(), Value::from(total + 1));
    true
}

pub(crate) fn remove_row(page: &mut Value, id: &str) -> bool {
    let Some(obj) = page.as_object_mut() else {
        return false;
    };
    let Some(items) = obj.get_mut("items").and_then(Value::as_array_mut) else {
        return false;
    };
    let before = items.len();
    items.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
    let removed = (before - items.len()) as u64;
    if removed == 0 {
        return false;
    }
    let total = obj.get("total").and_then(Value::as_u64).unwrap_or(0);
    obj.insert("total".to_string(), Value::from(total.saturating_sub(removed)));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::cache::{CacheEvent, MemoryQueryCache};
    use crate::shared::query::list_state::{ListQueryState, STATUS_PARAM};
    use crate::shared::query::testing::{client_with, MockTransport};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: String,
        name: String,
    }

    fn users() -> Resource {
        Resource::scoped("users", PortalType::Admin)
    }

    fn page_one() -> ListParams {
        ListQueryState::new(2).to_params()
    }

    fn seed(transport: &MockTransport) {
        transport.respond_get(
            "/users",
            json!({
                "data": [{"id": "u1", "name": "Ana"}, {"id": "u2", "name": "Bo"}],
                "pagination": {"page": 1, "limit": 2, "total": 3, "totalPages": 2}
            }),
        );
    }

    #[test]
    fn test_resource_keys() {
        let r = users();
        assert_eq!(r.family(), QueryKey::new(["users", "admin"]));
        assert!(r.list_key(&page_one()).starts_with(&r.family()));
        assert!(r.all_key().starts_with(&r.family()));
        assert_eq!(Resource::new("rfqs").family(), QueryKey::new(["rfqs"]));
        assert_eq!(Resource::new("vendors").item_path("a/b"), "/vendors/a%2Fb");
    }

    #[tokio::test]
    async fn test_identical_params_are_served_from_cache() {
        let (client, transport, _) = client_with(MemoryQueryCache::new());
        seed(&transport);

        let first: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();
        let second: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total, 3);
        assert_eq!(transport.get_count("/users"), 1);

        let query = transport.last_query("/users").unwrap();
        assert_eq!(query.get("portal").map(String::as_str), Some("admin"));
        assert_eq!(query.get("limit").map(String::as_str), Some("2"));
    }

    #[tokio::test]
    async fn test_malformed_rows_are_not_cached() {
        let (client, transport, cache) = client_with(MemoryQueryCache::new());
        transport.respond_get("/users", json!({"data": [{"id": 5}]}));

        let err = client.list::<Row>(&users(), &page_one()).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_create_rolls_back_to_snapshot() {
        let (client, transport, cache) = client_with(MemoryQueryCache::new());
        seed(&transport);
        let before: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();
        let all_before: Vec<Row> = client.list_all(&users()).await.unwrap();

        transport.fail_next_send(ApiError::Http {
            status: 409,
            message: "Email already registered".into(),
        });
        let err = client
            .mutate(
                &users(),
                MutationOp::Create {
                    payload: json!({"name": "Cy"}),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.user_message("x"), "Email already registered");

        let after: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();
        let all_after: Vec<Row> = client.list_all(&users()).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(all_after, all_before);
        assert!(cache
            .entries(&users().family())
            .iter()
            .all(|(_, page)| !page["items"].as_array().unwrap().iter().any(is_optimistic_row)));
    }

    #[tokio::test]
    async fn test_optimistic_rows_are_visible_while_request_runs() {
        let cache = MemoryQueryCache::new();
        let (client, transport, _) = client_with(cache.clone());
        seed(&transport);
        let _: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();

        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reader = cache.clone();
        let key = users().list_key(&page_one());
        cache.subscribe(
            users().family(),
            std::sync::Arc::new(move |k: &QueryKey, _: CacheEvent| {
                if let Some(page) = reader.get(k) {
                    sink.lock().unwrap().push(page["total"].as_u64().unwrap());
                }
            }),
        );
        transport.fail_next_send(ApiError::Transport("offline".into()));
        let _ = client
            .mutate(&users(), MutationOp::Delete { id: "u1".into() })
            .await;

        // optimistic removal first, rollback second
        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
        assert_eq!(cache.get(&key).unwrap()["total"], json!(3));
    }

    #[test]
    fn test_new_rows_belong_to_unfiltered_first_pages() {
        let r = users();
        let state = ListQueryState::new(10);
        assert!(r.shows_new_rows(&r.all_key()));
        assert!(r.shows_new_rows(&r.list_key(&state.to_params())));
        assert!(!r.shows_new_rows(&r.list_key(&state.clone().with_page(2).to_params())));
        assert!(!r.shows_new_rows(&r.list_key(&state.clone().with_search("ana").to_params())));
        assert!(!r.shows_new_rows(&r.list_key(
            &state.with_filter(STATUS_PARAM, Some("locked".into())).to_params()
        )));
        assert!(!r.shows_new_rows(&Resource::new("vendors").all_key()));
    }

    #[tokio::test]
    async fn test_optimistic_create_skips_lists_the_row_does_not_belong_to() {
        let cache = MemoryQueryCache::new();
        let (client, transport, _) = client_with(cache.clone());
        seed(&transport);
        let first = page_one();
        let second = ListQueryState::new(2).with_page(2).to_params();
        let active = ListQueryState::new(2)
            .with_filter(STATUS_PARAM, Some("active".into()))
            .to_params();
        for params in [&first, &second, &active] {
            let _: ListPage<Row> = client.list(&users(), params).await.unwrap();
        }
        let _: Vec<Row> = client.list_all(&users()).await.unwrap();

        let touched = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = touched.clone();
        cache.subscribe(
            users().family(),
            Arc::new(move |k: &QueryKey, event: CacheEvent| {
                if event == CacheEvent::Updated {
                    sink.lock().unwrap().push(k.clone());
                }
            }),
        );
        client
            .mutate(
                &users(),
                MutationOp::Create {
                    payload: json!({"name": "Cy"}),
                },
            )
            .await
            .unwrap();

        let mut touched = touched.lock().unwrap().clone();
        touched.sort();
        let mut expected = vec![users().all_key(), users().list_key(&first)];
        expected.sort();
        assert_eq!(touched, expected);
    }

    #[tokio::test]
    async fn test_success_invalidates_paginated_and_unpaginated_lists() {
        let (client, transport, _) = client_with(MemoryQueryCache::new());
        seed(&transport);
        let _: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();
        let _: Vec<Row> = client.list_all(&users()).await.unwrap();
        assert_eq!(transport.get_count("/users"), 2);

        transport.respond_get(
            "/users",
            json!({
                "data": [{"id": "u2", "name": "Bo"}],
                "pagination": {"page": 1, "limit": 2, "total": 1, "totalPages": 1}
            }),
        );
        client
            .mutate(&users(), MutationOp::Delete { id: "u1".into() })
            .await
            .unwrap();

        let page: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();
        let all: Vec<Row> = client.list_all(&users()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(all.len(), 1);
        assert!(all.iter().all(|r| r.id != "u1"));
        assert_eq!(transport.get_count("/users"), 4);
    }

    #[tokio::test]
    async fn test_read_overlapping_a_delete_is_not_cached() {
        let (client, transport, _) = client_with(MemoryQueryCache::new());
        seed(&transport);
        let gate = transport.hold_next_get();

        let (resource, params) = (users(), page_one());
        let read = client.list::<Row>(&resource, &params);
        let delete = async {
            tokio::task::yield_now().await;
            let result = client
                .mutate(&resource, MutationOp::Delete { id: "u1".into() })
                .await;
            gate.notify_one();
            result
        };
        let (early, deleted) = tokio::join!(read, delete);
        deleted.unwrap();
        assert!(early.unwrap().items.iter().any(|r| r.id == "u1"));

        transport.respond_get(
            "/users",
            json!({
                "data": [{"id": "u2", "name": "Bo"}],
                "pagination": {"page": 1, "limit": 2, "total": 1, "totalPages": 1}
            }),
        );
        let page: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();
        assert!(page.items.iter().all(|r| r.id != "u1"));
        assert_eq!(transport.get_count("/users"), 2);
    }

    #[tokio::test]
    async fn test_update_is_not_optimistic() {
        let cache = MemoryQueryCache::new();
        let (client, transport, _) = client_with(cache.clone());
        seed(&transport);
        let _: ListPage<Row> = client.list(&users(), &page_one()).await.unwrap();
        let before = cache.entries(&users().family());

        transport.fail_next_send(ApiError::Rejected("Role is locked".into()));
        let err = client
            .mutate(
                &users(),
                MutationOp::Update {
                    id: "u1".into(),
                    payload: json!({"roleId": "r2"}),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("Role is locked".into()));
        assert_eq!(cache.entries(&users().family()), before);

        let sent = transport.sent();
        assert_eq!(sent.last().unwrap().0, Method::Put);
        assert_eq!(sent.last().unwrap().1, "/users/u1");
    }

    #[tokio::test]
    async fn test_error_inside_success_body_is_rejected() {
        let (client, transport, _) = client_with(MemoryQueryCache::new());
        transport.respond_send(json!({"error": "Vendor has open RFQs"}));
        let err = client
            .mutate(&Resource::new("vendors"), MutationOp::Delete { id: "v1".into() })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("Vendor has open RFQs".into()));
    }

    #[test]
    fn test_row_helpers() {
        let mut page = json!({"items": [{"id": "a"}, {"id": "b"}], "total": 12});
        assert!(remove_row(&mut page, "a"));
        assert!(!remove_row(&mut page, "zzz"));
        assert_eq!(page["total"], json!(11));

        let row = placeholder_row(&json!({"name": "new"}));
        assert!(is_optimistic_row(&row));
        assert!(insert_row(&mut page, &row));
        assert_eq!(page["items"][0]["name"], json!("new"));
        assert_eq!(page["total"], json!(12));

        assert!(!insert_row(&mut json!([]), &row));
    }
}
