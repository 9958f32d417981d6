//! Reactive bindings of the query layer for Leptos components.

use contracts::enums::PortalType;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::cache::{CacheEvent, QueryKey};
use super::client::{ListPage, MutationOp, QueryClient, Resource};
use super::error::ApiError;
use super::list_state::{ListParams, ListQueryState, ListStateSpec};
use super::roles::{resolve_role, Capabilities};
use super::tracker::RequestTracker;
use crate::layout::toast_service::{use_toasts, ToastKind, ToastService};
use crate::shared::config::AppConfig;

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().expect("QueryClient not found in context")
}

pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig not found in context")
}

/// Reactive state of one list query
pub struct ListQuery<T: Send + Sync + 'static> {
    pub data: Signal<ListPage<T>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
    /// True once `data` answers the latest request
    pub loaded: Signal<bool>,
}

impl<T: Send + Sync + 'static> Clone for ListQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListQuery<T> {}

/// Paginated query, re-run whenever `params` changes or the cache
/// reports that the shown entry changed.
pub fn use_list_query<T>(resource: Resource, params: Signal<ListParams>) -> ListQuery<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    use_cached_query(resource, Signal::derive(move || Some(params.get())))
}

/// Unpaginated query for dropdowns
pub fn use_all_query<T>(resource: Resource) -> ListQuery<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    use_cached_query(resource, Signal::stored(None))
}

fn use_cached_query<T>(resource: Resource, params: Signal<Option<ListParams>>) -> ListQuery<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let client = use_query_client();
    let data = RwSignal::new(ListPage::<T>::default());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<ApiError>);
    let loaded = RwSignal::new(false);
    let tracker = StoredValue::new(RequestTracker::default());
    let revision = RwSignal::new(0u64);

    let subscription = client.cache().subscribe(
        resource.family(),
        Arc::new(move |key: &QueryKey, event: CacheEvent| {
            let refresh = tracker
                .try_with_value(|t| t.should_refresh(key, event))
                .unwrap_or(false);
            if refresh {
                revision.try_update(|r| *r += 1);
            }
        }),
    );
    let cache = Arc::clone(client.cache());
    on_cleanup(move || cache.unsubscribe(subscription));

    Effect::new(move |_| {
        let params = params.get();
        revision.track();

        let key = match &params {
            Some(p) => resource.list_key(p),
            None => resource.all_key(),
        };
        let ticket = tracker
            .try_update_value(|t| t.begin(key.clone()))
            .unwrap_or_default();
        loading.set(true);
        loaded.set(false);

        let client = client.clone();
        spawn_local(async move {
            let result = match &params {
                Some(p) => client.list::<T>(&resource, p).await,
                None => client.list_all::<T>(&resource).await.map(|items| ListPage {
                    total: items.len() as u64,
                    items,
                }),
            };
            let current = tracker.try_update_value(|t| t.complete(ticket)).unwrap_or(false);
            if !current {
                log::debug!("dropping stale response for {}", key);
                return;
            }
            match result {
                Ok(page) => {
                    data.try_set(page);
                    error.try_set(None);
                    loaded.try_set(true);
                }
                Err(err) => {
                    log::error!("list query {} failed: {}", key, err);
                    error.try_set(Some(err));
                }
            }
            loading.try_set(false);
        });
    });

    ListQuery {
        data: data.into(),
        loading: loading.into(),
        error: error.into(),
        loaded: loaded.into(),
    }
}

/// Toast texts for a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationMessages {
    pub success: &'static str,
    /// Shown when the server gives no message of its own
    pub failure: &'static str,
}

/// Toast kind and text for a settled mutation
pub fn outcome_toast(result: &Result<Value, ApiError>, messages: MutationMessages) -> (ToastKind, String) {
    match result {
        Ok(_) => (ToastKind::Success, messages.success.to_string()),
        Err(err) => (ToastKind::Error, err.user_message(messages.failure)),
    }
}

/// Mutation runner bound to one resource
#[derive(Clone, Copy)]
pub struct MutationHandle {
    resource: Resource,
    client: StoredValue<QueryClient>,
    toasts: ToastService,
    pending: RwSignal<bool>,
}

impl MutationHandle {
    /// True while a request of this handle is in flight
    pub fn pending(&self) -> Signal<bool> {
        self.pending.into()
    }

    /// Run `op` unless it already failed validation.
    ///
    /// Outcomes are reported as toasts; `on_success` runs after the
    /// resource cache was invalidated.
    pub fn submit<F>(&self, op: Result<MutationOp, ApiError>, messages: MutationMessages, on_success: F)
    where
        F: FnOnce(Value) + 'static,
    {
        let op = match op {
            Ok(op) => op,
            Err(err) => {
                self.toasts.error(err.user_message(messages.failure));
                return;
            }
        };
        if self.pending.get_untracked() {
            log::debug!("{} ignored, mutation on {} already pending", op.label(), self.resource.name());
            return;
        }

        let Some(client) = self.client.try_get_value() else {
            return;
        };
        let handle = *self;
        handle.pending.set(true);
        spawn_local(async move {
            let result = client.mutate(&handle.resource, op).await;
            handle.pending.try_set(false);
            let (kind, text) = outcome_toast(&result, messages);
            match kind {
                ToastKind::Success => handle.toasts.success(text),
                ToastKind::Error => handle.toasts.error(text),
            }
            if let Ok(value) = result {
                on_success(value);
            }
        });
    }
}

pub fn use_mutation(resource: Resource) -> MutationHandle {
    MutationHandle {
        resource,
        client: StoredValue::new(use_query_client()),
        toasts: use_toasts(),
        pending: RwSignal::new(false),
    }
}

/// List state mirrored into the URL query string
#[derive(Clone, Copy)]
pub struct UrlListState {
    state: Memo<ListQueryState>,
    pathname: Memo<String>,
    navigate: StoredValue<Arc<dyn Fn(&str, NavigateOptions)>, LocalStorage>,
}

impl UrlListState {
    pub fn state(&self) -> Memo<ListQueryState> {
        self.state
    }

    /// Request params derived from the URL
    pub fn params(&self) -> Signal<ListParams> {
        let state = self.state;
        Memo::new(move |_| state.get().to_params()).into()
    }

    /// Push a new history entry so back/forward restore the view
    pub fn set(&self, next: ListQueryState) {
        let url = format!("{}?{}", self.pathname.get_untracked(), next.to_query_string());
        self.navigate.with_value(|navigate| navigate(&url, NavigateOptions::default()));
    }

    pub fn update(&self, f: impl FnOnce(ListQueryState) -> ListQueryState) {
        self.set(f(self.state.get_untracked()));
    }

    /// Rewrite the current history entry, for corrections the user did not ask for
    pub fn replace(&self, next: ListQueryState) {
        let url = format!("{}?{}", self.pathname.get_untracked(), next.to_query_string());
        let options = NavigateOptions {
            replace: true,
            ..NavigateOptions::default()
        };
        self.navigate.with_value(|navigate| navigate(&url, options));
    }
}

pub fn use_url_list_state(spec: ListStateSpec) -> UrlListState {
    let location = use_location();
    let search = location.search;
    let state = Memo::new(move |_| ListQueryState::from_query_string(&search.get(), &spec));
    let navigate = use_navigate();
    let navigate: Arc<dyn Fn(&str, NavigateOptions)> = Arc::new(navigate);
    UrlListState {
        state,
        pathname: location.pathname,
        navigate: StoredValue::new_local(navigate),
    }
}

/// Capabilities of the signed-in user on `resource` within `portal`.
///
/// Without a session role the UI leaves enforcement to the backend and
/// enables every action. A role that cannot be resolved enables nothing.
pub fn use_capabilities(portal: Signal<PortalType>, resource: &'static str) -> Signal<Capabilities> {
    let client = use_query_client();
    let capabilities = RwSignal::new(Capabilities::none());

    Effect::new(move |_| {
        let portal = portal.get();
        let client = client.clone();
        spawn_local(async move {
            let resolved = match client.credentials().session_role() {
                None => Capabilities::all(),
                Some(role_ref) => match resolve_role(&client, &role_ref, portal).await {
                    Some(role) => Capabilities::for_resource(&role.permission_set(), resource),
                    None => Capabilities::none(),
                },
            };
            capabilities.try_set(resolved);
        });
    });

    capabilities.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: MutationMessages = MutationMessages {
        success: "Role assigned",
        failure: "Could not assign role",
    };

    #[test]
    fn test_outcome_toast_prefers_server_message() {
        let rejected = Err(ApiError::Rejected("User is locked".into()));
        assert_eq!(outcome_toast(&rejected, MESSAGES), (ToastKind::Error, "User is locked".into()));

        let offline = Err(ApiError::Transport("fetch failed".into()));
        assert_eq!(
            outcome_toast(&offline, MESSAGES),
            (ToastKind::Error, "Could not assign role".into())
        );

        assert_eq!(
            outcome_toast(&Ok(Value::Null), MESSAGES),
            (ToastKind::Success, "Role assigned".into())
        );
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let invalid = Err(ApiError::Validation("Select a user and a role".into()));
        assert_eq!(outcome_toast(&invalid, MESSAGES).1, "Select a user and a role");
    }
}
