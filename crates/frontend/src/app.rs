use leptos::prelude::*;
use std::sync::Arc;

use crate::layout::toast_service::ToastService;
use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::api_base;
use crate::shared::config::{load_config, AppConfig};
use crate::shared::query::cache::MemoryQueryCache;
use crate::shared::query::transport::HttpTransport;
use crate::shared::query::QueryClient;
use crate::system::auth::storage::{CredentialStore, LocalStorageCredentials};

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("{}; falling back to defaults", e);
        AppConfig::default()
    });

    let credentials: Arc<dyn CredentialStore> = Arc::new(LocalStorageCredentials);
    let transport = HttpTransport::new(api_base(&config.api), Arc::clone(&credentials));
    let client = QueryClient::new(
        Arc::new(transport),
        Arc::new(MemoryQueryCache::new()),
        credentials,
        config.lists.dropdown_limit,
    );

    provide_context(config);
    provide_context(client);
    provide_context(ToastService::new());

    view! { <AppRoutes /> }
}
