pub mod sidebar;
pub mod toast_service;

use contracts::enums::PortalType;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use sidebar::Sidebar;
use toast_service::ToastHost;

use crate::system::auth::storage::clear_tokens;

/// Application shell of a portal.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |           Content            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(portal: PortalType, children: Children) -> impl IntoView {
    let navigate = use_navigate();
    let sign_out = move |_| {
        clear_tokens();
        log::info!("signed out of the {} portal", portal);
        navigate("/", Default::default());
    };

    view! {
        <div class="app-layout">
            <header class="top-header">
                <span class="top-header__brand">"Marine Parts Exchange"</span>
                <A href="/" attr:class="top-header__switch">"Switch portal"</A>
                <button class="top-header__sign-out" on:click=sign_out>"Sign out"</button>
            </header>
            <div class="app-body">
                <Sidebar portal=portal />
                <main class="app-main">{children()}</main>
            </div>
            <ToastHost />
        </div>
    }
}
