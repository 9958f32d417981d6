use contracts::enums::PortalType;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::hooks::use_params_map;
use leptos_router::path;

use super::sections::{home_path, resolve, Section};
use crate::domain::onboarding::ui::list::OnboardingPage;
use crate::domain::organizations::ui::list::OrganizationsPage;
use crate::domain::rfqs::ui::list::RfqsPage;
use crate::domain::vendors::ui::list::VendorsPage;
use crate::domain::vessels::ui::list::VesselsPage;
use crate::layout::Shell;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_CUSTOM;
use crate::system::users::ui::list::UsersPage;

#[component]
fn PortalChooser() -> impl IntoView {
    view! {
        <PageFrame page_id="portals--custom" category=PAGE_CAT_CUSTOM title="Choose a portal">
            <div class="portal-chooser">
                {PortalType::all()
                    .into_iter()
                    .map(|portal| view! {
                        <A href=home_path(portal) attr:class="portal-chooser__card">
                            {portal.display_name()}
                        </A>
                    })
                    .collect_view()}
            </div>
        </PageFrame>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <PageFrame page_id="not_found--custom" category=PAGE_CAT_CUSTOM title="Page not found">
            <A href="/">"Back to the portal list"</A>
        </PageFrame>
    }
}

fn section_view(portal: PortalType, section: Section) -> AnyView {
    match section {
        Section::Users => view! { <UsersPage portal=portal /> }.into_any(),
        Section::Organizations => view! { <OrganizationsPage portal=portal /> }.into_any(),
        Section::Vendors => view! { <VendorsPage portal=portal /> }.into_any(),
        Section::Onboarding => view! { <OnboardingPage portal=portal /> }.into_any(),
        Section::Vessels => view! { <VesselsPage portal=portal /> }.into_any(),
        Section::Rfqs => view! { <RfqsPage portal=portal /> }.into_any(),
    }
}

#[component]
fn PortalPage() -> impl IntoView {
    let params = use_params_map();
    let target = Memo::new(move |_| {
        params.with(|p| {
            let portal = p.get("portal").unwrap_or_default();
            let section = p.get("section").unwrap_or_default();
            resolve(&portal, &section)
        })
    });

    // Remount on every portal/section change so each page starts with fresh hooks.
    move || match target.get() {
        Some((portal, section)) => view! {
            <Shell portal=portal>{section_view(portal, section)}</Shell>
        }
        .into_any(),
        None => view! { <NotFound /> }.into_any(),
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=PortalChooser />
                <Route path=path!("/:portal/:section") view=PortalPage />
            </Routes>
        </Router>
    }
}
