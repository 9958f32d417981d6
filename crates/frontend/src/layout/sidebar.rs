//! Per-portal navigation

use contracts::enums::PortalType;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::routes::sections::{section_path, sections_for};
use crate::shared::icons::icon;

#[component]
pub fn Sidebar(portal: PortalType) -> impl IntoView {
    let location = use_location();

    let items = sections_for(portal)
        .iter()
        .map(|section| {
            let path = section_path(portal, *section);
            let active_path = path.clone();
            let is_active = move || location.pathname.get() == active_path;
            view! {
                <A href=path attr:class=move || {
                    if is_active() { "sidebar__item sidebar__item--active" } else { "sidebar__item" }
                }>
                    <span class="sidebar__icon">{icon(section.icon())}</span>
                    <span class="sidebar__label">{section.label()}</span>
                </A>
            }
        })
        .collect_view();

    view! {
        <nav class="sidebar">
            <div class="sidebar__portal">{format!("{} portal", portal.display_name())}</div>
            {items}
        </nav>
    }
}
