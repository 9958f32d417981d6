//! PageFrame: standard root wrapper for every portal page.
//!
//! Sets `id` (`"{entity}--{category}"`) and `data-page-category` on the
//! root element, plus a page header with title and actions slot.

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`, e.g. `"admin_users--system"`.
    #[prop(into)]
    page_id: String,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    #[prop(into)]
    title: String,
    /// Header buttons, rendered right-aligned.
    #[prop(optional)]
    actions: Option<ChildrenFn>,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_CUSTOM => "page page--custom",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            <div class="page__header">
                <h1 class="page__title">{title}</h1>
                <div class="page__actions">{actions.map(|a| a())}</div>
            </div>
            <div class="page__content">{children()}</div>
        </div>
    }
}
