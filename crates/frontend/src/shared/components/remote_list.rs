//! Page body shared by every list page: URL-mirrored state, the remote
//! list query, search and status toolbar, table and pagination.

use contracts::enums::PortalType;
use contracts::shared::pagination::PageDescriptor;
use leptos::prelude::*;
use serde::de::DeserializeOwned;

use super::data_table::{Column, DataTable};
use super::list_status::ListStatus;
use super::pagination::Pagination;
use super::status_filter::StatusFilter;
use crate::shared::list_utils::SearchInput;
use crate::shared::query::hooks::{
    use_app_config, use_capabilities, use_list_query, use_mutation, use_url_list_state,
    MutationMessages,
};
use crate::shared::query::list_state::{ListStateSpec, STATUS_PARAM};
use crate::shared::query::{MutationOp, Resource};

/// Rows that can be addressed by id in item routes
pub trait Identified {
    fn id(&self) -> &str;
}

/// Filter keys read back from the URL by list pages
pub const STATUS_FILTER_KEYS: &[&str] = &[STATUS_PARAM];

#[component]
pub fn RemoteListView<T>(
    resource: Resource,
    portal: PortalType,
    /// Resource name checked against the session role's permissions
    permission: &'static str,
    columns: Vec<Column<T>>,
    /// Empty disables the status filter
    #[prop(optional)]
    status_options: Vec<&'static str>,
    #[prop(default = true)] searchable: bool,
    /// Enables the optimistic delete action
    #[prop(optional)]
    delete_messages: Option<MutationMessages>,
    #[prop(optional_no_strip)] on_edit: Option<Callback<T>>,
    #[prop(optional_no_strip)] on_row_click: Option<Callback<T>>,
    #[prop(optional)] empty_message: Option<&'static str>,
) -> impl IntoView
where
    T: Identified + DeserializeOwned + Clone + Send + Sync + 'static,
{
    let config = use_app_config();
    let lists = config.lists.clone();
    let url_state = use_url_list_state(ListStateSpec {
        default_page_size: lists.default_page_size,
        filter_keys: STATUS_FILTER_KEYS,
    });
    let state = url_state.state();
    let query = use_list_query::<T>(resource, url_state.params());
    let capabilities = use_capabilities(Signal::stored(portal), permission);
    let mutation = use_mutation(resource);

    let on_delete = delete_messages.map(|messages| {
        Callback::new(move |row: T| {
            let op = MutationOp::Delete {
                id: row.id().to_string(),
            };
            mutation.submit(Ok(op), messages, |_| {});
        })
    });

    // A page past the end (stale bookmark, last row deleted) moves to the last page.
    Effect::new(move |_| {
        if !query.loaded.get() {
            return;
        }
        let total = query.data.with(|d| d.total);
        let current = state.get_untracked();
        if let Some(last) = current.page_past_end(total) {
            log::debug!("page {} is past the end, showing page {}", current.page, last);
            url_state.replace(current.with_page(last));
        }
    });

    let page = Signal::derive(move || {
        let s = state.get();
        PageDescriptor::new(s.page, s.page_size, query.data.with(|d| d.total))
    });
    let rows = Signal::derive(move || query.data.with(|d| d.items.clone()));
    let can_edit = Signal::derive(move || capabilities.get().can_edit);
    let can_delete = Signal::derive(move || capabilities.get().can_delete && !mutation.pending().get());

    let has_status = !status_options.is_empty();

    view! {
        <div class="list-toolbar">
            {searchable.then(|| view! {
                <SearchInput
                    value=Signal::derive(move || state.get().search)
                    on_change=Callback::new(move |text: String| url_state.update(|s| s.with_search(text)))
                    delay_ms=lists.search_debounce_ms
                />
            })}
            {has_status.then(|| view! {
                <StatusFilter
                    value=Signal::derive(move || state.get().filter(STATUS_PARAM).map(str::to_string))
                    options=status_options
                    on_change=Callback::new(move |status: Option<String>| {
                        url_state.update(|s| s.with_filter(STATUS_PARAM, status))
                    })
                />
            })}
        </div>
        <ListStatus loading=query.loading error=query.error />
        <DataTable
            columns=columns
            rows=rows
            on_row_click=on_row_click
            on_edit=on_edit
            on_delete=on_delete
            can_edit=can_edit
            can_delete=can_delete
            empty_message=empty_message.unwrap_or("No records found").to_string()
        />
        <Pagination
            page=page
            on_page_change=Callback::new(move |p: u32| url_state.update(|s| s.with_page(p)))
            on_page_size_change=Callback::new(move |size: u32| url_state.update(|s| s.with_page_size(size)))
            page_size_options=lists.page_size_options.clone()
            window=lists.page_window
        />
    }
}
