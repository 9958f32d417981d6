use contracts::domain::organization::{Organization, OrganizationStatus};
use contracts::enums::PortalType;
use leptos::prelude::*;

use super::super::ORGANIZATIONS;
use crate::shared::components::data_table::Column;
use crate::shared::components::list_status::StatusBadge;
use crate::shared::components::remote_list::RemoteListView;
use crate::shared::date_utils::format_timestamp_date;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};
use crate::shared::query::hooks::MutationMessages;

#[component]
pub fn OrganizationsPage(portal: PortalType) -> impl IntoView {
    let columns = vec![
        Column::text("name", "Name", |o: &Organization| o.name.clone()),
        Column::text("type", "Type", |o: &Organization| o.org_type.display_name().to_string()),
        Column::text("country", "Country", |o: &Organization| {
            o.country.clone().unwrap_or_else(|| "—".into())
        }),
        Column::new("status", "Status", |o: &Organization| {
            view! { <StatusBadge code=o.status.code() /> }.into_any()
        }),
        Column::text("created", "Created", |o: &Organization| {
            format_timestamp_date(o.created_at.as_ref())
        }),
    ];

    view! {
        <PageFrame
            page_id=page_id(&format!("{}_organizations", portal.code()), PAGE_CAT_LIST)
            category=PAGE_CAT_LIST
            title="Organizations"
        >
            <RemoteListView
                resource=ORGANIZATIONS
                portal=portal
                permission="organizations"
                columns=columns
                status_options=OrganizationStatus::all().iter().map(OrganizationStatus::code).collect()
                delete_messages=MutationMessages {
                    success: "Organization deleted",
                    failure: "Could not delete the organization",
                }
                empty_message="No organizations found"
            />
        </PageFrame>
    }
}
