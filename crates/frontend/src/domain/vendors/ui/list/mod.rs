use contracts::domain::vendor::{Vendor, VendorStatus};
use contracts::enums::PortalType;
use leptos::prelude::*;

use super::super::VENDORS;
use crate::shared::components::data_table::Column;
use crate::shared::components::list_status::StatusBadge;
use crate::shared::components::remote_list::RemoteListView;
use crate::shared::date_utils::format_timestamp_date;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};
use crate::shared::query::hooks::MutationMessages;

#[component]
pub fn VendorsPage(portal: PortalType) -> impl IntoView {
    let columns = vec![
        Column::text("name", "Vendor", |v: &Vendor| v.name.clone()),
        Column::text("email", "Email", |v: &Vendor| v.email.clone().unwrap_or_default()),
        Column::text("country", "Country", |v: &Vendor| v.country.clone().unwrap_or_default()),
        Column::new("status", "Status", |v: &Vendor| {
            view! { <StatusBadge code=v.status.code() /> }.into_any()
        }),
        Column::text("created", "Joined", |v: &Vendor| format_timestamp_date(v.created_at.as_ref())),
    ];
    let statuses: Vec<&'static str> = VendorStatus::all().iter().map(VendorStatus::code).collect();

    view! {
        <PageFrame
            page_id=page_id(&format!("{}_vendors", portal.code()), PAGE_CAT_LIST)
            category=PAGE_CAT_LIST
            title="Vendors"
        >
            <RemoteListView
                resource=VENDORS
                portal=portal
                permission="vendors"
                columns=columns
                status_options=statuses
                delete_messages=MutationMessages {
                    success: "Vendor removed",
                    failure: "Could not remove the vendor",
                }
                empty_message="No vendors found"
            />
        </PageFrame>
    }
}
