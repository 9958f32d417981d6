use contracts::domain::rfq::{Rfq, RfqStatus};
use contracts::enums::PortalType;
use leptos::prelude::*;

use super::super::RFQS;
use crate::shared::components::data_table::Column;
use crate::shared::components::list_status::StatusBadge;
use crate::shared::components::remote_list::RemoteListView;
use crate::shared::date_utils::{format_date, format_timestamp_date};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

/// Read-only RFQ browser, available in every portal
#[component]
pub fn RfqsPage(portal: PortalType) -> impl IntoView {
    let columns = vec![
        Column::text("number", "RFQ #", |r: &Rfq| r.rfq_number.clone()),
        Column::text("title", "Title", |r: &Rfq| r.title.clone()),
        Column::text("vessel", "Vessel", |r: &Rfq| r.vessel_name.clone().unwrap_or_else(|| "—".into())),
        Column::new("status", "Status", |r: &Rfq| {
            view! { <StatusBadge code=r.status.code() /> }.into_any()
        }),
        Column::text("due", "Due", |r: &Rfq| format_date(r.due_date.as_ref())),
        Column::text("created", "Created", |r: &Rfq| format_timestamp_date(r.created_at.as_ref())),
    ];
    let statuses: Vec<&'static str> = RfqStatus::all().iter().map(RfqStatus::code).collect();

    view! {
        <PageFrame
            page_id=page_id(&format!("{}_rfqs", portal.code()), PAGE_CAT_LIST)
            category=PAGE_CAT_LIST
            title="Requests for quote"
        >
            <RemoteListView
                resource=RFQS
                portal=portal
                permission="rfqs"
                columns=columns
                status_options=statuses
                empty_message="No RFQs match the filters"
            />
        </PageFrame>
    }
}
