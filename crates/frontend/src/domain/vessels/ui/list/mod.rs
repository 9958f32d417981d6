use contracts::domain::vessel::{Vessel, VesselStatus};
use contracts::enums::PortalType;
use leptos::prelude::*;

use super::super::VESSELS;
use crate::shared::components::data_table::Column;
use crate::shared::components::list_status::StatusBadge;
use crate::shared::components::remote_list::RemoteListView;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};
use crate::shared::query::hooks::MutationMessages;

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "—".into())
}

#[component]
pub fn VesselsPage(portal: PortalType) -> impl IntoView {
    let columns = vec![
        Column::text("name", "Vessel", |v: &Vessel| v.name.clone()),
        Column::text("imo", "IMO", |v: &Vessel| or_dash(&v.imo_number)),
        Column::text("type", "Type", |v: &Vessel| or_dash(&v.vessel_type)),
        Column::text("flag", "Flag", |v: &Vessel| or_dash(&v.flag)),
        Column::new("status", "Status", |v: &Vessel| {
            view! { <StatusBadge code=v.status.code() /> }.into_any()
        }),
    ];
    let statuses: Vec<&'static str> = VesselStatus::all().iter().map(VesselStatus::code).collect();

    view! {
        <PageFrame
            page_id=page_id(&format!("{}_vessels", portal.code()), PAGE_CAT_LIST)
            category=PAGE_CAT_LIST
            title="Fleet"
        >
            <RemoteListView
                resource=VESSELS
                portal=portal
                permission="vessels"
                columns=columns
                status_options=statuses
                delete_messages=MutationMessages {
                    success: "Vessel removed",
                    failure: "Could not remove the vessel",
                }
                empty_message="No vessels registered"
            />
        </PageFrame>
    }
}
