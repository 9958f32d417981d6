use contracts::domain::onboarding::{OnboardingDecisionDto, OnboardingRequest, OnboardingStatus};
use contracts::enums::PortalType;
use leptos::prelude::*;
use thaw::*;

use super::super::ONBOARDING;
use crate::shared::components::data_table::Column;
use crate::shared::components::list_status::StatusBadge;
use crate::shared::components::remote_list::RemoteListView;
use crate::shared::date_utils::format_datetime;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};
use crate::shared::query::hooks::{use_capabilities, use_mutation, MutationMessages};
use crate::shared::query::{ApiError, MutationOp};

/// Approve or reject a pending request
pub fn decision_op(request: &OnboardingRequest, decision: OnboardingStatus) -> Result<MutationOp, ApiError> {
    if request.status != OnboardingStatus::Pending {
        return Err(ApiError::Validation(format!(
            "{} was already {}",
            request.company_name,
            request.status.code()
        )));
    }
    if decision == OnboardingStatus::Pending {
        return Err(ApiError::Validation("Choose approve or reject".into()));
    }
    let payload = serde_json::to_value(OnboardingDecisionDto {
        status: decision,
        note: None,
    })
    .map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(MutationOp::Update {
        id: request.id.clone(),
        payload,
    })
}

fn messages(decision: OnboardingStatus) -> MutationMessages {
    match decision {
        OnboardingStatus::Approved => MutationMessages {
            success: "Request approved",
            failure: "Could not approve the request",
        },
        _ => MutationMessages {
            success: "Request rejected",
            failure: "Could not reject the request",
        },
    }
}

#[component]
pub fn OnboardingPage(portal: PortalType) -> impl IntoView {
    let decide = use_mutation(ONBOARDING);
    let capabilities = use_capabilities(Signal::stored(portal), "onboarding");
    let locked = Signal::derive(move || decide.pending().get() || !capabilities.get().can_edit);

    let decision_cell = move |request: &OnboardingRequest| {
        if request.status != OnboardingStatus::Pending {
            return view! { <span class="text-muted">"—"</span> }.into_any();
        }
        let approve_req = request.clone();
        let reject_req = request.clone();
        view! {
            <div class="onboarding__decision">
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Primary
                    disabled=locked
                    on_click=move |_| {
                        let decision = OnboardingStatus::Approved;
                        decide.submit(decision_op(&approve_req, decision), messages(decision), |_| {});
                    }
                >
                    "Approve"
                </Button>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    disabled=locked
                    on_click=move |_| {
                        let decision = OnboardingStatus::Rejected;
                        decide.submit(decision_op(&reject_req, decision), messages(decision), |_| {});
                    }
                >
                    "Reject"
                </Button>
            </div>
        }
        .into_any()
    };

    let columns = vec![
        Column::text("company", "Company", |r: &OnboardingRequest| r.company_name.clone()),
        Column::text("email", "Contact", |r: &OnboardingRequest| r.contact_email.clone()),
        Column::text("portal", "Portal", |r: &OnboardingRequest| r.portal_type.display_name().to_string()),
        Column::new("status", "Status", |r: &OnboardingRequest| {
            view! { <StatusBadge code=r.status.code() /> }.into_any()
        }),
        Column::text("submitted", "Submitted", |r: &OnboardingRequest| format_datetime(r.submitted_at.as_ref())),
        Column::new("decision", "Decision", decision_cell),
    ];
    let statuses: Vec<&'static str> = OnboardingStatus::all().iter().map(OnboardingStatus::code).collect();

    view! {
        <PageFrame
            page_id=page_id(&format!("{}_onboarding", portal.code()), PAGE_CAT_LIST)
            category=PAGE_CAT_LIST
            title="Onboarding requests"
        >
            <RemoteListView
                resource=ONBOARDING
                portal=portal
                permission="onboarding"
                columns=columns
                status_options=statuses
                searchable=false
                empty_message="No onboarding requests"
            />
        </PageFrame>
    }
}
