mod state;

use contracts::enums::PortalType;
use contracts::system::roles::Role;
use contracts::system::users::User;
use leptos::prelude::*;
use thaw::*;

use super::super::users_resource;
use crate::shared::components::data_table::Column;
use crate::shared::components::list_status::StatusBadge;
use crate::shared::components::remote_list::RemoteListView;
use crate::shared::date_utils::format_timestamp_date;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_SYSTEM};
use crate::shared::query::hooks::{use_all_query, use_capabilities, use_mutation, MutationMessages};
use crate::shared::query::roles::{match_role, role_display_name, role_options, roles_resource};
use state::{status_options, user_option_label, AssignmentForm};

const ASSIGN_MESSAGES: MutationMessages = MutationMessages {
    success: "Role assigned",
    failure: "Could not assign the role",
};

const DELETE_MESSAGES: MutationMessages = MutationMessages {
    success: "User removed",
    failure: "Could not remove the user",
};

/// Users of one portal and their role assignment
#[component]
pub fn UsersPage(portal: PortalType) -> impl IntoView {
    let resource = users_resource(portal);
    let all_users = use_all_query::<User>(resource);
    let roles = use_all_query::<Role>(roles_resource(portal));
    let capabilities = use_capabilities(Signal::stored(portal), "users");
    let assign = use_mutation(resource);
    let form = RwSignal::new(AssignmentForm::default());

    let role_name = move |user: &User| {
        let role_ref = user.role_ref();
        move || {
            let resolved = role_ref
                .as_ref()
                .and_then(|r| roles.data.with(|page| match_role(&page.items, r)));
            role_display_name(resolved.as_ref())
        }
    };

    let columns = vec![
        Column::text("name", "Name", User::display_name),
        Column::text("email", "Email", |u: &User| u.email.clone()),
        Column::new("role", "Role", move |u: &User| {
            let name = role_name(u);
            view! { <span>{name}</span> }.into_any()
        }),
        Column::new("status", "Status", |u: &User| {
            view! { <StatusBadge code=u.status.code() /> }.into_any()
        }),
        Column::text("created", "Created", |u: &User| format_timestamp_date(u.created_at.as_ref())),
    ];

    let pick_user = Callback::new(move |user: User| {
        form.set(roles.data.with_untracked(|page| AssignmentForm::for_user(&user, &page.items)))
    });

    let submit = move |_| {
        let op = form.get_untracked().to_mutation(portal);
        assign.submit(op, ASSIGN_MESSAGES, move |_| form.set(AssignmentForm::default()));
    };
    let submit_disabled =
        Signal::derive(move || assign.pending().get() || !capabilities.get().can_edit);

    view! {
        <PageFrame
            page_id=page_id(&format!("{}_users", portal.code()), PAGE_CAT_SYSTEM)
            category=PAGE_CAT_SYSTEM
            title=format!("{} users", portal.display_name())
        >
            <div class="assign-role">
                <label class="assign-role__field">
                    <span>"User"</span>
                    <select
                        prop:value=move || form.get().user_id
                        on:change=move |ev| {
                            let user_id = event_target_value(&ev);
                            form.update(|f| f.user_id = user_id);
                        }
                    >
                        <option value="">"Select a user"</option>
                        {move || {
                            all_users
                                .data
                                .get()
                                .items
                                .iter()
                                .map(|u| view! { <option value=u.id.clone()>{user_option_label(u)}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <label class="assign-role__field">
                    <span>"Role"</span>
                    <select
                        prop:value=move || form.get().role_id
                        on:change=move |ev| {
                            let role_id = event_target_value(&ev);
                            form.update(|f| f.role_id = role_id);
                        }
                    >
                        <option value="">"Select a role"</option>
                        {move || {
                            role_options(&roles.data.get().items)
                                .into_iter()
                                .map(|o| view! { <option value=o.id>{o.label}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <Button appearance=ButtonAppearance::Primary disabled=submit_disabled on_click=submit>
                    {move || if assign.pending().get() { "Assigning..." } else { "Assign role" }}
                </Button>
            </div>
            <RemoteListView
                resource=resource
                portal=portal
                permission="users"
                columns=columns
                status_options=status_options()
                delete_messages=DELETE_MESSAGES
                on_edit=Some(pick_user)
                on_row_click=Some(pick_user)
                empty_message="No users found"
            />
        </PageFrame>
    }
}
