use crate::shared::query::error::ApiError;
use leptos::prelude::*;
use thaw::*;

/// Spinner while loading, red banner on failure
#[component]
pub fn ListStatus(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<ApiError>>,
) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="list-status list-status--loading">
                <Spinner size=SpinnerSize::Small label="Loading..." />
            </div>
        </Show>
        {move || {
            error
                .get()
                .map(|err| {
                    view! {
                        <div class="list-status list-status--error" role="alert">
                            {err.user_message("Could not load the list")}
                        </div>
                    }
                })
        }}
    }
}

/// Small colored pill for a status code
#[component]
pub fn StatusBadge(#[prop(into)] code: String) -> impl IntoView {
    let color = match code.as_str() {
        "active" | "approved" | "open" | "quoted" => BadgeColor::Success,
        "pending" | "invited" | "draft" => BadgeColor::Warning,
        "suspended" | "rejected" | "inactive" => BadgeColor::Danger,
        _ => BadgeColor::Informative,
    };
    let label = super::status_filter::status_label(&code);
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {label}
        </Badge>
    }
}
