use leptos::prelude::*;

/// Option value meaning "no filter"
pub const ALL_STATUSES: &str = "";

/// Status dropdown for list pages; `None` clears the filter
#[component]
pub fn StatusFilter(
    #[prop(into)] value: Signal<Option<String>>,
    /// Wire codes; labels are derived from them
    options: Vec<&'static str>,
    on_change: Callback<Option<String>>,
    #[prop(optional)] label: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="status-filter">
            <span class="status-filter__label">{label.unwrap_or("Status")}</span>
            <select
                class="status-filter__select"
                prop:value=move || value.get().unwrap_or_default()
                on:change=move |ev| {
                    let selected = event_target_value(&ev);
                    on_change.run((selected != ALL_STATUSES).then_some(selected));
                }
            >
                <option value=ALL_STATUSES>"All"</option>
                {options
                    .into_iter()
                    .map(|code| view! { <option value=code>{status_label(code)}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Title-case label for a wire status code
pub fn status_label(code: &str) -> String {
    let mut chars = code.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}
