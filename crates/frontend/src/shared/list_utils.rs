/// List page helpers: debounced search input
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Generation counter for trailing-edge debounce.
///
/// Every keystroke arms a new ticket; when its delay elapses only the
/// ticket that is still current may fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceGate {
    generation: u64,
}

impl DebounceGate {
    pub fn arm(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }

    /// Drop any pending ticket
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Search box whose `on_change` fires `delay_ms` after the last keystroke.
///
/// Clearing with the button fires immediately.
#[component]
pub fn SearchInput(
    /// Applied search term, used to seed the box (e.g. restored from the URL)
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
    #[prop(default = 600)]
    delay_ms: u32,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let gate = StoredValue::new(DebounceGate::default());

    // Follow external resets (navigation, back button).
    Effect::new(move |_| {
        let applied = value.get();
        if input_value.get_untracked().trim() != applied {
            set_input_value.set(applied);
        }
    });

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let ticket = gate.try_update_value(|g| g.arm()).unwrap_or_default();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if gate.with_value(|g| g.is_current(ticket)) {
                on_change.run(new_value);
            }
        });
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        gate.update_value(|g| g.cancel());
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="search"
                placeholder=placeholder
                class:search-input__field--active=is_filter_active
                class="search-input__field"
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}
