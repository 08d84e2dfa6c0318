//! Option Buttons Component
//!
//! Reusable button row for picking one of a fixed set of wire values
//! (priority, status).

use leptos::prelude::*;

/// One button per `(value, label)` option; the current value is highlighted
#[component]
pub fn OptionButtons(
    options: &'static [(&'static str, &'static str)],
    #[prop(into)] current: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="type-selector">
            {options.iter().map(|(value, label)| {
                let val = value.to_string();
                let val_clone = val.clone();
                let is_selected = move || current.get() == val;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "type-btn small active" } else { "type-btn small" }
                        on:click=move |_| on_change.run(val_clone.clone())
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
