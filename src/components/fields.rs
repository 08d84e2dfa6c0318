//! Form Field Components
//!
//! Text input and id picker shared by the create / edit forms.

use leptos::prelude::*;

/// Single-line input bound to a string signal
#[component]
pub fn TextField(
    #[prop(into)] placeholder: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional)] numeric: bool,
) -> impl IntoView {
    view! {
        <input
            type={if numeric { "number" } else { "text" }}
            class="form-input"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}

/// Dropdown over `(id, label)` choices with an empty placeholder entry
#[component]
pub fn IdSelect(
    #[prop(into)] placeholder: String,
    #[prop(into)] choices: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <select
            class="form-input"
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value="" selected=move || value.get().is_empty()>{placeholder}</option>
            <For
                each=move || choices.get()
                key=|(id, label)| (id.clone(), label.clone())
                children=move |(id, label)| {
                    let option_id = id.clone();
                    view! {
                        <option value=id selected=move || value.get() == option_id>
                            {label}
                        </option>
                    }
                }
            />
        </select>
    }
}
