//! Delete Confirm Button Component
//!
//! Inline "Delete?" confirmation for list rows. A list shares one
//! [`DeleteTracker`] across its rows so the row being deleted shows progress
//! and a failed delete stays visible on its row.

use leptos::prelude::*;

/// Row ids with a delete in flight or a failed last attempt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteState {
    pending: Vec<String>,
    failed: Vec<String>,
}

impl DeleteState {
    pub fn start(&mut self, id: &str) {
        self.failed.retain(|f| f != id);
        if !self.is_pending(id) {
            self.pending.push(id.to_string());
        }
    }

    /// Record the outcome; a successful delete forgets the row entirely
    pub fn finish(&mut self, id: &str, ok: bool) {
        self.pending.retain(|p| p != id);
        if !ok && !self.has_failed(id) {
            self.failed.push(id.to_string());
        }
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.iter().any(|p| p == id)
    }

    pub fn has_failed(&self, id: &str) -> bool {
        self.failed.iter().any(|f| f == id)
    }
}

/// Reactive [`DeleteState`] handle for one list
#[derive(Clone, Copy)]
pub struct DeleteTracker(RwSignal<DeleteState>);

impl DeleteTracker {
    pub fn new() -> Self {
        Self(RwSignal::new(DeleteState::default()))
    }

    pub fn start(&self, id: &str) {
        self.0.update(|state| state.start(id));
    }

    pub fn finish(&self, id: &str, ok: bool) {
        self.0.update(|state| state.finish(id, ok));
    }

    fn is_pending(&self, id: &str) -> bool {
        self.0.with(|state| state.is_pending(id))
    }

    fn has_failed(&self, id: &str) -> bool {
        self.0.with(|state| state.has_failed(id))
    }
}

/// Shows "Delete"; once clicked, "Delete?" with ✓ / ✗.
///
/// `on_confirm` is expected to report back through `tracker`.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] id: String,
    tracker: DeleteTracker,
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let id = StoredValue::new(id);
    let pending = move || id.with_value(|id| tracker.is_pending(id));
    let failed = move || id.with_value(|id| tracker.has_failed(id));

    view! {
        <Show when=move || !confirming.get()>
            <button
                class=button_class.clone()
                disabled=pending
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirming.set(true);
                }
            >
                {move || if pending() { "Deleting..." } else { "Delete" }}
            </button>
            <Show when=failed>
                <span class="delete-error">"Delete failed"</span>
            </Show>
        </Show>
        <Show when=move || confirming.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_delete_stays_flagged_until_retry() {
        let mut state = DeleteState::default();
        state.start("p1");
        assert!(state.is_pending("p1"));

        state.finish("p1", false);
        assert!(!state.is_pending("p1"));
        assert!(state.has_failed("p1"));
        assert!(!state.has_failed("p2"));

        state.start("p1");
        assert!(!state.has_failed("p1"));
        state.finish("p1", true);
        assert_eq!(state, DeleteState::default());
    }
}
