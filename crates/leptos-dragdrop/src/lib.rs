//! Leptos DragDrop Utilities
//!
//! Mouse-event drag and drop for Leptos: cards keyed by `K` are dragged onto
//! lanes keyed by `L` (or onto another card, whose lane the caller resolves).
//! Uses movement threshold to distinguish click from drag.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Debug, PartialEq)]
pub enum DropTarget<K, L> {
    /// Drop on another card
    Card(K),
    /// Drop on a lane (column)
    Lane(L),
}

/// DnD state signals
pub struct DndSignals<K: 'static, L: 'static> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<K, L>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<K, L>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending card id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

impl<K, L> Clone for DndSignals<K, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, L> Copy for DndSignals<K, L> {}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays raised so the trailing click can be ignored
const DRAG_END_GRACE: Duration = Duration::from_millis(100);

/// True once the pointer moved far enough from `start` to count as a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals<K, L>() -> DndSignals<K, L>
where
    K: Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<K, L>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
    }
}

/// End drag operation
pub fn end_drag<K, L>(dnd: &DndSignals<K, L>)
where
    K: Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    let clear = dnd.drag_just_ended_write;
    set_timeout(move || clear.set(false), DRAG_END_GRACE);
}

/// Create mousedown handler for draggable cards
/// Records pending drag with start position
pub fn make_on_mousedown<K, L>(dnd: DndSignals<K, L>, card_id: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore form controls inside the card
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
        }
        dnd.pending_id_write.set(Some(card_id.clone()));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for cards (drop onto a sibling card)
pub fn make_on_card_mouseenter<K, L>(dnd: DndSignals<K, L>, card_id: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != card_id {
                dnd.drop_target_write.set(Some(DropTarget::Card(card_id.clone())));
            }
        }
    }
}

/// Create mouseenter handler for lanes
pub fn make_on_lane_mouseenter<K, L>(dnd: DndSignals<K, L>, lane: L) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(Some(DropTarget::Lane(lane.clone())));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K, L>(dnd: DndSignals<K, L>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind window-level mousemove/mouseup handlers for the current owner.
///
/// Listeners are removed when the owning component is cleaned up.
pub fn bind_global_handlers<K, L, F>(dnd: DndSignals<K, L>, on_drop: F)
where
    K: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
    F: Fn(K, DropTarget<K, L>) + 'static,
{
    let on_mousemove = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        // Start dragging once a pending card has moved far enough
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            return;
        }
        if let Some(pending) = dnd.pending_id_read.get_untracked() {
            let start = dnd.start_read.get_untracked();
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_id_write.set(Some(pending));
            }
        }
    });

    let on_mouseup = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        end_drag(&dnd);

        // Plain clicks fall through to the element's own click handler
        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            on_drop(dragged, target);
        }
    });

    on_cleanup(move || {
        on_mousemove.remove();
        on_mouseup.remove();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_movement_is_a_click() {
        assert!(!exceeds_threshold((100, 100), (100, 100)));
        assert!(!exceeds_threshold((100, 100), (105, 95)));
    }

    #[test]
    fn test_movement_past_threshold_starts_drag() {
        assert!(exceeds_threshold((100, 100), (106, 100)));
        assert!(exceeds_threshold((100, 100), (100, 94)));
    }

    #[test]
    fn test_drop_target_equality() {
        let a: DropTarget<String, u8> = DropTarget::Card("t1".to_string());
        assert_eq!(a, DropTarget::Card("t1".to_string()));
        assert_ne!(a, DropTarget::Lane(1));
    }
}
