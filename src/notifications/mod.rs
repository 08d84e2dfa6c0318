//! Notification Hub
//!
//! Session-lifetime list of notifications plus a derived unread count, both
//! broadcast to any number of subscribers.
//!
//! # Invariants
//! - Insertion order is display order; nothing is deduplicated.
//! - After every operation the unread count equals the number of unread
//!   entries in the latest list value. Both values are stored before any
//!   subscriber runs.
//! - Only bulk transitions exist: unread -> read (`mark_all_as_read`),
//!   any -> removed (`clear_all`).

mod publisher;

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Priority;

pub use publisher::{Feed, Publisher, Subscription};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub priority: Priority,
    pub read: bool,
}

impl Notification {
    /// New unread notification
    pub fn new(title: impl Into<String>, message: impl Into<String>, priority: Priority, date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            date,
            priority,
            read: false,
        }
    }

    /// "X has been assigned to you" for a story or task
    pub fn assigned_to_you(kind: &str, name: &str, date: DateTime<Utc>) -> Self {
        let mut title = kind.to_string();
        if let Some(first) = title.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Self::new(
            format!("{} Updated", title),
            format!("The {} \"{}\" has been assigned to you.", kind, name),
            Priority::Medium,
            date,
        )
    }
}

fn unread_in(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Authoritative notification state for one app session
#[derive(Clone)]
pub struct NotificationHub {
    notifications: Publisher<Vec<Notification>>,
    unread: Publisher<usize>,
    /// Serializes commits so the two publishers never interleave
    commit_lock: Arc<Mutex<()>>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            notifications: Publisher::new(Vec::new()),
            unread: Publisher::new(0),
            commit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Append a notification and publish the new list and count
    pub fn send(&self, notification: Notification) {
        log::debug!("notification: {}", notification.title);
        self.commit(move |list| list.push(notification));
    }

    /// Live feed of the full list; every value replaces the previous one
    pub fn list(&self) -> Feed<Vec<Notification>> {
        self.notifications.feed()
    }

    /// Live feed of the number of unread notifications
    pub fn unread_count(&self) -> Feed<usize> {
        self.unread.feed()
    }

    pub fn mark_all_as_read(&self) {
        self.commit(|list| list.iter_mut().for_each(|n| n.read = true));
    }

    pub fn clear_all(&self) {
        self.commit(Vec::clear);
    }

    fn commit(&self, change: impl FnOnce(&mut Vec<Notification>)) {
        let (list, count) = {
            let _guard = self.commit_lock.lock().unwrap_or_else(PoisonError::into_inner);
            let mut unread = 0;
            let list = self.notifications.stage_with(|list| {
                change(list);
                unread = unread_in(list);
            });
            (list, self.unread.stage(unread))
        };
        list.deliver();
        count.deliver();
    }
}

/// Mirror a feed into a signal owned by the current component.
///
/// The subscription ends when the component is cleaned up.
pub fn use_feed<T>(feed: &Feed<T>) -> ReadSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (value, set_value) = signal(feed.latest());
    let subscription = feed.subscribe(move |latest: &T| {
        // The signal may already be disposed while a snapshot is delivered
        let _ = set_value.try_set(latest.clone());
    });
    on_cleanup(move || subscription.unsubscribe());
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    fn note(title: &str) -> Notification {
        Notification::new(title, format!("{} message", title), Priority::Low, at(0))
    }

    /// Latest list and count as seen by a subscriber
    fn watch(hub: &NotificationHub) -> (Arc<Mutex<Vec<Notification>>>, Arc<Mutex<usize>>, Subscription, Subscription) {
        let list = Arc::new(Mutex::new(Vec::new()));
        let count = Arc::new(Mutex::new(usize::MAX));
        let list_sink = Arc::clone(&list);
        let count_sink = Arc::clone(&count);
        let list_sub = hub.list().subscribe(move |l| *list_sink.lock().unwrap() = l.clone());
        let count_sub = hub.unread_count().subscribe(move |c| *count_sink.lock().unwrap() = *c);
        (list, count, list_sub, count_sub)
    }

    fn titles(list: &[Notification]) -> Vec<&str> {
        list.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_send_preserves_append_order() {
        let hub = NotificationHub::new();
        let (list, _, _l, _c) = watch(&hub);
        for title in ["C", "A", "B", "A"] {
            hub.send(note(title));
        }
        assert_eq!(titles(&list.lock().unwrap()), vec!["C", "A", "B", "A"]);
    }

    #[test]
    fn test_identical_timestamps_keep_insertion_order() {
        let hub = NotificationHub::new();
        hub.send(Notification::new("first", "", Priority::High, at(5)));
        hub.send(Notification::new("second", "", Priority::Low, at(5)));
        assert_eq!(titles(&hub.list().latest()), vec!["first", "second"]);
    }

    #[test]
    fn test_mark_all_as_read_is_idempotent() {
        let hub = NotificationHub::new();
        let (list, count, _l, _c) = watch(&hub);
        hub.send(note("A"));
        hub.send(note("B"));
        hub.mark_all_as_read();
        assert_eq!(*count.lock().unwrap(), 0);
        assert!(list.lock().unwrap().iter().all(|n| n.read));

        let before = list.lock().unwrap().clone();
        hub.mark_all_as_read();
        assert_eq!(*list.lock().unwrap(), before);
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_clear_all_then_send_starts_fresh() {
        let hub = NotificationHub::new();
        let (list, count, _l, _c) = watch(&hub);
        hub.send(note("A"));
        hub.send(note("B"));
        hub.clear_all();
        assert!(list.lock().unwrap().is_empty());
        assert_eq!(*count.lock().unwrap(), 0);

        hub.clear_all();
        assert!(list.lock().unwrap().is_empty());

        hub.send(note("C"));
        assert_eq!(titles(&list.lock().unwrap()), vec!["C"]);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_count_matches_list_after_every_operation() {
        let hub = NotificationHub::new();
        // Checked from inside the list callback: the count must already be updated
        let checker = hub.clone();
        let mismatches = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&mismatches);
        let _sub = hub.list().subscribe(move |list| {
            if checker.unread_count().latest() != unread_in(list) {
                *sink.lock().unwrap() += 1;
            }
        });

        hub.send(note("A"));
        hub.mark_all_as_read();
        hub.send(note("B"));
        hub.send(note("C"));
        assert_eq!(hub.unread_count().latest(), 2);
        hub.clear_all();
        hub.send(note("D"));

        assert_eq!(*mismatches.lock().unwrap(), 0);
        assert_eq!(hub.unread_count().latest(), unread_in(&hub.list().latest()));
    }

    #[test]
    fn test_send_from_list_callback_leaves_every_subscriber_current() {
        let hub = NotificationHub::new();
        let follow_up = hub.clone();
        let _echo = hub.list().subscribe(move |list| {
            if list.len() == 1 {
                follow_up.send(note("follow-up"));
            }
        });
        let (list, count, _l, _c) = watch(&hub);

        hub.send(note("first"));

        assert_eq!(hub.unread_count().latest(), 2);
        assert_eq!(*count.lock().unwrap(), 2);
        assert_eq!(titles(&list.lock().unwrap()), vec!["first", "follow-up"]);
    }

    #[test]
    fn test_read_flag_on_send_is_respected() {
        let hub = NotificationHub::new();
        let mut already_read = note("A");
        already_read.read = true;
        hub.send(already_read);
        hub.send(note("B"));
        assert_eq!(hub.unread_count().latest(), 1);
    }

    #[test]
    fn test_scenario_send_mark_clear() {
        let hub = NotificationHub::new();
        let (list, count, _l, _c) = watch(&hub);
        hub.send(note("A"));
        hub.send(note("B"));
        assert_eq!(*count.lock().unwrap(), 2);

        hub.mark_all_as_read();
        assert_eq!(*count.lock().unwrap(), 0);
        {
            let list = list.lock().unwrap();
            assert_eq!(titles(&list), vec!["A", "B"]);
            assert!(list.iter().all(|n| n.read));
        }

        hub.clear_all();
        assert!(list.lock().unwrap().is_empty());
    }

    #[test]
    fn test_late_subscriber_gets_accumulated_list() {
        let hub = NotificationHub::new();
        hub.send(note("A"));
        hub.send(note("B"));
        hub.send(note("C"));
        let (list, count, _l, _c) = watch(&hub);
        assert_eq!(titles(&list.lock().unwrap()), vec!["A", "B", "C"]);
        assert_eq!(*count.lock().unwrap(), 3);
    }

    #[test]
    fn test_unsubscribed_observer_stops_receiving() {
        let hub = NotificationHub::new();
        let (list, _, list_sub, _c) = watch(&hub);
        hub.send(note("A"));
        list_sub.unsubscribe();
        hub.send(note("B"));
        assert_eq!(titles(&list.lock().unwrap()), vec!["A"]);
    }

    #[test]
    fn test_assignment_notification_text() {
        let n = Notification::assigned_to_you("task", "Write docs", at(1));
        assert_eq!(n.title, "Task Updated");
        assert_eq!(n.message, "The task \"Write docs\" has been assigned to you.");
        assert_eq!(n.priority, Priority::Medium);
        assert!(!n.read);
    }
}
