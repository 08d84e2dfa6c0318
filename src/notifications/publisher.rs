//! Latest-value publisher with callback subscribers.
//!
//! A subscriber receives the current value as soon as it subscribes and every
//! published value after that. Callbacks run outside the lock on a snapshot of
//! the subscriber list, so they may subscribe, unsubscribe or publish again.
//! A value published from inside a callback supersedes the one being
//! delivered: subscribers not yet reached only see the newer value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    value: T,
    /// Bumped on every stored value
    version: u64,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

fn lock<T>(slot: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Write side: owns the value
pub struct Publisher<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

/// Read side: subscribe to a publisher's values
pub struct Feed<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

/// A stored value waiting to be handed to the subscribers captured with it
#[must_use = "a staged value reaches subscribers only through deliver()"]
pub(crate) struct Delivery<T> {
    value: T,
    version: u64,
    slot: Arc<Mutex<Slot<T>>>,
    callbacks: Vec<Callback<T>>,
}

impl<T> Delivery<T> {
    /// Run the captured callbacks, stopping once a newer value was stored
    pub(crate) fn deliver(self) {
        for callback in &self.callbacks {
            if lock(&self.slot).version != self.version {
                // The newer value has been (or is being) delivered to everyone
                return;
            }
            callback(&self.value);
        }
    }
}

impl<T: Clone + Send + 'static> Publisher<T> {
    pub fn new(initial: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                value: initial,
                version: 0,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn latest(&self) -> T {
        lock(&self.slot).value.clone()
    }

    pub fn feed(&self) -> Feed<T> {
        Feed { slot: Arc::clone(&self.slot) }
    }

    pub fn publish(&self, value: T) {
        self.stage(value).deliver();
    }

    /// Store `value` now; subscribers are called when the delivery is run
    pub(crate) fn stage(&self, value: T) -> Delivery<T> {
        self.stage_with(|current| *current = value)
    }

    /// Modify the value in place under the lock, then stage the result
    pub(crate) fn stage_with(&self, modify: impl FnOnce(&mut T)) -> Delivery<T> {
        let mut slot = lock(&self.slot);
        modify(&mut slot.value);
        slot.version += 1;
        Delivery {
            value: slot.value.clone(),
            version: slot.version,
            slot: Arc::clone(&self.slot),
            callbacks: slot.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        lock(&self.slot).subscribers.len()
    }
}

impl<T: Clone + Send + 'static> Feed<T> {
    pub fn latest(&self) -> T {
        lock(&self.slot).value.clone()
    }

    /// Register `callback`; it is called right away with the current value
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut slot = lock(&self.slot);
            let id = slot.next_id;
            slot.next_id += 1;
            slot.subscribers.push((id, Arc::clone(&callback)));
            (id, slot.value.clone())
        };
        callback(&current);

        let slot: Weak<Mutex<Slot<T>>> = Arc::downgrade(&self.slot);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(slot) = slot.upgrade() {
                    lock(&slot).subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }
}

/// Disposer returned by [`Feed::subscribe`]; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: &T| sink.lock().unwrap().push(value.clone()))
    }

    #[test]
    fn test_subscribe_replays_latest_value() {
        let publisher = Publisher::new(1);
        publisher.publish(2);
        let (seen, callback) = recorder();
        let _sub = publisher.feed().subscribe(callback);
        publisher.publish(3);
        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_unsubscribe_and_drop_detach() {
        let publisher = Publisher::new(0);
        let (seen_a, a) = recorder();
        let (seen_b, b) = recorder();
        let sub_a = publisher.feed().subscribe(a);
        let sub_b = publisher.feed().subscribe(b);
        assert_eq!(publisher.subscriber_count(), 2);

        sub_a.unsubscribe();
        publisher.publish(1);
        drop(sub_b);
        publisher.publish(2);

        assert_eq!(publisher.subscriber_count(), 0);
        assert_eq!(*seen_a.lock().unwrap(), vec![0]);
        assert_eq!(*seen_b.lock().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_callback_may_publish_reentrantly() {
        let publisher = Publisher::new(0u32);
        let echo = publisher.clone();
        let _sub = publisher.feed().subscribe(move |value: &u32| {
            if *value == 1 {
                echo.publish(2);
            }
        });
        publisher.publish(1);
        assert_eq!(publisher.latest(), 2);
    }

    #[test]
    fn test_reentrant_publish_supersedes_pending_delivery() {
        let publisher = Publisher::new(0u32);
        let echo = publisher.clone();
        let _first = publisher.feed().subscribe(move |value: &u32| {
            if *value == 1 {
                echo.publish(2);
            }
        });
        let (seen, callback) = recorder();
        let _second = publisher.feed().subscribe(callback);

        publisher.publish(1);

        // 1 is never handed out after 2
        assert_eq!(*seen.lock().unwrap(), vec![0, 2]);
        assert_eq!(publisher.latest(), 2);
    }

    #[test]
    fn test_subscription_outliving_publisher_is_harmless() {
        let publisher = Publisher::new(String::from("x"));
        let sub = publisher.feed().subscribe(|_| {});
        drop(publisher);
        drop(sub);
    }

    #[test]
    fn test_staged_value_is_visible_before_delivery() {
        let publisher = Publisher::new(0);
        let (seen, callback) = recorder();
        let _sub = publisher.feed().subscribe(callback);
        let delivery = publisher.stage(5);
        assert_eq!(publisher.latest(), 5);
        assert_eq!(*seen.lock().unwrap(), vec![0]);
        delivery.deliver();
        assert_eq!(*seen.lock().unwrap(), vec![0, 5]);
    }
}
