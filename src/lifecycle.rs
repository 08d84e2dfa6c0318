//! Component lifetime guard for async work.
//!
//! A request spawned from a view may resolve after the view is gone; the
//! guard lets the continuation check before touching the view's signals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;

#[derive(Debug, Clone)]
pub struct MountGuard(Arc<AtomicBool>);

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl MountGuard {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// `true` when the owning view is still mounted; logs the dropped response otherwise
    pub fn still_mounted(&self, what: &str) -> bool {
        let mounted = self.is_mounted();
        if !mounted {
            log::debug!("dropping late {} response for an unmounted view", what);
        }
        mounted
    }
}

/// Guard released when the current component is cleaned up
pub fn use_mount_guard() -> MountGuard {
    let guard = MountGuard::new();
    let on_unmount = guard.clone();
    on_cleanup(move || on_unmount.release());
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_is_shared_between_clones() {
        let guard = MountGuard::new();
        let clone = guard.clone();
        assert!(clone.still_mounted("test"));
        guard.release();
        assert!(!clone.is_mounted());
        assert!(!clone.still_mounted("test"));
    }
}
