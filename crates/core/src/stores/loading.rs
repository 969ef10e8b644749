//! Advisory in-flight tracking for store fetches

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts outstanding fetches. `loading` is true while at least one is in
/// flight and is released by dropping the guard, so success, failure and a
/// dropped future all clear it.
#[derive(Debug, Default)]
pub struct LoadingFlag {
    in_flight: AtomicUsize,
}

impl LoadingFlag {
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        LoadingGuard { flag: self }
    }

    /// Begin only when nothing else is in flight.
    pub fn try_begin(&self) -> Option<LoadingGuard<'_>> {
        self.in_flight
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard { flag: self })
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

#[must_use = "loading is cleared as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    flag: &'a LoadingFlag,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
