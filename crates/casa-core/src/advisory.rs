// ── Advisory de-duplication ──
//
// Several concurrent failures usually share one cause. Only the first one
// to acquire the gate should be shown; the rest are logged and dropped
// until the shown advisory is dismissed (its guard is dropped).

use std::sync::atomic::{AtomicBool, Ordering};

static GLOBAL: AdvisoryGate = AdvisoryGate::new();

/// Advisory-only flag: at most one advisory is "showing" at a time.
#[derive(Debug, Default)]
pub struct AdvisoryGate {
    showing: AtomicBool,
}

impl AdvisoryGate {
    pub const fn new() -> Self {
        Self {
            showing: AtomicBool::new(false),
        }
    }

    /// The process-wide gate.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Claim the gate. `None` if another advisory is already showing.
    pub fn try_acquire(&self) -> Option<AdvisoryGuard<'_>> {
        self.showing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AdvisoryGuard { gate: self })
    }

    pub fn is_showing(&self) -> bool {
        self.showing.load(Ordering::Acquire)
    }
}

/// Held while an advisory is on screen. Releases the gate on drop.
#[derive(Debug)]
pub struct AdvisoryGuard<'a> {
    gate: &'a AdvisoryGate,
}

impl Drop for AdvisoryGuard<'_> {
    fn drop(&mut self) {
        self.gate.showing.store(false, Ordering::Release);
    }
}
