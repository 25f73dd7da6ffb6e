use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Processing,
}

/// Exclusive-access token shared by frame processing and reconfiguration.
///
/// The guarded state is only ever replaced or edited inside one critical
/// section, so a processing call always sees it as of the last completed
/// update.
pub struct ProcessingGate<C> {
    state: Mutex<C>,
    processing: AtomicBool,
}

/// Clears the processing flag when the processing closure returns or unwinds
struct ProcessingFlag<'a>(&'a AtomicBool);

impl Drop for ProcessingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<C> ProcessingGate<C> {
    pub fn new(initial: C) -> Self {
        Self {
            state: Mutex::new(initial),
            processing: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> GateState {
        if self.processing.load(Ordering::Acquire) {
            GateState::Processing
        } else {
            GateState::Idle
        }
    }

    /// Idle -> Processing -> Idle. Blocks while a reconfiguration or another
    /// processing call holds the gate.
    pub fn process<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        let guard = self.lock();
        self.processing.store(true, Ordering::Release);
        let _flag = ProcessingFlag(&self.processing);
        f(&*guard)
    }

    /// Idle -> Idle, with the state borrowed mutably for the update
    pub fn reconfigure<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    pub fn snapshot(&self) -> C
    where
        C: Clone,
    {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, C> {
        // Writers always leave the state whole, so a poisoned lock is still usable
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
