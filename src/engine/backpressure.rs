use serde::{Deserialize, Serialize};
use std::sync::{Condvar, Mutex, MutexGuard};

/// What a node does with a frame that arrives while it is busy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackpressurePolicy {
    /// Wait for the node, in arrival order
    Queueing,
    /// Drop the frame
    Discarding,
}

impl BackpressurePolicy {
    pub fn from_queueing(queueing: bool) -> Self {
        if queueing {
            Self::Queueing
        } else {
            Self::Discarding
        }
    }
}

#[derive(Debug, Default)]
struct AdmissionState {
    in_flight: bool,
    next_ticket: u64,
    now_serving: u64,
}

/// Admits at most one frame at a time into a node.
///
/// Queueing callers take a ticket and block until it comes up, which keeps
/// frames in arrival order. The number of waiting callers is not capped
/// here: each one holds its own input on its own thread until admitted, so
/// the bound on pending frames is however many threads the caller lets in
/// (under [`spawn_node`](crate::engine::spawn_node), exactly one).
/// Discarding callers are turned away while a frame is in flight.
#[derive(Debug)]
pub struct Admission {
    policy: BackpressurePolicy,
    state: Mutex<AdmissionState>,
    ready: Condvar,
}

/// Held for as long as the admitted frame is in flight
#[must_use = "the frame is only in flight while the permit is held"]
pub struct AdmissionPermit<'a> {
    admission: &'a Admission,
}

impl Admission {
    pub fn new(policy: BackpressurePolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(AdmissionState::default()),
            ready: Condvar::new(),
        }
    }

    pub fn policy(&self) -> BackpressurePolicy {
        self.policy
    }

    /// `None` means the frame was discarded
    pub fn admit(&self) -> Option<AdmissionPermit<'_>> {
        let mut state = self.lock();
        match self.policy {
            BackpressurePolicy::Discarding => {
                if state.in_flight {
                    return None;
                }
            }
            BackpressurePolicy::Queueing => {
                let ticket = state.next_ticket;
                state.next_ticket += 1;
                while state.in_flight || state.now_serving != ticket {
                    state = self
                        .ready
                        .wait(state)
                        .unwrap_or_else(|poisoned| poisoned.into_inner());
                }
                state.now_serving += 1;
            }
        }
        state.in_flight = true;
        Some(AdmissionPermit { admission: self })
    }

    pub fn is_busy(&self) -> bool {
        self.lock().in_flight
    }

    /// Number of queueing callers waiting for their turn
    pub fn pending(&self) -> usize {
        let state = self.lock();
        (state.next_ticket - state.now_serving) as usize
    }

    fn release(&self) {
        let mut state = self.lock();
        state.in_flight = false;
        drop(state);
        self.ready.notify_all();
    }

    fn lock(&self) -> MutexGuard<'_, AdmissionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for AdmissionPermit<'_> {
    fn drop(&mut self) {
        self.admission.release();
    }
}
