//! the state machine behind controls that show a change before the server
//! confirms it, plus the registry that keeps two mutations for the same
//! record from racing each other

use std::collections::HashSet;
use std::sync::Mutex;

/// a value as an interactive control sees it: settled, or showing an applied
/// value that the server hasn't confirmed yet.
///
/// `Idle(v0)` --apply--> `Pending{v0, v1}` --resolve(true)--> `Idle(v1)`,
/// --resolve(false)--> `Idle(v0)`. Applying again while pending replaces the
/// shown value but keeps the original fallback, so the last user action wins
/// locally while a failure still reverts to the last confirmed state
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ControlState<T> {
    Idle(T),
    Pending { previous: T, applied: T },
}

impl<T: Copy> ControlState<T> {
    /// the value the control should currently display
    pub fn value(&self) -> T {
        match self {
            ControlState::Idle(value) => *value,
            ControlState::Pending { applied, .. } => *applied,
        }
    }

    /// shows `next` immediately, remembering what to fall back to
    pub fn apply(self, next: T) -> Self {
        match self {
            ControlState::Idle(previous) => ControlState::Pending {
                previous,
                applied: next,
            },
            ControlState::Pending { previous, .. } => ControlState::Pending {
                previous,
                applied: next,
            },
        }
    }

    /// settles a pending value once the submit comes back. Success keeps the
    /// applied value without any reconciliation read; failure reverts to the
    /// captured previous value. Resolving an idle state is a no-op
    pub fn resolve(self, success: bool) -> Self {
        match self {
            ControlState::Idle(value) => ControlState::Idle(value),
            ControlState::Pending { previous, applied } => {
                if success {
                    ControlState::Idle(applied)
                } else {
                    ControlState::Idle(previous)
                }
            }
        }
    }
}

/// the set of mutation keys currently being written. A second mutation on a
/// key that is still pending is refused instead of being allowed to race the
/// first to the store
pub struct InFlight {
    pending: Mutex<HashSet<String>>,
}

impl InFlight {
    pub fn new() -> Self {
        InFlight {
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// claims a key for the duration of a mutation. `None` means another
    /// mutation on the same key hasn't settled yet. The claim is released
    /// when the returned ticket drops
    pub fn begin(&self, key: String) -> Option<InFlightTicket> {
        let mut pending = self.pending.lock().unwrap();
        if pending.contains(&key) {
            return None;
        }
        pending.insert(key.clone());
        Some(InFlightTicket {
            registry: self,
            key,
        })
    }

    fn release(&self, key: &str) {
        self.pending.lock().unwrap().remove(key);
    }
}

/// held by a handler while its mutation runs; dropping it releases the key on
/// every exit path
pub struct InFlightTicket<'a> {
    registry: &'a InFlight,
    key: String,
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.key);
    }
}

pub fn vote_key(user_id: u32, book_id: u32, tag_id: u32) -> String {
    format!("vote:{user_id}:{book_id}:{tag_id}")
}

pub fn preference_key(user_id: u32, tag_id: u32) -> String {
    format!("preference:{user_id}:{tag_id}")
}

pub fn shelf_key(user_id: u32, shelf_id: u32, book_id: u32) -> String {
    format!("shelf:{user_id}:{shelf_id}:{book_id}")
}
