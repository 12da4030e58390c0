//! One-shot results handed to callers of animated operations.
//!
//! An animated operation returns a [`Deferred`] immediately; the engine keeps the matching
//! [`Resolver`] until the rendering layer acknowledges the transition. A resolver is consumed
//! by [`Resolver::resolve`], so a result can be produced at most once. Dropping a resolver
//! without resolving it marks the deferred as abandoned and is reported through `tracing`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::foundation::error::{VizError, VizResult};

enum Slot<T> {
    Pending,
    Ready(T),
    Taken,
    Abandoned,
}

struct Shared<T> {
    slot: Slot<T>,
    resolutions: u32,
}

/// Caller-side handle of a result that becomes available once an animation completes.
pub struct Deferred<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

/// Engine-side handle used to resolve the paired [`Deferred`] exactly once.
pub struct Resolver<T> {
    shared: Option<Rc<RefCell<Shared<T>>>>,
}

/// Create a connected resolver / deferred pair.
pub fn deferred<T>() -> (Resolver<T>, Deferred<T>) {
    let shared = Rc::new(RefCell::new(Shared {
        slot: Slot::Pending,
        resolutions: 0,
    }));
    (
        Resolver {
            shared: Some(Rc::clone(&shared)),
        },
        Deferred { shared },
    )
}

impl<T> Deferred<T> {
    /// A deferred that is already resolved with `value`.
    pub fn ready(value: T) -> Self {
        let (resolver, deferred) = deferred();
        resolver.resolve(value);
        deferred
    }

    /// `true` once the engine has produced the value (whether or not it was taken).
    pub fn is_resolved(&self) -> bool {
        matches!(self.shared.borrow().slot, Slot::Ready(_) | Slot::Taken)
    }

    /// `true` when the resolver was dropped without producing a value.
    pub fn is_abandoned(&self) -> bool {
        matches!(self.shared.borrow().slot, Slot::Abandoned)
    }

    /// How many times the value was produced. Always 0 or 1.
    pub fn resolution_count(&self) -> u32 {
        self.shared.borrow().resolutions
    }

    /// Move the value out. Returns `None` while pending and after the first successful take.
    pub fn take(&self) -> Option<T> {
        let mut shared = self.shared.borrow_mut();
        match std::mem::replace(&mut shared.slot, Slot::Taken) {
            Slot::Ready(value) => Some(value),
            other => {
                shared.slot = other;
                None
            }
        }
    }
}

impl<T: Clone> Deferred<T> {
    /// Clone the value without consuming it.
    pub fn peek(&self) -> Option<T> {
        match &self.shared.borrow().slot {
            Slot::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.shared.borrow().slot {
            Slot::Pending => "pending",
            Slot::Ready(_) => "ready",
            Slot::Taken => "taken",
            Slot::Abandoned => "abandoned",
        };
        f.debug_struct("Deferred").field("state", &state).finish()
    }
}

impl<T> Resolver<T> {
    /// Produce the value. Consumes the resolver.
    pub fn resolve(mut self, value: T) {
        if let Some(shared) = self.shared.take() {
            let mut shared = shared.borrow_mut();
            shared.slot = Slot::Ready(value);
            shared.resolutions += 1;
        }
    }
}

impl<T> Drop for Resolver<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            tracing::error!("deferred result dropped without being resolved");
            shared.borrow_mut().slot = Slot::Abandoned;
        }
    }
}

impl<T> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("armed", &self.shared.is_some())
            .finish()
    }
}

/// Guarded single-consumption slot for the continuation of an in-flight operation.
///
/// Arming an occupied slot fails with [`VizError::OperationRejected`] instead of
/// overwriting the pending continuation.
#[derive(Debug)]
pub struct PendingSlot<T> {
    label: &'static str,
    inner: Option<T>,
}

impl<T> PendingSlot<T> {
    pub fn new(label: &'static str) -> Self {
        Self { label, inner: None }
    }

    pub fn arm(&mut self, value: T) -> VizResult<()> {
        if self.inner.is_some() {
            return Err(VizError::rejected(format!(
                "{} already has a pending continuation",
                self.label
            )));
        }
        self.inner = Some(value);
        Ok(())
    }

    pub fn is_armed(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.inner.as_mut()
    }

    pub fn take(&mut self) -> Option<T> {
        self.inner.take()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/deferred.rs"]
mod tests;
