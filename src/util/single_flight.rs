//! In-flight call de-duplication.
//!
//! Two logical flows that hit the same suspension point (e.g. two route
//! guards both needing the "who am I" fetch) share one pending future and
//! observe the same outcome, instead of racing last-write-wins fetches.
//! Single-threaded: `Rc`, no locks.

#[cfg(test)]
#[path = "single_flight_test.rs"]
mod single_flight_test;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

/// Shares one pending execution of an async operation among concurrent
/// callers. Clones share the same slot.
pub struct SingleFlight<T: Clone + 'static> {
    pending: Rc<RefCell<Option<Shared<LocalBoxFuture<'static, T>>>>>,
}

impl<T: Clone + 'static> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            pending: Rc::new(RefCell::new(None)),
        }
    }
}

impl<T: Clone + 'static> Clone for SingleFlight<T> {
    fn clone(&self) -> Self {
        Self {
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<T: Clone + 'static> SingleFlight<T> {
    /// Await the pending execution if one is in flight, otherwise start a
    /// fresh one from `make`. Once the shared future completes the slot is
    /// cleared, so a later call runs the operation again.
    pub async fn run<F, Fut>(&self, make: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + 'static,
    {
        let shared = {
            let mut pending = self.pending.borrow_mut();
            match pending.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let fresh = make().boxed_local().shared();
                    *pending = Some(fresh.clone());
                    fresh
                }
            }
        };
        let out = shared.await;
        let mut pending = self.pending.borrow_mut();
        if pending.as_ref().is_some_and(|p| p.peek().is_some()) {
            *pending = None;
        }
        out
    }
}
