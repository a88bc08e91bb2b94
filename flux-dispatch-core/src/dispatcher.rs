//! Change notification broadcaster
//!
//! The dispatcher knows nothing about state. `dispatch()` only says "something
//! changed"; listeners that need the new value read it from wherever it lives
//! (see [`Store::subscribe`](crate::Store::subscribe)).

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Ordered list of no-argument listeners.
///
/// Listeners are called synchronously, in registration order, on every
/// [`dispatch`](Dispatcher::dispatch). There is no unsubscribe: a listener
/// lives as long as the dispatcher.
///
/// # Example
///
/// ```
/// use flux_dispatch_core::Dispatcher;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let dispatcher = Dispatcher::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let counter = hits.clone();
/// dispatcher.subscribe(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// dispatcher.dispatch();
/// dispatcher.dispatch();
/// assert_eq!(hits.load(Ordering::SeqCst), 2);
/// ```
#[derive(Default)]
pub struct Dispatcher {
    listeners: Mutex<Vec<Listener>>,
}

impl Dispatcher {
    /// Create a dispatcher with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every future notification.
    ///
    /// Subscribing the same closure twice registers it twice.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Notify every listener registered at the time of the call.
    ///
    /// The listener list is snapshotted first, so a listener may subscribe
    /// further listeners; those fire starting with the next dispatch.
    pub fn dispatch(&self) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for listener in &listeners {
            listener();
        }
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("listeners_count", &self.len())
            .finish()
    }
}
