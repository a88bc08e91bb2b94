//! Test utilities for flux-dispatch stores
//!
//! [`StateRecorder`] is a subscriber that keeps a copy of every state it is
//! notified with, so tests can assert on notification counts and contents.
//!
//! # Example
//!
//! ```ignore
//! use flux_dispatch::testing::StateRecorder;
//!
//! let recorder = StateRecorder::new();
//! store.subscribe(recorder.callback());
//!
//! store.dispatch(Action::Increment).await?;
//! assert_eq!(recorder.len(), 1);
//! assert_eq!(recorder.last(), Some(1));
//! ```

use std::sync::{Arc, Mutex, PoisonError};

/// Records every state delivered to its callback.
///
/// Cloning a recorder shares the underlying buffer.
#[derive(Debug)]
pub struct StateRecorder<S> {
    states: Arc<Mutex<Vec<S>>>,
}

impl<S> Clone for StateRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            states: Arc::clone(&self.states),
        }
    }
}

impl<S> Default for StateRecorder<S> {
    fn default() -> Self {
        Self {
            states: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<S: Clone + Send + 'static> StateRecorder<S> {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber callback that appends each delivered state
    pub fn callback(&self) -> impl Fn(&S) + Send + Sync + 'static {
        let states = Arc::clone(&self.states);
        move |state: &S| {
            states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(state.clone());
        }
    }

    /// All recorded states, oldest first
    pub fn snapshots(&self) -> Vec<S> {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recently recorded state
    pub fn last(&self) -> Option<S> {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Number of notifications received
    pub fn len(&self) -> usize {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no notification was received
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
