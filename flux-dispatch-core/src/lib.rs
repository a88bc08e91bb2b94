//! Core traits and types for flux-dispatch
//!
//! This crate provides the foundational abstractions for Flux-style state
//! management where the reducer is allowed to await I/O.
//!
//! # Core Concepts
//!
//! - **Action**: Values that describe an intended state change
//! - **Reducer**: Async function from (previous state, action) to next state
//! - **Dispatcher**: Ordered list of listeners told that "something changed"
//! - **Store**: Holds the current state, runs the reducer, notifies subscribers
//!
//! # Basic Example
//!
//! ```ignore
//! use flux_dispatch_core::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! impl Action for CounterAction {
//!     fn name(&self) -> &'static str {
//!         "Increment"
//!     }
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer<i32, CounterAction> for CounterReducer {
//!     type Error = std::convert::Infallible;
//!
//!     async fn reduce(&self, prev: Arc<i32>, _action: CounterAction) -> Result<Arc<i32>, Self::Error> {
//!         Ok(Arc::new(*prev + 1))
//!     }
//! }
//!
//! let store = Store::new(0, CounterReducer);
//! store.subscribe(|count| println!("count is now {count}"));
//! store.dispatch(CounterAction::Increment).await?;
//! ```
//!
//! # Dispatch Semantics
//!
//! 1. The store snapshots the current state and hands it to the reducer
//! 2. The reducer may await (network, disk) before returning the next state
//! 3. The store replaces its state with the result - never merges
//! 4. Every subscriber is called synchronously, in registration order
//!
//! A reducer error aborts only that dispatch: the state is untouched and no
//! subscriber runs. Dispatches are not queued, so overlapping dispatches race
//! and the last one to finish wins.

pub mod action;
pub mod dispatcher;
pub mod logger;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionSummary};

// Notification exports
pub use dispatcher::Dispatcher;

// Store exports
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store};

// Logging exports
pub use logger::{glob_match, ActionFilter};

// Testing exports
pub use testing::StateRecorder;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::dispatcher::Dispatcher;
    pub use crate::logger::ActionFilter;
    pub use crate::store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store};
}
