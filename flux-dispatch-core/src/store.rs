//! Centralized state store with an asynchronous reducer

use std::error::Error;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::Instrument;

use crate::action::{Action, ActionSummary};
use crate::dispatcher::Dispatcher;
use crate::logger::ActionFilter;

/// Computes the next state from the previous one and an action.
///
/// Reducers are asynchronous so they can perform I/O (typically a network
/// call) before deciding on the next state. Returning the `prev` handle
/// unchanged signals a no-op.
///
/// Returning `Err` is reserved for failures that must abort the dispatch.
/// Recoverable failures belong in the state itself.
///
/// # Example
/// ```ignore
/// struct CounterReducer;
///
/// impl Reducer<i32, CounterAction> for CounterReducer {
///     type Error = std::convert::Infallible;
///
///     async fn reduce(&self, prev: Arc<i32>, action: CounterAction) -> Result<Arc<i32>, Self::Error> {
///         match action {
///             CounterAction::Increment => Ok(Arc::new(*prev + 1)),
///         }
///     }
/// }
/// ```
pub trait Reducer<S, A>: Send + Sync {
    /// Fatal error type, propagated out of [`Store::dispatch`]
    type Error: Error + Send + 'static;

    /// Reduce `action` against `prev`
    fn reduce(
        &self,
        prev: Arc<S>,
        action: A,
    ) -> impl Future<Output = Result<Arc<S>, Self::Error>> + Send;
}

/// Centralized state store with Flux-like dispatch/subscribe
///
/// The store holds the current state behind a shared slot. Every successful
/// dispatch replaces the slot wholesale with the reducer's result and then
/// notifies subscribers.
///
/// The slot lock is only held to read or swap the handle, never across the
/// reducer's await. Two overlapping dispatches therefore both reduce from the
/// same previous state and the one that completes last wins.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
/// * `R` - The reducer
/// * `M` - Middleware observing each dispatch
///
/// # Example
/// ```ignore
/// let store = Store::new(0, CounterReducer);
/// store.subscribe(|count: &i32| println!("count = {count}"));
/// store.dispatch(CounterAction::Increment).await?;
/// assert_eq!(*store.state(), 1);
/// ```
pub struct Store<S, A, R, M = NoopMiddleware> {
    state: Arc<Mutex<Arc<S>>>,
    reducer: R,
    middleware: M,
    dispatcher: Dispatcher,
    _marker: PhantomData<fn(A)>,
}

impl<S, A, R> Store<S, A, R, NoopMiddleware>
where
    S: Send + Sync + 'static,
    A: Action,
    R: Reducer<S, A>,
{
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: R) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A, R, M> Store<S, A, R, M>
where
    S: Send + Sync + 'static,
    A: Action,
    R: Reducer<S, A>,
    M: Middleware<S, A>,
{
    /// Create a new store whose dispatches pass through `middleware`
    pub fn with_middleware(state: S, reducer: R, middleware: M) -> Self {
        Self {
            state: Arc::new(Mutex::new(Arc::new(state))),
            reducer,
            middleware,
            dispatcher: Dispatcher::new(),
            _marker: PhantomData,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> Arc<S> {
        read_slot(&self.state)
    }

    /// Dispatch an action to the store
    ///
    /// Awaits the reducer, replaces the current state with its result and
    /// notifies every subscriber once. If the reducer fails, the state is left
    /// as it was, nobody is notified and the error is returned.
    pub async fn dispatch(&self, action: A) -> Result<(), R::Error> {
        let span = tracing::info_span!(
            "dispatch",
            action = action.name(),
            tag = tracing::field::Empty
        );
        self.dispatch_inner(action).instrument(span).await
    }

    async fn dispatch_inner(&self, action: A) -> Result<(), R::Error> {
        let prev = self.state();
        self.middleware.before(&action, &prev);

        match self.reducer.reduce(prev, action.clone()).await {
            Ok(next) => {
                *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
                self.middleware.after(&action, &next);
                self.dispatcher.dispatch();
                Ok(())
            }
            Err(error) => {
                self.middleware.failed(&action, &error);
                Err(error)
            }
        }
    }

    /// Register a callback invoked with the current state after every dispatch
    ///
    /// The state is read when the notification fires, not when subscribing.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let slot = Arc::clone(&self.state);
        self.dispatcher.subscribe(move || {
            let state = read_slot(&slot);
            callback(&state);
        });
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.dispatcher.len()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a reference to the reducer
    pub fn reducer(&self) -> &R {
        &self.reducer
    }
}

fn read_slot<S>(slot: &Mutex<Arc<S>>) -> Arc<S> {
    Arc::clone(&slot.lock().unwrap_or_else(PoisonError::into_inner))
}

/// Middleware trait for observing dispatches
///
/// Hooks take `&self` because a store may run several dispatches at once.
pub trait Middleware<S, A: Action>: Send + Sync {
    /// Called before the reducer runs, with the state it will reduce from
    fn before(&self, action: &A, prev: &S);

    /// Called after the new state has been stored, before subscribers run
    fn after(&self, action: &A, next: &S);

    /// Called when the reducer aborted the dispatch
    fn failed(&self, _action: &A, _error: &(dyn Error + 'static)) {}
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<S, A: Action> Middleware<S, A> for NoopMiddleware {
    fn before(&self, _action: &A, _prev: &S) {}
    fn after(&self, _action: &A, _next: &S) {}
}

/// Middleware that logs every state transition through `tracing`
///
/// Combined with the `dispatch` span opened by the store, each dispatch
/// produces one group: the action, the previous state and the next state.
/// Fatal reducer errors are always logged, whatever the filter says.
///
/// The span's `tag` field is filled with [`ActionSummary::type_tag`], and the
/// filter matches on that tag rather than on [`Action::name`].
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    filter: ActionFilter,
}

impl LoggingMiddleware {
    /// Log every action
    pub fn new() -> Self {
        Self::default()
    }

    /// Log only the actions accepted by `filter`
    pub fn with_filter(filter: ActionFilter) -> Self {
        Self { filter }
    }

    /// Returns true if `action` passes the filter, matched on its type tag
    pub fn accepts<A: ActionSummary>(&self, action: &A) -> bool {
        self.filter.should_log(&action.type_tag())
    }
}

impl<S: std::fmt::Debug, A: ActionSummary> Middleware<S, A> for LoggingMiddleware {
    fn before(&self, action: &A, prev: &S) {
        let tag = action.type_tag();
        tracing::Span::current().record("tag", &*tag);
        if self.filter.should_log(&tag) {
            tracing::debug!(action = %action.summary(), prev = ?prev, "dispatching action");
        }
    }

    fn after(&self, action: &A, next: &S) {
        if self.accepts(action) {
            tracing::debug!(next = ?next, "action processed");
        }
    }

    fn failed(&self, action: &A, error: &(dyn Error + 'static)) {
        tracing::warn!(action = %action.summary(), error = %error, "action aborted");
    }
}
