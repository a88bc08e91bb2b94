//! Store wiring: the todo reducer behind a logging flux store

use flux_dispatch::{LoggingMiddleware, Store};

use crate::action::TodoAction;
use crate::api::ApiConfig;
use crate::reducer::TodoReducer;
use crate::state::TodoState;

/// The todo store
pub type TodoStore = Store<TodoState, TodoAction, TodoReducer, LoggingMiddleware>;

/// Create a store talking to the default backend
///
/// `initial` seeds the state; `None` starts from an empty list.
pub fn create_store(initial: Option<TodoState>) -> TodoStore {
    create_store_with(&ApiConfig::default(), initial, LoggingMiddleware::new())
}

/// Create a store with an explicit backend and logging middleware
pub fn create_store_with(
    config: &ApiConfig,
    initial: Option<TodoState>,
    logging: LoggingMiddleware,
) -> TodoStore {
    Store::with_middleware(
        initial.unwrap_or_default(),
        TodoReducer::new(config),
        logging,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Todo;

    #[test]
    fn test_default_initial_state() {
        let store = create_store(None);
        let state = store.state();

        assert!(state.todo_list.is_empty());
        assert_eq!(state.error, None);
        assert_eq!(store.reducer().api().base_url(), crate::api::DEFAULT_API_URL);
    }

    #[test]
    fn test_seeded_initial_state() {
        let seed = TodoState::with_todos(vec![Todo::new(1, "seed", false)]);
        let store = create_store_with(
            &ApiConfig::new("http://example.test/todo"),
            Some(seed.clone()),
            LoggingMiddleware::new(),
        );

        assert_eq!(*store.state(), seed);
        assert_eq!(store.reducer().api().base_url(), "http://example.test/todo");
    }
}
