//! Flux store for a REST-backed todo list
//!
//! Data flow:
//! 1. The UI calls `store.dispatch(action_creator(...)).await`
//! 2. [`TodoReducer`] performs the matching request and builds the next state
//! 3. The store swaps in the new state and notifies subscribers
//! 4. Each subscriber receives the state as it is at notification time
//!
//! ```ignore
//! use todo_store::{create_store, create_fetch_todo_list_action};
//!
//! let store = create_store(None);
//! store.subscribe(|state| println!("{} todos", state.todo_list.len()));
//! store.dispatch(create_fetch_todo_list_action()).await?;
//! ```

pub mod action;
pub mod api;
pub mod error;
pub mod reducer;
pub mod replay;
pub mod state;
pub mod store;

pub use action::{
    clear_error, create_add_todo_action, create_fetch_todo_list_action, patch_todo_action,
    remove_todo_action, RawAction, TodoAction,
};
pub use api::{ApiConfig, TodoApi, DEFAULT_API_URL, JSON_CONTENT_TYPE};
pub use error::{ApiError, ReplayError, ReplayFailure, TodoError};
pub use reducer::TodoReducer;
pub use replay::replay;
pub use state::{NewTodo, Todo, TodoId, TodoState};
pub use store::{create_store, create_store_with, TodoStore};
