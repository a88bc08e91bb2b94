//! Reducer - async function: (state, action) -> state
//!
//! Each action performs at most one request against the backend and folds
//! the response into a new state. Network failures land in `state.error`
//! and never fail the dispatch; only an unrecognized action does.

use std::sync::Arc;

use flux_dispatch::Reducer;
use tracing::warn;

use crate::action::TodoAction;
use crate::api::{ApiConfig, TodoApi};
use crate::error::{ApiError, TodoError};
use crate::state::TodoState;

/// The todo reducer, bound to one backend
#[derive(Clone, Debug)]
pub struct TodoReducer {
    api: TodoApi,
}

impl TodoReducer {
    /// Reducer talking to the backend described by `config`
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_api(TodoApi::new(config))
    }

    /// Reducer using an existing client
    pub fn with_api(api: TodoApi) -> Self {
        Self { api }
    }

    /// The backend client
    pub fn api(&self) -> &TodoApi {
        &self.api
    }
}

impl Reducer<TodoState, TodoAction> for TodoReducer {
    type Error = TodoError;

    async fn reduce(
        &self,
        prev: Arc<TodoState>,
        action: TodoAction,
    ) -> Result<Arc<TodoState>, TodoError> {
        let next = match action {
            TodoAction::FetchList => match self.api.fetch_list().await {
                Ok(todo_list) => TodoState::with_todos(todo_list),
                Err(err) => failed(&prev, err),
            },

            TodoAction::Add(todo) => match self.api.create(&todo).await {
                Ok(created) => {
                    let mut todo_list = prev.todo_list.clone();
                    todo_list.push(created);
                    TodoState::with_todos(todo_list)
                }
                Err(err) => failed(&prev, err),
            },

            TodoAction::Remove(id) => match self.api.remove(&id).await {
                // Removal follows the local lookup, not the response body
                Ok(()) => match prev.position(&id) {
                    Some(index) => {
                        let mut todo_list = prev.todo_list.clone();
                        todo_list.remove(index);
                        TodoState::with_todos(todo_list)
                    }
                    None => return Ok(prev),
                },
                Err(err) => failed(&prev, err),
            },

            TodoAction::Patch(todo) => match self.api.patch(&todo.toggled()).await {
                Ok(updated) => match prev.position(&todo.id) {
                    Some(index) => {
                        let mut todo_list = prev.todo_list.clone();
                        todo_list[index] = updated;
                        TodoState::with_todos(todo_list)
                    }
                    None => return Ok(prev),
                },
                Err(err) => failed(&prev, err),
            },

            TodoAction::ClearError => prev.without_error(),

            TodoAction::Unrecognized(raw) => {
                return Err(TodoError::UnknownActionType(raw.action_type));
            }
        };

        Ok(Arc::new(next))
    }
}

fn failed(prev: &TodoState, err: ApiError) -> TodoState {
    warn!(error = %err, "todo request failed");
    prev.failed(err)
}
