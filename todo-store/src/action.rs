//! Actions and action creators
//!
//! On the wire an action is `{"type": <tag>, "payload": <value>}`. Known tags
//! decode into the typed variants below; anything else becomes
//! [`TodoAction::Unrecognized`] and is rejected by the reducer.

use std::borrow::Cow;

use flux_dispatch::{Action, ActionSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{NewTodo, Todo, TodoId};

/// Wire form of an action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl RawAction {
    /// Wire action with no payload
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Value::Null,
        }
    }

    /// Wire action with a payload
    pub fn with_payload(action_type: impl Into<String>, payload: Value) -> Self {
        Self {
            action_type: action_type.into(),
            payload,
        }
    }
}

/// Everything the todo store can be asked to do
#[derive(Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub enum TodoAction {
    /// Replace the list with the server's
    #[action(tag = "Fetch todo list from server")]
    FetchList,

    /// Create a todo and append the server's copy
    #[action(tag = "A todo addition to store")]
    Add(NewTodo),

    /// Delete a todo by id
    #[action(tag = "remove todo from server")]
    Remove(TodoId),

    /// Toggle `done` on a todo and store the server's copy
    #[action(tag = "patch todo from server")]
    Patch(Todo),

    /// Forget the last network error
    #[action(tag = "Clear error from state")]
    ClearError,

    /// A wire action whose tag is none of the above
    #[action(skip)]
    Unrecognized(RawAction),
}

impl TryFrom<RawAction> for TodoAction {
    type Error = serde_json::Error;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let action = match raw.action_type.as_str() {
            Self::FETCH_LIST_TAG => TodoAction::FetchList,
            Self::ADD_TAG => TodoAction::Add(serde_json::from_value(raw.payload)?),
            Self::REMOVE_TAG => TodoAction::Remove(serde_json::from_value(raw.payload)?),
            Self::PATCH_TAG => TodoAction::Patch(serde_json::from_value(raw.payload)?),
            Self::CLEAR_ERROR_TAG => TodoAction::ClearError,
            _ => TodoAction::Unrecognized(raw),
        };
        Ok(action)
    }
}

impl From<TodoAction> for RawAction {
    fn from(action: TodoAction) -> Self {
        let tag = action.name();
        match action {
            TodoAction::FetchList | TodoAction::ClearError => RawAction::new(tag),
            TodoAction::Add(todo) => RawAction::with_payload(tag, to_payload(&todo)),
            TodoAction::Remove(id) => RawAction::with_payload(tag, to_payload(&id)),
            TodoAction::Patch(todo) => RawAction::with_payload(tag, to_payload(&todo)),
            TodoAction::Unrecognized(raw) => raw,
        }
    }
}

// Payload types are plain JSON data, so serializing them cannot fail
fn to_payload<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

impl TodoAction {
    /// Decode one wire action from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ActionSummary for TodoAction {
    fn summary(&self) -> String {
        match self {
            TodoAction::Add(todo) => match todo.fields.get("title").and_then(Value::as_str) {
                Some(title) => format!("{} {{ title: {:?} }}", self.name(), title),
                None => self.name().to_string(),
            },
            TodoAction::Remove(id) => format!("{} {{ id: {} }}", self.name(), id),
            TodoAction::Patch(todo) => format!("{} {{ id: {} }}", self.name(), todo.id),
            TodoAction::Unrecognized(raw) => format!("Unrecognized({:?})", raw.action_type),
            _ => self.name().to_string(),
        }
    }

    fn type_tag(&self) -> Cow<'_, str> {
        match self {
            TodoAction::Unrecognized(raw) => Cow::Borrowed(raw.action_type.as_str()),
            _ => Cow::Borrowed(self.name()),
        }
    }
}

/// Request the list from the server
pub fn create_fetch_todo_list_action() -> TodoAction {
    TodoAction::FetchList
}

/// Create `todo` on the server
pub fn create_add_todo_action(todo: NewTodo) -> TodoAction {
    TodoAction::Add(todo)
}

/// Delete the todo with this id
pub fn remove_todo_action(id: impl Into<TodoId>) -> TodoAction {
    TodoAction::Remove(id.into())
}

/// Flip `done` on `todo`
pub fn patch_todo_action(todo: Todo) -> TodoAction {
    TodoAction::Patch(todo)
}

/// Reset the error slot
pub fn clear_error() -> TodoAction {
    TodoAction::ClearError
}
