//! Application state - single source of truth
//!
//! The store owns one `Arc<TodoState>` and swaps it for a new one on every
//! successful dispatch. Nothing here is mutated in place once published.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ApiError;

/// Server-assigned todo identifier (a JSON number or string)
///
/// Any JSON number is accepted, including negative and fractional ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(Number),
    Text(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{}", n),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TodoId {
    fn from(n: u64) -> Self {
        TodoId::Number(n.into())
    }
}

impl From<Number> for TodoId {
    fn from(n: Number) -> Self {
        TodoId::Number(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        TodoId::Text(s)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::convert::Infallible;

    /// JSON numbers become a numeric id, anything else a text id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Number>()
            .map(TodoId::Number)
            .unwrap_or_else(|_| TodoId::Text(s.to_string())))
    }
}

/// A todo record as returned by the server
///
/// Only `id` and `done` are interpreted. Every other field (title, dates, ...)
/// is carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Todo {
    /// Create a todo with a title
    pub fn new(id: impl Into<TodoId>, title: impl Into<String>, done: bool) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(title.into()));
        Self {
            id: id.into(),
            done,
            fields,
        }
    }

    /// The `title` field, if the server sent a string one
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// Copy of this todo with `done` flipped
    pub fn toggled(&self) -> Self {
        Self {
            done: !self.done,
            ..self.clone()
        }
    }
}

/// A todo that has not been stored yet (no `id`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NewTodo {
    /// An open todo with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(title.into()));
        Self {
            done: false,
            fields,
        }
    }
}

/// Body of `GET <collection>`
#[derive(Debug, Deserialize)]
pub(crate) struct TodoListResponse {
    #[serde(rename = "todoList")]
    pub todo_list: Vec<Todo>,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoState {
    /// Todos in server order (fetch) or append/remove order (local edits)
    pub todo_list: Vec<Todo>,

    /// Last network failure, cleared by the next successful request
    pub error: Option<ApiError>,
}

impl TodoState {
    /// State with the given list and no error
    pub fn with_todos(todo_list: Vec<Todo>) -> Self {
        Self {
            todo_list,
            error: None,
        }
    }

    /// Index of the first todo with this id
    pub fn position(&self, id: &TodoId) -> Option<usize> {
        self.todo_list.iter().position(|todo| &todo.id == id)
    }

    /// Find a todo by id
    pub fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todo_list.iter().find(|todo| &todo.id == id)
    }

    /// Same list, with `error` recorded
    pub fn failed(&self, error: ApiError) -> Self {
        Self {
            todo_list: self.todo_list.clone(),
            error: Some(error),
        }
    }

    /// Same list, with the error cleared
    pub fn without_error(&self) -> Self {
        Self::with_todos(self.todo_list.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_todo_keeps_unknown_fields() {
        let raw = json!({"id": 3, "title": "milk", "done": true, "priority": 2});
        let todo: Todo = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(todo.id, TodoId::from(3));
        assert!(todo.done);
        assert_eq!(todo.title(), Some("milk"));
        assert_eq!(todo.fields.get("priority"), Some(&json!(2)));
        assert_eq!(serde_json::to_value(&todo).unwrap(), raw);
    }

    #[test]
    fn test_todo_done_defaults_to_false() {
        let todo: Todo = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(todo.id, TodoId::Text("abc".into()));
        assert!(!todo.done);
    }

    #[test]
    fn test_toggled_is_a_new_value() {
        let todo = Todo::new(1, "milk", false);
        let toggled = todo.toggled();

        assert!(!todo.done);
        assert!(toggled.done);
        assert_eq!(toggled.id, todo.id);
        assert_eq!(toggled.fields, todo.fields);
    }

    #[test]
    fn test_todo_id_parsing_and_display() {
        assert_eq!("42".parse::<TodoId>().unwrap(), TodoId::from(42));
        assert_eq!("x-1".parse::<TodoId>().unwrap(), TodoId::Text("x-1".into()));
        assert_eq!(TodoId::from(7).to_string(), "7");
        assert_eq!("-1".parse::<TodoId>().unwrap().to_string(), "-1");
        assert_eq!("2.5".parse::<TodoId>().unwrap().to_string(), "2.5");
    }

    #[test]
    fn test_todo_id_accepts_any_json_number() {
        let ids: Vec<TodoId> = serde_json::from_value(json!([-1, 2.5, 3, "x"])).unwrap();

        assert_eq!(ids[0], TodoId::Number(Number::from(-1i64)));
        assert_eq!(ids[1].to_string(), "2.5");
        assert_eq!(ids[2], TodoId::from(3));
        assert_eq!(ids[3], TodoId::from("x"));
        assert_eq!(serde_json::to_value(&ids).unwrap(), json!([-1, 2.5, 3, "x"]));
        assert_eq!(TodoId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_new_todo_wire_shape() {
        let value = serde_json::to_value(NewTodo::new("write tests")).unwrap();
        assert_eq!(value, json!({"title": "write tests", "done": false}));
    }

    #[test]
    fn test_state_helpers() {
        let state = TodoState::with_todos(vec![Todo::new(1, "a", false), Todo::new(2, "b", true)]);

        assert_eq!(state.position(&TodoId::from(2)), Some(1));
        assert_eq!(state.position(&TodoId::from(9)), None);
        assert_eq!(state.find(&TodoId::from(1)).and_then(Todo::title), Some("a"));

        let failed = state.failed(ApiError::Request("refused".into()));
        assert_eq!(failed.todo_list, state.todo_list);
        assert!(failed.error.is_some());
        assert_eq!(failed.without_error(), state);
    }
}
