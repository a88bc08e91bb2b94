//! REST client for the todo backend
//!
//! One method per endpoint, one attempt per call. No retry, no timeout:
//! a hanging server keeps the caller waiting.
//!
//! | Method | Path | Body | Response |
//! |---|---|---|---|
//! | GET | `<base>` | - | `{"todoList": [...]}` |
//! | POST | `<base>` | new todo | created todo |
//! | DELETE | `<base>/<id>` | - | any JSON (ignored) |
//! | PATCH | `<base>/<id>` | todo | updated todo |

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{NewTodo, Todo, TodoId, TodoListResponse};

/// Collection endpoint used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000/todo";

/// Content type sent with every request that has a body
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Where the todo collection lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Collection endpoint, without a trailing slash
    pub base_url: String,
}

impl ApiConfig {
    /// Config for the given collection URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// HTTP client bound to one todo collection
#[derive(Clone, Debug)]
pub struct TodoApi {
    client: Client,
    base_url: String,
}

impl TodoApi {
    /// Create a client with a default `reqwest::Client`
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// The collection endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &TodoId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// `GET <base>`: the full list, in server order
    pub async fn fetch_list(&self) -> Result<Vec<Todo>, ApiError> {
        debug!(method = "GET", url = %self.base_url, "todo request");
        let response = self.client.get(&self.base_url).send().await?;
        let body: TodoListResponse = decode(response).await?;
        Ok(body.todo_list)
    }

    /// `POST <base>`: returns the record the server created
    pub async fn create(&self, todo: &NewTodo) -> Result<Todo, ApiError> {
        debug!(method = "POST", url = %self.base_url, "todo request");
        let response = self
            .client
            .post(&self.base_url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(encode(todo)?)
            .send()
            .await?;
        decode(response).await
    }

    /// `DELETE <base>/<id>`
    ///
    /// The response must be JSON, but its content is not inspected.
    pub async fn remove(&self, id: &TodoId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!(method = "DELETE", url = %url, "todo request");
        let response = self.client.delete(url).send().await?;
        let _: Value = decode(response).await?;
        Ok(())
    }

    /// `PATCH <base>/<id>` with `todo` as the body; returns the updated record
    pub async fn patch(&self, todo: &Todo) -> Result<Todo, ApiError> {
        let url = self.item_url(&todo.id);
        debug!(method = "PATCH", url = %url, "todo request");
        let response = self
            .client
            .patch(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(encode(todo)?)
            .send()
            .await?;
        decode(response).await
    }
}

fn encode<T: Serialize>(body: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = response.error_for_status()?;
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_trims_trailing_slash() {
        assert_eq!(ApiConfig::new("http://host/todo/").base_url, "http://host/todo");
        assert_eq!(ApiConfig::default().base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_item_url() {
        let api = TodoApi::new(&ApiConfig::new("http://host/todo"));
        assert_eq!(api.item_url(&TodoId::from(4)), "http://host/todo/4");
        assert_eq!(api.item_url(&TodoId::from("ab")), "http://host/todo/ab");
    }
}
