//! End-to-end store behavior: dispatch, notification and ordering

use std::sync::Arc;
use std::time::Duration;

use flux_dispatch::{LoggingMiddleware, StateRecorder};
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use todo_store::{
    create_add_todo_action, create_fetch_todo_list_action, create_store_with, remove_todo_action,
    ApiConfig, NewTodo, Todo, TodoAction, TodoError, TodoState, TodoStore,
};

fn store_for(server: &MockServer, initial: Option<TodoState>) -> TodoStore {
    create_store_with(
        &ApiConfig::new(format!("{}/todo", server.uri())),
        initial,
        LoggingMiddleware::new(),
    )
}

#[tokio::test]
async fn test_each_dispatch_notifies_once_with_current_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "todoList": [{"id": 1, "title": "a", "done": false}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 2, "title": "b", "done": false})),
        )
        .mount(&server)
        .await;

    let store = store_for(&server, None);
    let recorder = StateRecorder::<TodoState>::new();
    store.subscribe(recorder.callback());

    store.dispatch(create_fetch_todo_list_action()).await.unwrap();
    store
        .dispatch(create_add_todo_action(NewTodo::new("b")))
        .await
        .unwrap();

    let snapshots = recorder.snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].todo_list, vec![Todo::new(1, "a", false)]);
    assert_eq!(
        snapshots[1].todo_list,
        vec![Todo::new(1, "a", false), Todo::new(2, "b", false)]
    );
    assert_eq!(*store.state(), snapshots[1]);
}

#[tokio::test]
async fn test_noop_dispatch_still_notifies() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/todo/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let seed = TodoState::with_todos(vec![Todo::new(1, "a", false)]);
    let store = store_for(&server, Some(seed.clone()));
    let before = store.state();
    let recorder = StateRecorder::<TodoState>::new();
    store.subscribe(recorder.callback());

    store.dispatch(remove_todo_action(99)).await.unwrap();

    assert!(Arc::ptr_eq(&before, &store.state()));
    assert_eq!(recorder.snapshots(), vec![seed]);
}

#[tokio::test]
async fn test_remove_only_todo_empties_store() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/todo/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let store = store_for(
        &server,
        Some(TodoState::with_todos(vec![Todo::new(1, "a", false)])),
    );
    store.dispatch(remove_todo_action(1)).await.unwrap();

    assert_eq!(*store.state(), TodoState::default());
}

#[tokio::test]
async fn test_unknown_action_fails_without_touching_state() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let seed = TodoState::with_todos(vec![Todo::new(1, "a", false)]);
    let store = store_for(&server, Some(seed));
    let before = store.state();
    let recorder = StateRecorder::<TodoState>::new();
    store.subscribe(recorder.callback());

    let action = TodoAction::from_json(r#"{"type": "archive todo"}"#).unwrap();
    let result = store.dispatch(action).await;

    assert!(matches!(result, Err(TodoError::UnknownActionType(ref tag)) if tag == "archive todo"));
    assert!(Arc::ptr_eq(&before, &store.state()));
    assert!(recorder.is_empty());
}

#[tokio::test]
async fn test_network_error_is_stored_and_notified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todo"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let seed = TodoState::with_todos(vec![Todo::new(1, "a", false)]);
    let store = store_for(&server, Some(seed.clone()));
    let recorder = StateRecorder::<TodoState>::new();
    store.subscribe(recorder.callback());

    store.dispatch(create_fetch_todo_list_action()).await.unwrap();

    let state = store.state();
    assert_eq!(state.todo_list, seed.todo_list);
    assert!(state.error.is_some());
    assert_eq!(recorder.len(), 1);
}

#[tokio::test]
async fn test_overlapping_dispatches_last_completion_wins() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"title": "slow", "done": false})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "title": "slow", "done": false}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(json!({"title": "fast", "done": false})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 2, "title": "fast", "done": false})),
        )
        .mount(&server)
        .await;

    let store = store_for(&server, None);
    let recorder = StateRecorder::<TodoState>::new();
    store.subscribe(recorder.callback());

    let (slow, fast) = tokio::join!(
        store.dispatch(create_add_todo_action(NewTodo::new("slow"))),
        store.dispatch(create_add_todo_action(NewTodo::new("fast"))),
    );
    slow.unwrap();
    fast.unwrap();

    // Both reduced from the empty list; the slow one overwrote the fast one
    assert_eq!(store.state().todo_list, vec![Todo::new(1, "slow", false)]);
    let snapshots = recorder.snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].todo_list, vec![Todo::new(2, "fast", false)]);
}
