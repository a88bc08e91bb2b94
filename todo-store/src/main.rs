//! Todo CLI - drives the todo store from the command line
//!
//! Stands in for the UI: it subscribes to the store, dispatches the actions
//! matching the requested command, and prints every state it is notified
//! with.
//!
//! # Usage
//!
//! ```sh
//! # Show the list from the default backend (http://localhost:3000/todo)
//! cargo run -p todo-store -- list
//!
//! # Add, toggle and remove
//! cargo run -p todo-store -- add "buy milk"
//! cargo run -p todo-store -- toggle 3
//! cargo run -p todo-store -- remove 3
//!
//! # Dispatch newline-delimited wire actions from a file (or stdin)
//! cargo run -p todo-store -- replay actions.jsonl
//!
//! # Watch the dispatch log
//! RUST_LOG=todo_store=debug,flux_dispatch_core=debug cargo run -p todo-store -- list
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use flux_dispatch::{ActionFilter, LoggingMiddleware};
use serde_json::json;
use tokio::io::{AsyncBufRead, BufReader};
use tracing_subscriber::EnvFilter;

use todo_store::{
    clear_error, create_add_todo_action, create_fetch_todo_list_action, create_store_with,
    patch_todo_action, remove_todo_action, replay, ApiConfig, NewTodo, ReplayError, TodoAction,
    TodoId, TodoState, TodoStore, DEFAULT_API_URL,
};

/// Todo list client backed by a flux store
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "Drive the todo store against a REST backend")]
struct Args {
    /// Collection endpoint of the todo backend
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Print each state as JSON instead of a checklist
    #[arg(long)]
    json: bool,

    /// Only log actions matching these comma-separated globs
    #[arg(long)]
    log_actions: Option<String>,

    /// Never log actions matching these comma-separated globs
    #[arg(long)]
    skip_actions: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the list
    List,
    /// Create a todo
    Add {
        /// Title of the new todo
        title: String,
    },
    /// Delete a todo
    Remove {
        /// Id of the todo to delete
        id: TodoId,
    },
    /// Flip a todo between open and done
    Toggle {
        /// Id of the todo to toggle
        id: TodoId,
    },
    /// Clear the error slot
    ClearError,
    /// Dispatch newline-delimited JSON actions in order
    Replay {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let filter = ActionFilter::new(args.log_actions.as_deref(), args.skip_actions.as_deref());
    let store = create_store_with(
        &ApiConfig::new(args.api_url.as_str()),
        None,
        LoggingMiddleware::with_filter(filter),
    );

    match run(&store, args.command, args.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(store: &TodoStore, command: Command, json: bool) -> Result<(), String> {
    match command {
        Command::List => {
            subscribe_printer(store, json);
            dispatch(store, create_fetch_todo_list_action()).await
        }
        Command::Add { title } => {
            subscribe_printer(store, json);
            dispatch(store, create_add_todo_action(NewTodo::new(title))).await
        }
        Command::Remove { id } => {
            // Removal is applied against the local list, so load it first
            load(store).await?;
            subscribe_printer(store, json);
            dispatch(store, remove_todo_action(id)).await
        }
        Command::Toggle { id } => {
            load(store).await?;
            let todo = store
                .state()
                .find(&id)
                .cloned()
                .ok_or_else(|| format!("no todo with id {}", id))?;
            subscribe_printer(store, json);
            dispatch(store, patch_todo_action(todo)).await
        }
        Command::ClearError => {
            subscribe_printer(store, json);
            dispatch(store, clear_error()).await
        }
        Command::Replay { file } => {
            subscribe_printer(store, json);
            match file {
                Some(path) => {
                    let file = tokio::fs::File::open(&path)
                        .await
                        .map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
                    replay_from(store, BufReader::new(file)).await
                }
                None => replay_from(store, BufReader::new(tokio::io::stdin())).await,
            }
        }
    }
}

/// Fetch the list without printing; a network error is reported as fatal
async fn load(store: &TodoStore) -> Result<(), String> {
    dispatch(store, create_fetch_todo_list_action()).await?;
    match &store.state().error {
        Some(err) => Err(err.to_string()),
        None => Ok(()),
    }
}

async fn dispatch(store: &TodoStore, action: TodoAction) -> Result<(), String> {
    store.dispatch(action).await.map_err(|e| e.to_string())
}

/// Replay wire actions, reporting each rejected line on stderr
async fn replay_from<R>(store: &TodoStore, reader: R) -> Result<(), String>
where
    R: AsyncBufRead + Unpin,
{
    match replay(store, reader).await {
        Ok(_) => Ok(()),
        Err(ReplayError::Failed { failures, .. }) => {
            for failure in &failures {
                eprintln!("{}", failure);
            }
            Err(format!("{} action(s) failed", failures.len()))
        }
        Err(e) => Err(e.to_string()),
    }
}

fn subscribe_printer(store: &TodoStore, json: bool) {
    store.subscribe(move |state| print_state(state, json));
}

fn print_state(state: &TodoState, json: bool) {
    if json {
        let value = json!({
            "todoList": state.todo_list,
            "error": state.error.as_ref().map(ToString::to_string),
        });
        println!("{}", value);
        return;
    }

    if state.todo_list.is_empty() {
        println!("(no todos)");
    }
    for todo in &state.todo_list {
        let mark = if todo.done { "x" } else { " " };
        println!("[{}] {:>4}  {}", mark, todo.id, todo.title().unwrap_or(""));
    }
    if let Some(err) = &state.error {
        eprintln!("error: {}", err);
    }
}
