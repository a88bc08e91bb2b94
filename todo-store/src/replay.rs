//! Replay newline-delimited wire actions against a store
//!
//! Each non-blank line is one `{"type": ..., "payload": ...}` object. Lines
//! that fail to decode or whose dispatch fails are recorded and skipped;
//! replay carries on with the next line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::action::TodoAction;
use crate::error::{ReplayError, ReplayFailure};
use crate::store::TodoStore;

/// Dispatch every action read from `reader`, in order
///
/// Returns the number of applied actions, or [`ReplayError::Failed`] listing
/// every rejected line once the input is exhausted.
pub async fn replay<R>(store: &TodoStore, reader: R) -> Result<usize, ReplayError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut applied = 0usize;
    let mut failures = Vec::new();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = match TodoAction::from_json(line) {
            Ok(action) => store.dispatch(action).await.map_err(|e| e.to_string()),
            Err(e) => Err(format!("invalid action: {}", e)),
        };

        match outcome {
            Ok(()) => {
                debug!(line = line_no, "replayed action");
                applied += 1;
            }
            Err(reason) => {
                warn!(line = line_no, %reason, "replay line rejected");
                failures.push(ReplayFailure {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(applied)
    } else {
        Err(ReplayError::Failed { applied, failures })
    }
}
