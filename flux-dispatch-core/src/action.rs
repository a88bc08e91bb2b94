//! Action traits for type-safe state transitions

use std::borrow::Cow;
use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged or handed to middleware after the reducer consumed them
/// - Debug: For debugging and logging
/// - Send + 'static: So a dispatch future can move between runtime threads
///
/// Use `#[derive(Action)]` from `flux-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action type tag for logging and filtering
    fn name(&self) -> &'static str;
}

/// Short, human-readable description of an action for logs.
///
/// The default uses the `Debug` output. Override it for actions that carry
/// large payloads.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }

    /// The type tag logs are recorded and filtered under.
    ///
    /// Defaults to [`Action::name`]. Actions that carry a foreign tag at
    /// runtime (an undecoded wire action) return it here.
    fn type_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name())
    }
}
