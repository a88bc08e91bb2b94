//! flux-dispatch: Flux-style state management with async reducers
//!
//! Like Redux, but the reducer may await. Actions describe intent, the
//! reducer performs whatever I/O it needs and returns the next state, and
//! subscribers are told once the new state is in place.
//!
//! # Example
//! ```ignore
//! use flux_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum PlayerAction {
//!     #[action(tag = "player/play")]
//!     Play,
//!     #[action(tag = "player/seek")]
//!     Seek(u64),
//! }
//!
//! assert_eq!(PlayerAction::Seek(30).name(), "player/seek");
//! assert!(PlayerAction::is_known_tag("player/play"));
//! ```

// Re-export everything from core
pub use flux_dispatch_core::*;

// Re-export derive macros
pub use flux_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use flux_dispatch_core::{Action, ActionSummary, Middleware, Reducer};

    // Store and notification
    pub use flux_dispatch_core::{Dispatcher, LoggingMiddleware, NoopMiddleware, Store};

    // Logging
    pub use flux_dispatch_core::ActionFilter;

    // Derive macros
    pub use flux_dispatch_macros::Action;
}
