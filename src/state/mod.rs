//! Dashboard UI state
//!
//! Pure, synchronous state machines with no rendering dependency:
//! - [`selection`]: comparison set and detail panel of a grid view
//! - [`navigation`]: active tab, open ranking and justification dialog

pub mod navigation;
pub mod selection;

pub use navigation::{Navigation, RankingFocus, RankingToggle, Tab};
pub use selection::{SelectOutcome, Selection, SelectionState};

use thiserror::Error;

/// Errors from state transitions that reference missing items
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No ranking is open")]
    NoRankingOpen,

    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

/// Result type alias for state transitions
pub type StateResult<T> = Result<T, StateError>;
