//! View derivation: pipeline, view state transitions and the engine tying them together

pub mod engine;
pub mod pipeline;
pub mod state;

pub use engine::{
    AutoConfirm, ConfirmationPrompt, OrderView, RemovalOutcome, StatusTab, ViewSnapshot,
};
pub use pipeline::{DerivedView, derive};
pub use state::{ViewAction, ViewState, apply_filter_change};
