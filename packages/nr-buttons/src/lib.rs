//! NR Buttons - Styled button components for declarative UIs.
//!
//! This crate provides:
//!
//! - **Button**: a stateless button with one of six visual styles
//!   (solid, outline, gradient, icon, textured, rounded)
//! - **ActionButton**: a button that runs an asynchronous operation per tap,
//!   shows a busy indicator meanwhile and suppresses taps until it finishes
//! - **Render model**: framework-agnostic frames describing what to draw
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use nr_buttons::{operation, ActionButton};
//!
//! # async fn run() -> nr_buttons::Result<()> {
//! let button = ActionButton::builder("Submit")
//!     .on_activate(operation::delay(Duration::from_secs(2)))
//!     .on_complete(|| println!("submitted"))
//!     .build()?;
//!
//! // Must be called from inside a `tokio::task::LocalSet`.
//! button.activate();
//! assert!(button.is_busy());
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod button;
pub mod color;
pub mod operation;
pub mod render;
pub mod style;

// Re-export commonly used types
pub use action::{
    ActionButton, ActionButtonBuilder, ActionHandle, ActivationOutcome, ActivationState,
    LOADING_DELAY,
};
pub use button::Button;
pub use color::Hsla;
pub use operation::{Operation, OperationError};
pub use render::{ButtonFrame, Clip, Fill, Layer, Size};
pub use style::{BusyIndicator, ButtonContent, ButtonStyle};

/// Error types for nr-buttons operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Action button has no operation to run on activation")]
    MissingOperation,

    #[error("Action button has no completion callback")]
    MissingCallback,

    #[error("Gradient style needs at least one color")]
    EmptyGradient,

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for nr-buttons operations.
pub type Result<T> = std::result::Result<T, Error>;
