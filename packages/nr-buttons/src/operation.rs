//! Units of work run by an [`ActionButton`](crate::ActionButton).

use futures::future::{FutureExt, LocalBoxFuture};
use std::future::Future;
use std::time::Duration;

/// Why an operation did not complete successfully.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Operation failed: {message}")]
pub struct OperationError {
    pub message: String,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for OperationError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for OperationError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Result of one run of an operation.
pub type OperationResult = std::result::Result<(), OperationError>;

/// Starts a fresh future each time the button is activated.
///
/// Futures run on the UI thread's `LocalSet`, so they need not be `Send`.
pub type Operation = Box<dyn FnMut() -> LocalBoxFuture<'static, OperationResult>>;

/// Wrap an async closure as an [`Operation`].
pub fn from_fn<F, Fut>(mut f: F) -> Operation
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = OperationResult> + 'static,
{
    Box::new(move || f().boxed_local())
}

/// Operation that succeeds after a fixed delay.
pub fn delay(duration: Duration) -> Operation {
    from_fn(move || async move {
        tokio::time::sleep(duration).await;
        Ok(())
    })
}

/// Operation that fails with `message` after a fixed delay.
pub fn failing_after(duration: Duration, message: impl Into<String>) -> Operation {
    let message = message.into();
    from_fn(move || {
        let message = message.clone();
        async move {
            tokio::time::sleep(duration).await;
            Err(OperationError::new(message))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delay_waits_then_succeeds() {
        let mut op = delay(Duration::from_millis(500));
        let start = Instant::now();
        assert_eq!(op().await, Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_after_reports_message() {
        let mut op = failing_after(Duration::from_millis(10), "network down");
        let err = op().await.unwrap_err();
        assert_eq!(err.message, "network down");
        assert_eq!(err.to_string(), "Operation failed: network down");
    }

    #[test]
    fn test_error_conversions() {
        assert_eq!(OperationError::from("x"), OperationError::new("x"));
        assert_eq!(OperationError::from("y".to_string()).message, "y");
    }
}
