//! Turning a fallible async operation into a `(value, error)` pair.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use thiserror::Error;

/// Why [`settle`] produced no value.
#[derive(Debug, Error)]
pub enum SettleError<E> {
    /// The operation returned an error.
    #[error("{0}")]
    Failed(E),

    /// The operation panicked.
    #[error("operation panicked: {0}")]
    Panicked(String),
}

impl<E> SettleError<E> {
    /// The operation's own error, if it returned one.
    #[must_use]
    pub fn into_failed(self) -> Option<E> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Panicked(_) => None,
        }
    }
}

/// Run `operation` and report its outcome as exactly one of value or error.
///
/// Yields `(Some(value), None)` on success and `(None, Some(error))` on
/// failure. A panic while building or polling the future is caught and
/// reported as [`SettleError::Panicked`]; nothing unwinds past this call.
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use boxoffice_client::utils::settle;
///
/// let (value, error) = settle(|| async { Ok::<_, String>(3) }).await;
/// assert_eq!(value, Some(3));
/// assert!(error.is_none());
/// # }
/// ```
pub async fn settle<Op, Fut, T, E>(operation: Op) -> (Option<T>, Option<SettleError<E>>)
where
    Op: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let outcome = AssertUnwindSafe(async move { operation().await })
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(value)) => (Some(value), None),
        Ok(Err(error)) => (None, Some(SettleError::Failed(error))),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(%message, "Async operation panicked");
            (None, Some(SettleError::Panicked(message)))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
