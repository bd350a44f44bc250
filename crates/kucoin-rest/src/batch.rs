//! Sequential batch execution
//!
//! Runs one operation per input item, strictly in order, and either stops
//! at the first failure or records it and keeps going.

use std::future::Future;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};

/// What to do when an item fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Return the first error
    #[default]
    Abort,
    /// Record the error and continue with the next item
    Continue,
}

/// Result of one batch item
#[derive(Debug)]
pub enum ItemOutcome<T> {
    Success(T),
    Failed { index: usize, error: RestError },
}

impl<T> ItemOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

impl ItemOutcome<Value> {
    /// Output record for this item
    ///
    /// Failures become `{"error": message, "code": code}`; `code` is null
    /// for errors that carry none.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success(value) => value.clone(),
            Self::Failed { error, .. } => json!({
                "error": error.message(),
                "code": error.code(),
            }),
        }
    }
}

/// Run `f` over every item in input order
///
/// Items are never run concurrently: item `n + 1` starts after item `n`
/// has finished.
///
/// # Errors
/// With [`FailureMode::Abort`], the first item error is returned and the
/// remaining items are not run.
pub async fn run_sequential<I, T, F, Fut>(
    items: I,
    mode: FailureMode,
    mut f: F,
) -> RestResult<Vec<ItemOutcome<T>>>
where
    I: IntoIterator,
    F: FnMut(usize, I::Item) -> Fut,
    Fut: Future<Output = RestResult<T>>,
{
    let mut outcomes = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        match f(index, item).await {
            Ok(value) => outcomes.push(ItemOutcome::Success(value)),
            Err(error) if mode == FailureMode::Continue => {
                warn!(index, %error, "Batch item failed, continuing");
                outcomes.push(ItemOutcome::Failed { index, error });
            }
            Err(error) => {
                debug!(index, "Batch aborted");
                return Err(error);
            }
        }
    }

    Ok(outcomes)
}
