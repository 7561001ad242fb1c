//! Timeout Wrapper
//!
//! A hung text-generation call must degrade the enrichment, not wedge
//! the run. Every provider call goes through [`with_timeout`].

use std::future::Future;
use std::time::Duration;

use crate::types::{RepoLensError, Result};

/// Execute an async operation with a timeout.
///
/// Returns a timeout error if the operation doesn't complete within the
/// specified duration.
pub async fn with_timeout<T, F>(duration: Duration, future: F, operation: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(RepoLensError::timeout(operation, duration)),
    }
}
