//! Single entry point for every state-changing call.
//!
//! A transaction either confirms with a success status inside the timeout or the
//! caller gets a [`TxError`], which the binary treats as fatal. There are no retries
//! here: the next run re-derives what still needs doing from chain state.

use crate::error::{Result, TxError};
use crate::gateway::TxReceipt;
use crate::utils::error::compact_error;
use std::future::Future;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TxExecutor {
    timeout: Duration,
}

impl TxExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Race broadcast + confirmation of the transaction built by `factory` against the timeout.
    ///
    /// Dropping the losing future is the only cancellation; a transaction that was already
    /// broadcast may still be mined after we give up on it.
    pub async fn send_and_confirm<F, Fut>(&self, action: &str, factory: F) -> Result<TxReceipt>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<TxReceipt>>,
    {
        let started = Instant::now();
        tracing::debug!("[TX] Sending {action}");

        let receipt = match tokio::time::timeout(self.timeout, factory()).await {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(err)) => {
                tracing::error!("[TX] Error broadcasting {action}: {}", compact_error(&err));
                return Err(TxError::Submission {
                    action: action.to_string(),
                    reason: compact_error(&err),
                }
                .into());
            }
            Err(_) => {
                let waited_ms = self.timeout.as_millis() as u64;
                tracing::error!("[TX] Timeout after {waited_ms}ms waiting for {action}");
                return Err(TxError::Timeout {
                    action: action.to_string(),
                    waited_ms,
                }
                .into());
            }
        };

        if !receipt.success {
            tracing::error!(
                "[TX] Receipt for {action} has a failed status ({:#x})",
                receipt.tx_hash
            );
            return Err(TxError::Reverted {
                action: action.to_string(),
                tx_hash: receipt.tx_hash,
            }
            .into());
        }

        tracing::debug!(
            "[TX] {action} confirmed in {}ms ({:#x})",
            started.elapsed().as_millis(),
            receipt.tx_hash
        );
        Ok(receipt)
    }
}
