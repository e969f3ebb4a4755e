use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Share Hand-off
// ============================================================================
//
// The finished order leaves the core as a subject and a summary text,
// both composed by the presentation layer. Transmission belongs to the
// platform behind `OrderSharer`.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderShare {
    pub subject: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    #[error("Share target rejected the order: {0}")]
    Rejected(String),
}

/// Outgoing channel for a finished order (share sheet, email, ...)
#[async_trait]
pub trait OrderSharer: Send + Sync {
    async fn share(&self, share: &OrderShare) -> Result<(), ShareError>;
}

/// Records the hand-off in the log and sends nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSharer;

#[async_trait]
impl OrderSharer for TracingSharer {
    async fn share(&self, share: &OrderShare) -> Result<(), ShareError> {
        tracing::info!(
            subject = %share.subject,
            summary_len = share.summary.len(),
            "📤 Order handed to share target"
        );
        tracing::debug!(summary = %share.summary, "Shared order summary");
        Ok(())
    }
}
