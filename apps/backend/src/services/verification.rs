//! Seam for the external signature-verification step.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::protocol::{FramePost, VerifiedAction};

#[async_trait]
pub trait ActionVerifier: Send + Sync {
    /// Turn a raw frame POST into a trusted action or reject it.
    async fn verify(&self, post: &FramePost) -> Result<VerifiedAction, DomainError>;
}

/// Accepts posts whose signatures a gateway in front of this service has
/// already checked and decoded into `verifiedWalletAddress` and `actionBody`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpstreamVerified;

#[async_trait]
impl ActionVerifier for UpstreamVerified {
    async fn verify(&self, post: &FramePost) -> Result<VerifiedAction, DomainError> {
        let action: VerifiedAction = serde_json::from_value(Value::Object(post.payload.clone()))
            .map_err(|e| {
                DomainError::validation(
                    ValidationKind::InvalidAction,
                    format!("Frame post is not a verified action: {e}"),
                )
            })?;
        action.validate()?;
        Ok(action)
    }
}
