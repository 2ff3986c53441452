//! Inbound action payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::domain::{DomainError, ValidationKind};

/// Prefix every accepted `clientProtocol` carries (e.g. `xmtp@2024-02-01`).
pub const XMTP_PROTOCOL_PREFIX: &str = "xmtp";

/// Raw frame POST body as sent by the messaging client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePost {
    #[serde(default)]
    pub client_protocol: Option<String>,
    /// Everything else, handed untouched to the verifier.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl FramePost {
    pub fn require_xmtp(&self) -> Result<(), DomainError> {
        match self.client_protocol.as_deref() {
            Some(p) if p.starts_with(XMTP_PROTOCOL_PREFIX) => Ok(()),
            _ => Err(DomainError::validation(
                ValidationKind::UnsupportedProtocol,
                "This Frame only supports the XMTP protocol",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBody {
    pub opaque_conversation_identifier: String,
    /// 1-based index of the pressed button.
    pub button_index: u32,
    #[serde(default)]
    pub frame_url: String,
}

/// Action whose signature has already been checked upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedAction {
    pub verified_wallet_address: String,
    pub action_body: ActionBody,
}

impl VerifiedAction {
    pub fn new(player: impl Into<String>, conversation_id: impl Into<String>, button_index: u32) -> Self {
        Self {
            verified_wallet_address: player.into(),
            action_body: ActionBody {
                opaque_conversation_identifier: conversation_id.into(),
                button_index,
                frame_url: String::new(),
            },
        }
    }

    pub fn player(&self) -> &str {
        &self.verified_wallet_address
    }

    pub fn conversation_id(&self) -> &str {
        &self.action_body.opaque_conversation_identifier
    }

    pub fn button_index(&self) -> u32 {
        self.action_body.button_index
    }

    /// Reject actions missing a player or conversation before any store access.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.verified_wallet_address.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidAction,
                "verifiedWalletAddress is required",
            ));
        }
        if self.action_body.opaque_conversation_identifier.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidAction,
                "actionBody.opaqueConversationIdentifier is required",
            ));
        }
        Ok(())
    }
}
