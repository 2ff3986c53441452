//! Presentation descriptors produced by the frame orchestrator.

use serde::{Deserialize, Serialize};

use crate::domain::Screen;
use crate::errors::domain::{DomainError, ValidationKind};

/// Everything the image renderer needs to reconstruct scores and winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    pub conversation_id: String,
    pub player_address: String,
    pub screen: Screen,
}

impl ImageDescriptor {
    pub fn new(conversation_id: impl Into<String>, player_address: impl Into<String>, screen: Screen) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            player_address: player_address.into(),
            screen,
        }
    }

    /// JSON form carried in the image URL's `data` parameter.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "conversationId": self.conversation_id,
            "playerAddress": self.player_address,
            "screen": self.screen,
        })
        .to_string()
    }

    pub fn parse(data: &str) -> Result<Self, DomainError> {
        serde_json::from_str(data).map_err(|e| {
            DomainError::validation(
                ValidationKind::Other("IMAGE_DATA".into()),
                format!("Invalid image data: {e}"),
            )
        })
    }
}

/// Next screen, its image, and its buttons in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDescriptor {
    pub screen: Screen,
    pub image: ImageDescriptor,
    pub buttons: Vec<String>,
}

impl FrameDescriptor {
    pub fn for_screen(screen: Screen, conversation_id: &str, player_address: &str) -> Self {
        Self {
            screen,
            image: ImageDescriptor::new(conversation_id, player_address, screen),
            buttons: screen.buttons(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_descriptor_json_uses_wire_names() {
        let image = ImageDescriptor::new("c1", "0xabc", Screen::ResultNotReady);
        let value: serde_json::Value = serde_json::from_str(&image.to_json()).unwrap();
        assert_eq!(value["conversationId"], "c1");
        assert_eq!(value["playerAddress"], "0xabc");
        assert_eq!(value["screen"], "RESULT_NOT_READY");
        assert_eq!(ImageDescriptor::parse(&image.to_json()).unwrap(), image);
    }

    #[test]
    fn parse_rejects_unknown_screen() {
        let err = ImageDescriptor::parse(
            r#"{"conversationId":"c1","playerAddress":"0xabc","screen":"LOBBY"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ValidationKind::Other(_), _)));
    }

    #[test]
    fn descriptor_buttons_follow_screen() {
        let play = FrameDescriptor::for_screen(Screen::Play, "c1", "A");
        assert_eq!(play.buttons, vec!["ROCK 🪨", "PAPER 📜", "SCISSORS ✂️"]);
        assert_eq!(play.image.screen, Screen::Play);

        let waiting = FrameDescriptor::for_screen(Screen::ResultNotReady, "c1", "A");
        assert_eq!(waiting.buttons, vec!["REFRESH"]);
        let ready = FrameDescriptor::for_screen(Screen::ResultReady, "c1", "A");
        assert_eq!(ready.buttons, vec!["PLAY AGAIN"]);
    }
}
