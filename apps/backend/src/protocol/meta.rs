//! Frame meta tags and the HTML document that carries them.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::domain::Screen;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::protocol::frame::{FrameDescriptor, ImageDescriptor};

pub const MAX_BUTTONS: usize = 4;
pub const DEFAULT_FRAME_VERSION: &str = "vNext";
pub const XMTP_ACCEPTS_VERSION: &str = "2024-02-01";

const DOCUMENT_TITLE: &str = "Rock Paper Scissors Frame";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Wide,
    Square,
}

impl AspectRatio {
    pub const fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Wide => "1.91:1",
            AspectRatio::Square => "1:1",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameProps {
    /// Defaults to `vNext`.
    pub frame: Option<String>,
    pub image_url: String,
    pub buttons: Vec<String>,
    pub post_url: Option<String>,
    pub text_input: Option<String>,
    pub image_aspect_ratio: Option<AspectRatio>,
}

impl FrameProps {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            ..Self::default()
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<String>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_post_url(mut self, post_url: impl Into<String>) -> Self {
        self.post_url = Some(post_url.into());
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.image_aspect_ratio = Some(ratio);
        self
    }
}

/// Ordered `(property, content)` pairs for a frame.
pub fn frame_meta_tags(props: &FrameProps) -> Result<Vec<(String, String)>, DomainError> {
    if props.buttons.len() > MAX_BUTTONS {
        return Err(DomainError::validation(
            ValidationKind::TooManyButtons,
            format!(
                "Maximum of {MAX_BUTTONS} buttons are allowed per frame, got {}",
                props.buttons.len()
            ),
        ));
    }

    let frame = props
        .frame
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FRAME_VERSION);

    let mut tags = vec![
        ("fc:frame".to_string(), frame.to_string()),
        ("fc:frame:image".to_string(), props.image_url.clone()),
        ("og:image".to_string(), props.image_url.clone()),
        ("of:accepts:xmtp".to_string(), XMTP_ACCEPTS_VERSION.to_string()),
    ];

    for (i, label) in props.buttons.iter().enumerate() {
        tags.push((format!("fc:frame:button:{}", i + 1), label.clone()));
    }

    if let Some(text) = props.text_input.as_deref().filter(|t| !t.is_empty()) {
        tags.push(("fc:frame:input:text".to_string(), text.to_string()));
    }

    if let Some(post_url) = props.post_url.as_deref().filter(|u| !u.is_empty()) {
        tags.push(("of:post_url".to_string(), post_url.to_string()));
        // Legacy XMTP clients still read this one.
        tags.push(("xmtp:frame:post-url".to_string(), post_url.to_string()));
    }

    if let Some(ratio) = props.image_aspect_ratio {
        tags.push((
            "fc:frame:image:aspect_ratio".to_string(),
            ratio.as_str().to_string(),
        ));
    }

    Ok(tags)
}

pub fn render_frame_html(props: &FrameProps) -> Result<String, DomainError> {
    let tags = frame_meta_tags(props)?;

    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"utf-8\" />\n",
    );
    html.push_str(&format!("    <title>{DOCUMENT_TITLE}</title>\n"));
    for (property, content) in &tags {
        html.push_str(&format!(
            "    <meta property=\"{}\" content=\"{}\" />\n",
            escape_attr(property),
            escape_attr(content)
        ));
    }
    html.push_str("  </head>\n</html>\n");
    Ok(html)
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Public URLs derived from the deployment's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLinks {
    base_url: String,
}

impl FrameLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_url(&self, image: &ImageDescriptor) -> String {
        let data = utf8_percent_encode(&image.to_json(), NON_ALPHANUMERIC).to_string();
        format!("{}/frames/image?data={data}", self.base_url)
    }

    /// Post URL that tells the next request which screen it comes from.
    pub fn post_url(&self, screen: Screen) -> String {
        format!("{}/frames?screen={screen}", self.base_url)
    }

    pub fn home_post_url(&self) -> String {
        format!("{}/frames", self.base_url)
    }

    pub fn frame_props(&self, descriptor: &FrameDescriptor) -> FrameProps {
        FrameProps::new(self.image_url(&descriptor.image))
            .with_buttons(descriptor.buttons.clone())
            .with_post_url(self.post_url(descriptor.screen))
    }

    pub fn home_props(&self, home_image_url: &str) -> FrameProps {
        FrameProps::new(home_image_url)
            .with_buttons(Screen::Home.buttons())
            .with_post_url(self.home_post_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag<'a>(tags: &'a [(String, String)], name: &str) -> Option<&'a str> {
        tags.iter()
            .find(|(p, _)| p == name)
            .map(|(_, c)| c.as_str())
    }

    #[test]
    fn meta_tags_include_protocol_headers_in_order() {
        let props = FrameProps::new("https://img.test/a.png")
            .with_buttons(vec!["PLAY".into()])
            .with_post_url("https://rps.test/frames");
        let tags = frame_meta_tags(&props).unwrap();

        let names: Vec<&str> = tags.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "fc:frame",
                "fc:frame:image",
                "og:image",
                "of:accepts:xmtp",
                "fc:frame:button:1",
                "of:post_url",
                "xmtp:frame:post-url",
            ]
        );
        assert_eq!(tag(&tags, "fc:frame"), Some("vNext"));
        assert_eq!(tag(&tags, "of:accepts:xmtp"), Some("2024-02-01"));
        assert_eq!(tag(&tags, "xmtp:frame:post-url"), Some("https://rps.test/frames"));
    }

    #[test]
    fn optional_tags_are_emitted_when_set() {
        let mut props = FrameProps::new("img").with_aspect_ratio(AspectRatio::Square);
        props.text_input = Some("Say hi".into());
        let tags = frame_meta_tags(&props).unwrap();
        assert_eq!(tag(&tags, "fc:frame:input:text"), Some("Say hi"));
        assert_eq!(tag(&tags, "fc:frame:image:aspect_ratio"), Some("1:1"));
        assert_eq!(tag(&tags, "of:post_url"), None);
    }

    #[test]
    fn more_than_four_buttons_is_rejected() {
        let props = FrameProps::new("img").with_buttons(vec!["b".to_string(); 5]);
        assert!(matches!(
            frame_meta_tags(&props),
            Err(DomainError::Validation(ValidationKind::TooManyButtons, _))
        ));
    }

    #[test]
    fn html_escapes_attribute_values() {
        let props = FrameProps::new("https://img.test/?a=1&b=\"2\"");
        let html = render_frame_html(&props).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(
            "<meta property=\"og:image\" content=\"https://img.test/?a=1&amp;b=&quot;2&quot;\" />"
        ));
    }

    #[test]
    fn links_trim_trailing_slash_and_encode_image_data() {
        let links = FrameLinks::new("https://rps.test/");
        assert_eq!(links.post_url(Screen::ResultNotReady), "https://rps.test/frames?screen=RESULT_NOT_READY");
        assert_eq!(links.home_post_url(), "https://rps.test/frames");

        let image = ImageDescriptor::new("c 1", "0xabc", Screen::Play);
        let url = links.image_url(&image);
        let encoded = url
            .strip_prefix("https://rps.test/frames/image?data=")
            .unwrap();
        assert!(!encoded.contains('{'));
        let decoded = percent_encoding::percent_decode_str(encoded)
            .decode_utf8()
            .unwrap();
        assert_eq!(ImageDescriptor::parse(&decoded).unwrap(), image);
    }

    #[test]
    fn frame_props_point_next_post_at_current_screen() {
        let links = FrameLinks::new("https://rps.test");
        let descriptor = FrameDescriptor::for_screen(Screen::ResultReady, "c1", "A");
        let props = links.frame_props(&descriptor);
        assert_eq!(props.buttons, vec!["PLAY AGAIN"]);
        assert_eq!(props.post_url.as_deref(), Some("https://rps.test/frames?screen=RESULT_READY"));
    }
}
