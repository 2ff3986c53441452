#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::{json, Value};

// Logging is auto-installed for every test binary that declares `mod common`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Initialized actix test service over the production routes and middleware.
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(rps_frames::StructuredLogger)
                .wrap(rps_frames::TraceSpan)
                .wrap(rps_frames::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(rps_frames::routes::configure),
        )
        .await
    };
}

/// Frame POST body as a verifying gateway would forward it.
pub fn frame_post(player: &str, conversation_id: &str, button_index: u32) -> Value {
    json!({
        "clientProtocol": "xmtp@2024-02-01",
        "untrustedData": { "buttonIndex": button_index },
        "verifiedWalletAddress": player,
        "actionBody": {
            "opaqueConversationIdentifier": conversation_id,
            "buttonIndex": button_index,
            "frameUrl": "http://localhost:3001/frames"
        }
    })
}

pub fn post_uri(screen: Option<&str>) -> String {
    match screen {
        Some(screen) => format!("/frames?screen={screen}"),
        None => "/frames".to_string(),
    }
}

pub async fn body_string(resp: ServiceResponse<BoxBody>) -> String {
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).expect("body should be UTF-8")
}

/// Content of the `<meta property="{property}">` tag in a frame document.
pub fn meta_content<'a>(html: &'a str, property: &str) -> Option<&'a str> {
    let marker = format!("<meta property=\"{property}\" content=\"");
    let start = html.find(&marker)? + marker.len();
    let end = html[start..].find('"')?;
    Some(&html[start..start + end])
}

/// Screen the next post will come from, read back out of `of:post_url`.
pub fn next_screen(html: &str) -> Option<&str> {
    let post_url = meta_content(html, "of:post_url")?;
    post_url.split("screen=").nth(1)
}
