//! Frame endpoints: home document, action posts, and image data.

use actix_web::{http::header::ContentType, web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::domain::Screen;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::logging::pii::Redacted;
use crate::protocol::{render_frame_html, FramePost, ImageDescriptor};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct ScreenQuery {
    screen: Option<String>,
}

impl ScreenQuery {
    /// The screen the action was posted from; absent means HOME.
    fn previous(&self) -> Result<Screen, AppError> {
        match self.screen.as_deref() {
            None | Some("") => Ok(Screen::Home),
            Some(raw) => Ok(raw.parse::<Screen>()?),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageQuery {
    data: Option<String>,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

async fn home(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let props = app_state.links().home_props(app_state.home_image_url());
    Ok(html(render_frame_html(&props)?))
}

async fn post_frame(
    app_state: web::Data<AppState>,
    query: web::Query<ScreenQuery>,
    body: ValidatedJson<FramePost>,
) -> Result<HttpResponse, AppError> {
    let previous = query.previous()?;
    body.require_xmtp()?;

    let action = app_state.verifier().verify(&body).await?;
    let descriptor = app_state.frames().next_frame(previous, &action).await?;

    info!(
        player = %Redacted(action.player()),
        from = %previous,
        to = %descriptor.screen,
        "Frame action handled"
    );

    let props = app_state.links().frame_props(&descriptor);
    Ok(html(render_frame_html(&props)?))
}

async fn image_data(
    app_state: web::Data<AppState>,
    query: web::Query<ImageQuery>,
) -> Result<HttpResponse, AppError> {
    let data = query
        .data
        .as_deref()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::bad_request(ErrorCode::BadRequest, "Missing data parameter"))?;
    let image = ImageDescriptor::parse(data)?;

    let render = app_state
        .engine()
        .render_data(&image.conversation_id, &image.player_address, image.screen)
        .await?;
    Ok(HttpResponse::Ok().json(render))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/frames", web::post().to(post_frame))
        .route("/frames/image", web::get().to(image_data));
}
