use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    store: String,
    store_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let store = app_state.store();
    let (store_status, store_error) = match store.ping().await {
        Ok(()) => ("ok".to_string(), None),
        Err(e) => {
            warn!(error = %e, "Store health check failed");
            ("error".to_string(), Some(e.to_string()))
        }
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version,
        store: store_status,
        store_kind: store.kind().to_string(),
        store_error,
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
