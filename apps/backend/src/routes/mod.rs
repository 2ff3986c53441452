use actix_web::web;

pub mod frames;
pub mod health;

/// Register every route. `main.rs` adds the tracing middleware around this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(frames::configure_routes)
        .configure(health::configure_routes);
}
