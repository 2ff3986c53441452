use actix_web::{web, App, HttpServer};
use rps_frames::config::Config;
use rps_frames::infra::state::build_state;
use rps_frames::middleware::request_trace::RequestTrace;
use rps_frames::middleware::structured_logger::StructuredLogger;
use rps_frames::middleware::trace_span::TraceSpan;
use rps_frames::routes;
use rps_frames::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting rps-frames on http://{}:{} (public {}, store {})",
        config.host,
        config.port,
        config.domain_url,
        config.store_kind()
    );

    let app_state = match build_state().with_config(&config).build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
