use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use rps_frames::errors::domain::{DomainError, InfraErrorKind};
use rps_frames::{AppError, ErrorCode, RequestTrace};

mod common;

async fn invalid_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::invalid(ErrorCode::InvalidScreen, "Example failure"))
}

async fn store_down_handler() -> Result<HttpResponse, AppError> {
    Err(DomainError::infra(InfraErrorKind::StoreUnavailable, "redis refused connection").into())
}

async fn lock_handler() -> Result<HttpResponse, AppError> {
    Err(DomainError::infra(InfraErrorKind::LockContention, "lock busy").into())
}

#[actix_web::test]
async fn problem_details_shape_and_trace_parity() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/error", web::get().to(invalid_handler)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/_test/error").to_request()).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let problem = assert_problem_details_from_service_response(
        resp,
        "INVALID_SCREEN",
        StatusCode::BAD_REQUEST,
        Some("Example failure"),
    )
    .await;

    assert_eq!(problem.trace_id, request_id);
    assert_eq!(problem.title, "Invalid Screen");
    assert_eq!(problem.type_, "https://rps-frames.app/errors/INVALID_SCREEN");
}

#[actix_web::test]
async fn store_failures_map_to_server_errors() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/store", web::get().to(store_down_handler))
            .route("/_test/lock", web::get().to(lock_handler)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/_test/store").to_request()).await;
    assert_problem_details_from_service_response(
        resp,
        "STORE_UNAVAILABLE",
        StatusCode::SERVICE_UNAVAILABLE,
        Some("refused"),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/_test/lock").to_request()).await;
    assert_problem_details_from_service_response(
        resp,
        "LOCK_CONTENTION",
        StatusCode::GATEWAY_TIMEOUT,
        None,
    )
    .await;
}
