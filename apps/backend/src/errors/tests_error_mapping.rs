// Unit tests for error mapping - pure domain logic without HTTP or store dependencies
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let de = DomainError::validation(ValidationKind::InvalidButtonIndex, "button 7");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidButtonIndex);
    assert_eq!(app.status().as_u16(), 400);
    assert!(app.is_bad_input());

    let other = DomainError::validation(ValidationKind::Other("X".into()), "bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "STORE_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::StoreUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "STORE_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let lock = DomainError::infra(InfraErrorKind::LockContention, "busy");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "LOCK_CONTENTION");
    assert!(!app.is_bad_input());

    let corr = DomainError::infra(InfraErrorKind::DataCorruption, "bad");
    let app: AppError = corr.into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "STORE_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn only_timeouts_and_unavailable_store_are_transient() {
    let cases = [
        (InfraErrorKind::Timeout, true),
        (InfraErrorKind::StoreUnavailable, true),
        (InfraErrorKind::DataCorruption, false),
        (InfraErrorKind::LockContention, false),
        (InfraErrorKind::Other("EVAL".to_string()), false),
    ];
    for (kind, expected) in cases {
        let err = DomainError::infra(kind.clone(), "x");
        assert_eq!(err.is_transient(), expected, "{kind:?}");
    }

    assert!(!DomainError::validation(ValidationKind::InvalidAction, "v").is_transient());
}
