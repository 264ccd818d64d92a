use std::sync::atomic::Ordering;

use uuid::Uuid;

use tvlink_dashboard::error::DashboardError;
use tvlink_dashboard::usecase::activate::{ActivateUseCase, NO_ACTIVE_COOKIES};
use tvlink_domain::activation::{ActivationMethod, ActivationOutcome};

use crate::helpers::{MockAttemptRepo, MockCookieSetRepo, MockDeviceLink, test_cookie_set};

#[tokio::test]
async fn should_reject_malformed_codes_before_any_outbound_call() {
    let visitor = Uuid::new_v4();
    let link = MockDeviceLink::answering(ActivationOutcome::Activated, "linked");
    let calls = link.calls_handle();
    let attempts = MockAttemptRepo::empty();
    let log = attempts.attempts_handle();

    let uc = ActivateUseCase {
        cookie_sets: MockCookieSetRepo::new(vec![test_cookie_set(visitor, true)]),
        attempts,
        link,
    };

    for raw in ["123", "123456789", "12a456", "", "   "] {
        let result = uc.execute(visitor, raw, ActivationMethod::Manual).await;
        assert!(
            matches!(result, Err(DashboardError::InvalidCode(_))),
            "expected InvalidCode for {raw:?}"
        );
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0, "link must not be called");
    assert!(log.lock().unwrap().is_empty(), "no history for invalid codes");
}

#[tokio::test]
async fn should_reject_and_log_when_no_active_cookie_set() {
    let visitor = Uuid::new_v4();
    let link = MockDeviceLink::answering(ActivationOutcome::Activated, "linked");
    let calls = link.calls_handle();
    let attempts = MockAttemptRepo::empty();
    let log = attempts.attempts_handle();

    let uc = ActivateUseCase {
        // Another visitor's active set must not be used.
        cookie_sets: MockCookieSetRepo::new(vec![test_cookie_set(Uuid::new_v4(), true)]),
        attempts,
        link,
    };

    let output = uc
        .execute(visitor, "123456", ActivationMethod::Manual)
        .await
        .unwrap();

    assert_eq!(output.report.outcome, ActivationOutcome::Rejected);
    assert_eq!(output.report.message, NO_ACTIVE_COOKIES);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert!(!log[0].success());
}

#[tokio::test]
async fn should_log_trimmed_code_and_method_on_success() {
    let visitor = Uuid::new_v4();
    let link = MockDeviceLink::answering(ActivationOutcome::Ambiguous, "pending confirmation");
    let calls = link.calls_handle();
    let attempts = MockAttemptRepo::empty();
    let log = attempts.attempts_handle();

    let uc = ActivateUseCase {
        cookie_sets: MockCookieSetRepo::new(vec![test_cookie_set(visitor, true)]),
        attempts,
        link,
    };

    let output = uc
        .execute(visitor, " 51694797 ", ActivationMethod::Upload)
        .await
        .unwrap();

    assert_eq!(output.code.as_str(), "51694797");
    assert!(output.report.is_success(), "ambiguous counts as success");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].code, "51694797");
    assert_eq!(log[0].method, ActivationMethod::Upload);
    assert_eq!(log[0].outcome, ActivationOutcome::Ambiguous);
    assert_eq!(log[0].message, "pending confirmation");
    assert_eq!(log[0].visitor_id, visitor);
}
