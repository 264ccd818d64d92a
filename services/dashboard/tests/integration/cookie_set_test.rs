use uuid::Uuid;

use tvlink_dashboard::error::DashboardError;
use tvlink_dashboard::usecase::cookie_set::{
    ActivateCookieSetUseCase, DeleteCookieSetUseCase, ListCookieSetsUseCase,
    UploadCookieSetInput, UploadCookieSetUseCase, ValidateCookieSetUseCase,
};
use tvlink_domain::activation::{SessionCheck, ValidationStatus};
use tvlink_domain::cookie::CookieInput;

use crate::helpers::{MockCookieSetRepo, MockSessionCheck, test_cookie_set};

#[tokio::test]
async fn should_keep_exactly_one_active_set_per_visitor() {
    let visitor = Uuid::new_v4();
    let other = test_cookie_set(Uuid::new_v4(), true);
    let repo = MockCookieSetRepo::new(vec![other.clone()]);
    let handle = repo.sets_handle();
    let uc = UploadCookieSetUseCase { repo };

    let first = uc
        .execute(
            visitor,
            UploadCookieSetInput {
                raw: CookieInput::Text(r#"{"NetflixId":"a","SecureNetflixId":"b"}"#.to_owned()),
                filename: Some("first.json".to_owned()),
            },
        )
        .await
        .unwrap();
    let second = uc
        .execute(
            visitor,
            UploadCookieSetInput {
                raw: CookieInput::Text(".netflix.com\tTRUE\t/\tTRUE\t0\tNetflixId\tz".to_owned()),
                filename: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(first.cookie_count, 2);
    assert_eq!(second.cookie_count, 1);

    let sets = handle.lock().unwrap();
    let mine: Vec<_> = sets.iter().filter(|s| s.visitor_id == visitor).collect();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine.iter().filter(|s| s.active).count(), 1);
    let active = mine.iter().find(|s| s.active).unwrap();
    assert_eq!(active.id, second.id);
    assert_eq!(active.filename, "unknown");
    assert!(active.label.starts_with("Cookie_"));

    // Other visitors are untouched.
    assert!(sets.iter().find(|s| s.id == other.id).unwrap().active);
}

#[tokio::test]
async fn should_reject_unparseable_upload_without_storing() {
    let repo = MockCookieSetRepo::empty();
    let handle = repo.sets_handle();
    let uc = UploadCookieSetUseCase { repo };

    let result = uc
        .execute(
            Uuid::new_v4(),
            UploadCookieSetInput {
                raw: CookieInput::Text("just some words".to_owned()),
                filename: None,
            },
        )
        .await;

    assert!(matches!(result, Err(DashboardError::UnparseableCookies(_))));
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_delete_another_visitors_set() {
    let owner = Uuid::new_v4();
    let set = test_cookie_set(owner, true);
    let repo = MockCookieSetRepo::new(vec![set.clone()]);
    let handle = repo.sets_handle();
    let uc = DeleteCookieSetUseCase { repo };

    let result = uc.execute(Uuid::new_v4(), set.id).await;

    assert!(matches!(result, Err(DashboardError::CookieSetNotFound)));
    assert_eq!(handle.lock().unwrap().len(), 1, "row must survive");

    uc.execute(owner, set.id).await.unwrap();
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_switch_active_set_only_for_owner() {
    let visitor = Uuid::new_v4();
    let old = test_cookie_set(visitor, true);
    let target = test_cookie_set(visitor, false);
    let repo = MockCookieSetRepo::new(vec![old.clone(), target.clone()]);
    let handle = repo.sets_handle();
    let uc = ActivateCookieSetUseCase { repo };

    let result = uc.execute(Uuid::new_v4(), target.id).await;
    assert!(matches!(result, Err(DashboardError::CookieSetNotFound)));
    assert!(handle.lock().unwrap().iter().find(|s| s.id == old.id).unwrap().active);

    uc.execute(visitor, target.id).await.unwrap();
    let sets = handle.lock().unwrap();
    assert!(!sets.iter().find(|s| s.id == old.id).unwrap().active);
    assert!(sets.iter().find(|s| s.id == target.id).unwrap().active);
}

#[tokio::test]
async fn should_store_validation_result() {
    let visitor = Uuid::new_v4();
    let set = test_cookie_set(visitor, true);
    let repo = MockCookieSetRepo::new(vec![set.clone()]);
    let handle = repo.sets_handle();
    let uc = ValidateCookieSetUseCase {
        repo,
        checker: MockSessionCheck {
            check: SessionCheck {
                ok: true,
                plan: Some("Premium".to_owned()),
                country: None,
                member_since: None,
                err: None,
            },
        },
    };

    let check = uc.execute(visitor, set.id).await.unwrap();

    assert!(check.ok);
    assert_eq!(check.plan.as_deref(), Some("Premium"));
    assert_eq!(check.country.as_deref(), Some("Unknown"));
    assert_eq!(
        handle.lock().unwrap()[0].validation_status,
        ValidationStatus::Valid
    );
}

#[tokio::test]
async fn should_mark_invalid_on_failed_check() {
    let visitor = Uuid::new_v4();
    let set = test_cookie_set(visitor, true);
    let repo = MockCookieSetRepo::new(vec![set.clone()]);
    let handle = repo.sets_handle();
    let uc = ValidateCookieSetUseCase {
        repo,
        checker: MockSessionCheck {
            check: SessionCheck::failed("HTTP 403"),
        },
    };

    let check = uc.execute(visitor, set.id).await.unwrap();
    assert!(!check.ok);
    assert_eq!(
        handle.lock().unwrap()[0].validation_status,
        ValidationStatus::Invalid
    );

    let missing = uc.execute(Uuid::new_v4(), set.id).await;
    assert!(matches!(missing, Err(DashboardError::CookieSetNotFound)));
}

#[tokio::test]
async fn should_list_only_own_sets() {
    let visitor = Uuid::new_v4();
    let repo = MockCookieSetRepo::new(vec![
        test_cookie_set(visitor, true),
        test_cookie_set(Uuid::new_v4(), true),
    ]);
    let uc = ListCookieSetsUseCase { repo };

    let sets = uc.execute(visitor).await.unwrap();
    assert_eq!(sets.len(), 1);
}
