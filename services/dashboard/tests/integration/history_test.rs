use uuid::Uuid;

use tvlink_dashboard::usecase::history::{GetHistoryUseCase, HISTORY_LIMIT};

use crate::helpers::{MockAttemptRepo, test_attempt};

#[tokio::test]
async fn should_return_newest_twenty_with_full_total() {
    let visitor = Uuid::new_v4();
    let mut attempts: Vec<_> = (0..25).map(|age| test_attempt(visitor, age)).collect();
    attempts.push(test_attempt(Uuid::new_v4(), 0));
    let uc = GetHistoryUseCase {
        repo: MockAttemptRepo::new(attempts),
    };

    let output = uc.execute(visitor).await.unwrap();

    assert_eq!(output.attempts.len(), HISTORY_LIMIT as usize);
    assert_eq!(output.total, 25);
    assert_eq!(output.attempts[0].message, "attempt 0");
    assert!(
        output
            .attempts
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at),
        "newest first"
    );
}

#[tokio::test]
async fn should_return_empty_history_for_new_visitor() {
    let uc = GetHistoryUseCase {
        repo: MockAttemptRepo::empty(),
    };
    let output = uc.execute(Uuid::new_v4()).await.unwrap();
    assert!(output.attempts.is_empty());
    assert_eq!(output.total, 0);
}
