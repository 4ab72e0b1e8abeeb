//! Tests for the submission store service.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockSubmissionRepository;
use crate::domain::{ErrorCode, RawAge, SubmissionField};
use crate::outbound::memory::InMemorySubmissionRepository;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

#[fixture]
fn draft() -> SubmissionDraft {
    SubmissionDraft {
        name: Some("Ann".into()),
        email: Some("ANN@X.COM".into()),
        age: Some(RawAge::Text("30".into())),
        message: Some("hi".into()),
    }
}

fn make_store(repo: MockSubmissionRepository) -> SubmissionStore<MockSubmissionRepository> {
    SubmissionStore::new(Arc::new(repo), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn create_stamps_and_persists_valid_drafts(draft: SubmissionDraft) {
    let mut repo = MockSubmissionRepository::new();
    repo.expect_insert()
        .withf(|submission| submission.email() == "ann@x.com" && submission.age().get() == 30)
        .times(1)
        .return_once(|_| Ok(()));

    let stored = make_store(repo).create(draft).await.expect("create succeeds");

    assert_eq!(stored.name(), "Ann");
    assert_eq!(stored.created_at(), fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_drafts_without_persisting(draft: SubmissionDraft) {
    let mut repo = MockSubmissionRepository::new();
    repo.expect_insert().never();

    let invalid = SubmissionDraft {
        name: Some("   ".into()),
        ..draft
    };
    let err = make_store(repo)
        .create(invalid)
        .await
        .expect_err("blank name rejected");

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    let details = err.details().expect("field details");
    assert_eq!(details[0]["field"], SubmissionField::Name.as_str());
    assert_eq!(details[0]["code"], "empty_field");
}

#[rstest]
#[case(SubmissionPersistenceError::connection("refused"), ErrorCode::StoreUnavailable)]
#[case(SubmissionPersistenceError::query("constraint"), ErrorCode::StoreFailure)]
#[tokio::test]
async fn create_maps_repository_failures(
    draft: SubmissionDraft,
    #[case] failure: SubmissionPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockSubmissionRepository::new();
    repo.expect_insert().times(1).return_once(move |_| Err(failure));

    let err = make_store(repo)
        .create(draft)
        .await
        .expect_err("store failure surfaces");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn create_stamps_at_microsecond_precision(draft: SubmissionDraft) {
    let precise = NaiveDate::from_ymd_opt(2026, 3, 14)
        .and_then(|day| day.and_hms_nano_opt(9, 30, 0, 123_456_789))
        .expect("valid fixture time")
        .and_utc();
    let store = SubmissionStore::new(
        Arc::new(InMemorySubmissionRepository::default()),
        Arc::new(FixtureClock { utc_now: precise }),
    );

    let stored = store.create(draft).await.expect("create succeeds");
    let listed = store.list_all().await.expect("list succeeds");

    assert_eq!(stored.created_at().timestamp_subsec_nanos(), 123_456_000);
    assert_eq!(listed[0].created_at(), stored.created_at());
    assert_eq!(
        stored.created_at().to_rfc3339(),
        "2026-03-14T09:30:00.123456+00:00"
    );
}

#[rstest]
#[tokio::test]
async fn list_all_maps_connection_failures() {
    let mut repo = MockSubmissionRepository::new();
    repo.expect_list_newest_first()
        .times(1)
        .return_once(|| Err(SubmissionPersistenceError::connection("pool timed out")));

    let err = make_store(repo)
        .list_all()
        .await
        .expect_err("listing fails");

    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    assert!(err.message().contains("pool timed out"));
}

#[rstest]
#[tokio::test]
async fn created_submissions_are_listed_newest_first(draft: SubmissionDraft) {
    let store = SubmissionStore::new(
        Arc::new(InMemorySubmissionRepository::default()),
        fixture_clock(),
    );

    let mut ids = Vec::new();
    for name in ["first", "second", "third"] {
        let next = SubmissionDraft {
            name: Some(name.into()),
            ..draft.clone()
        };
        ids.push(store.create(next).await.expect("create succeeds").id());
    }

    let listed = store.list_all().await.expect("list succeeds");
    let listed_ids: Vec<_> = listed.iter().map(Submission::id).collect();
    ids.reverse();
    assert_eq!(listed_ids, ids);

    let again = store.list_all().await.expect("second list succeeds");
    assert_eq!(again, listed);
}

#[rstest]
#[tokio::test]
async fn empty_store_lists_nothing() {
    let store = SubmissionStore::new(
        Arc::new(InMemorySubmissionRepository::default()),
        fixture_clock(),
    );

    assert!(store.list_all().await.expect("list succeeds").is_empty());
}
