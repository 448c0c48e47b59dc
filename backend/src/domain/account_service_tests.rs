//! Tests for the account service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::PasswordDigest;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository, UserPersistenceError};
use crate::domain::test_fixtures::{fixture_clock, user};

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
) -> AccountService<MockUserRepository> {
    AccountService::new(Arc::new(users), Arc::new(hasher), fixture_clock())
}

fn registration() -> Registration {
    Registration::try_from_parts("Ada", "Ada@Example.com", "correct-horse").expect("valid")
}

#[tokio::test]
async fn register_hashes_and_stores_the_account() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().times(1).return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|user| {
            user.email().as_str() == "ada@example.com"
                && user.password().as_str() == "hashed"
                && user.display_name().as_str() == "Ada"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password == "correct-horse")
        .times(1)
        .return_once(|_| Ok(PasswordDigest::new("hashed")));

    let profile = service(users, hasher)
        .register(&registration())
        .await
        .expect("registration succeeds");

    assert_eq!(profile.email.as_str(), "ada@example.com");
}

#[tokio::test]
async fn register_rejects_taken_email_before_hashing() {
    let existing = user("Ada");
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(existing)));
    users.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let error = service(users, hasher)
        .register(&registration())
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn register_maps_racing_duplicate_to_conflict() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordDigest::new("hashed")));

    let error = service(users, hasher)
        .register(&registration())
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(None, true)]
#[case(Some(false), true)]
#[case(Some(true), false)]
#[tokio::test]
async fn authenticate_fails_generically(
    #[case] password_matches: Option<bool>,
    #[case] should_fail: bool,
) {
    let account = user("Ada");
    let mut users = MockUserRepository::new();
    let found = password_matches.map(|_| account.clone());
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(found));
    let mut hasher = MockPasswordHasher::new();
    if let Some(matches) = password_matches {
        hasher.expect_verify().return_once(move |_, _| Ok(matches));
    }

    let credentials = LoginCredentials::try_from_parts("ada@example.com", "pw").expect("valid");
    let result = service(users, hasher).authenticate(&credentials).await;

    match (should_fail, result) {
        (true, Err(err)) => {
            assert_eq!(err.code(), ErrorCode::Unauthorized);
            assert_eq!(err.message(), INVALID_CREDENTIALS);
        }
        (false, Ok(profile)) => assert_eq!(profile.id, *account.id()),
        (_, other) => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn authenticate_rejects_malformed_email_without_lookup() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().times(0);
    let credentials = LoginCredentials::try_from_parts("not-an-email", "pw").expect("valid");

    let error = service(users, MockPasswordHasher::new())
        .authenticate(&credentials)
        .await
        .expect_err("malformed email");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn update_profile_without_name_keeps_existing_value() {
    let account = user("Ada");
    let id = *account.id();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(account)));
    users.expect_update().times(0);

    let profile = service(users, MockPasswordHasher::new())
        .update_profile(&id, None)
        .await
        .expect("profile read");

    assert_eq!(profile.display_name.as_str(), "Ada");
}

#[tokio::test]
async fn update_profile_renames_the_caller() {
    let account = user("Ada");
    let id = *account.id();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(account)));
    users
        .expect_update()
        .withf(|user| user.display_name().as_str() == "Countess")
        .times(1)
        .return_once(|_| Ok(()));

    let profile = service(users, MockPasswordHasher::new())
        .update_profile(&id, Some(DisplayName::new("Countess").expect("valid")))
        .await
        .expect("profile updated");

    assert_eq!(profile.display_name.as_str(), "Countess");
}

#[tokio::test]
async fn update_profile_of_missing_caller_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(users, MockPasswordHasher::new())
        .update_profile(&UserId::random(), None)
        .await
        .expect_err("missing caller");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_users_excludes_the_caller() {
    let caller = user("Ada");
    let caller_id = *caller.id();
    let others = vec![user("Brian"), user("Chen")];
    let mut users = MockUserRepository::new();
    users
        .expect_list_except()
        .withf(move |excluded| *excluded == caller_id)
        .return_once(move |_| Ok(others));

    let listed = service(users, MockPasswordHasher::new())
        .list_users(&caller_id)
        .await
        .expect("listing succeeds");

    let names: Vec<_> = listed.iter().map(|p| p.display_name.as_str()).collect();
    assert_eq!(names, ["Brian", "Chen"]);
}

#[tokio::test]
async fn storage_failures_surface_as_internal_errors() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));

    let error = service(users, MockPasswordHasher::new())
        .me(&UserId::random())
        .await
        .expect_err("storage failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
