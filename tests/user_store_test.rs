mod common;

use backoffice_backend::errors::{InternalError, UserError};
use backoffice_backend::services::SessionService;
use backoffice_backend::stores::{NewUser, UserChanges, UserStore};
use backoffice_backend::types::internal::Role;

use common::{create_user, setup_test_db};

#[tokio::test]
async fn create_and_find_round_trip() {
    let store = UserStore::new(setup_test_db().await);
    let created = create_user(&store, "alice@example.com", Role::Moderator, false).await;

    let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "alice@example.com");
    assert_eq!(by_id.role, "moderator");

    let by_email = store.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);

    // Email lookup is case-sensitive as stored
    assert!(store.find_by_email("Alice@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn password_digest_is_never_the_plaintext() {
    let store = UserStore::new(setup_test_db().await);
    let created = create_user(&store, "bob@example.com", Role::User, false).await;
    assert_ne!(created.password_hash, "test-password");
    assert!(created.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn is_usable_mirrors_deactivation_stamp() {
    let store = UserStore::new(setup_test_db().await);
    let admin = create_user(&store, "admin@example.com", Role::Admin, false).await;
    let target = create_user(&store, "target@example.com", Role::User, false).await;

    assert!(UserStore::is_usable(&target));

    let deactivated = store.deactivate(target.id, admin.id).await.unwrap();
    assert!(!UserStore::is_usable(&deactivated));
    assert!(deactivated.deactivated_at.is_some());
    assert_eq!(deactivated.deactivated_by, Some(admin.id));
}

#[tokio::test]
async fn self_deactivation_fails_and_mutates_nothing() {
    let store = UserStore::new(setup_test_db().await);
    let admin = create_user(&store, "admin@example.com", Role::Admin, false).await;

    let err = store.deactivate(admin.id, admin.id).await.unwrap_err();
    assert!(matches!(
        err,
        InternalError::User(UserError::SelfDeactivation)
    ));

    let unchanged = store.find_by_id(admin.id).await.unwrap().unwrap();
    assert!(unchanged.deactivated_at.is_none());
    assert!(unchanged.deactivated_by.is_none());
}

#[tokio::test]
async fn deactivated_users_hidden_from_default_listing() {
    let store = UserStore::new(setup_test_db().await);
    let admin = create_user(&store, "admin@example.com", Role::Admin, false).await;
    let target = create_user(&store, "target@example.com", Role::User, false).await;
    store.deactivate(target.id, admin.id).await.unwrap();

    let active = store.list(false).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, admin.id);

    let all = store.list(true).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn deactivation_cuts_off_outstanding_session_tokens() {
    let store = UserStore::new(setup_test_db().await);
    let admin = create_user(&store, "admin@example.com", Role::Admin, false).await;
    let target = create_user(&store, "target@example.com", Role::User, false).await;

    let sessions = SessionService::new("test-secret-key-minimum-32-chars!!");
    let token = sessions.issue(target.id);

    // Token resolves and the subject is live
    let resolved = sessions.resolve(&token).unwrap();
    assert!(store
        .find_session_subject(resolved.user_id)
        .await
        .unwrap()
        .is_some());

    store.deactivate(target.id, admin.id).await.unwrap();

    // The token itself still verifies, but the subject is gone on the very
    // next request
    let resolved = sessions.resolve(&token).unwrap();
    assert!(store
        .find_session_subject(resolved.user_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_email_rejected_even_when_concurrent() {
    let store = UserStore::new(setup_test_db().await);

    let new_user = |n: u32| NewUser {
        email: "same@example.com".to_string(),
        password: format!("password-{}", n),
        full_name: format!("User {}", n),
        role: Role::User,
        has_finance_access: false,
    };

    let (a, b) = tokio::join!(store.create(new_user(1)), store.create(new_user(2)));
    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);

    let failure = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(
        failure,
        InternalError::User(UserError::DuplicateEmail(_))
    ));
}

#[tokio::test]
async fn deactivated_users_email_stays_reserved() {
    let store = UserStore::new(setup_test_db().await);
    let admin = create_user(&store, "admin@example.com", Role::Admin, false).await;
    let target = create_user(&store, "taken@example.com", Role::User, false).await;
    store.deactivate(target.id, admin.id).await.unwrap();

    let err = store
        .create(NewUser {
            email: "taken@example.com".to_string(),
            password: "password".to_string(),
            full_name: "Newcomer".to_string(),
            role: Role::User,
            has_finance_access: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::User(UserError::DuplicateEmail(_))
    ));
}

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let store = UserStore::new(setup_test_db().await);
    let user = create_user(&store, "carol@example.com", Role::User, false).await;

    let updated = store
        .update(
            user.id,
            UserChanges {
                full_name: Some("Carol Renamed".to_string()),
                has_finance_access: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.full_name, "Carol Renamed");
    assert!(updated.has_finance_access);
    assert_eq!(updated.email, "carol@example.com");
    assert_eq!(updated.role, "user");
    assert_eq!(updated.password_hash, user.password_hash);
}

#[tokio::test]
async fn login_verification_is_uniform_for_deactivated_users() {
    let store = UserStore::new(setup_test_db().await);
    let admin = create_user(&store, "admin@example.com", Role::Admin, false).await;
    let target = create_user(&store, "target@example.com", Role::User, false).await;
    store.deactivate(target.id, admin.id).await.unwrap();

    // Correct credentials, deactivated account: indistinguishable from a
    // wrong password
    let result = store
        .verify_credentials("target@example.com", "test-password")
        .await
        .unwrap();
    assert!(result.is_none());
}
