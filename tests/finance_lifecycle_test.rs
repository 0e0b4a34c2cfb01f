mod common;

use backoffice_backend::errors::{InternalError, LifecycleError};
use backoffice_backend::services::{LifecycleManager, LifecyclePolicy};
use backoffice_backend::stores::{FinancePayload, FinanceStore, UserStore};
use backoffice_backend::types::internal::Role;

use common::{create_user, session_user, setup_test_db};

fn payload(customer: &str, notes: Option<&str>) -> FinancePayload {
    FinancePayload {
        phone_number: "07700900000".to_string(),
        order_number: Some("ORD-1001".to_string()),
        customer_name: customer.to_string(),
        payment_method: "Cash on Delivery".to_string(),
        amount: "149.99".to_string(),
        status: "pending".to_string(),
        notes: notes.map(str::to_string),
    }
}

async fn setup() -> (
    LifecycleManager<FinanceStore>,
    backoffice_backend::types::internal::SessionUser,
) {
    let db = setup_test_db().await;
    let users = UserStore::new(db.clone());
    let actor = create_user(&users, "clerk@example.com", Role::User, true).await;
    let manager = LifecycleManager::new(FinanceStore::new(db), LifecyclePolicy::archive_only());
    (manager, session_user(&actor))
}

#[tokio::test]
async fn create_starts_active_with_audit_stamps() {
    let (manager, actor) = setup().await;
    let record = manager
        .create(payload("Amal", None), &actor)
        .await
        .unwrap();

    assert!(!record.is_archived);
    assert!(record.archived_at.is_none());
    assert!(record.archived_by.is_none());
    assert_eq!(record.created_by, actor.id);
    assert_eq!(record.updated_by, actor.id);
    assert_eq!(record.created_at, record.updated_at);
}

#[tokio::test]
async fn archive_moves_record_between_listings() {
    let (manager, actor) = setup().await;
    let record = manager.create(payload("Amal", None), &actor).await.unwrap();

    let archived = manager.archive(record.id, &actor).await.unwrap();
    assert!(archived.is_archived);
    assert!(archived.archived_at.is_some());
    assert_eq!(archived.archived_by, Some(actor.id));

    let active = manager.store().list(false).await.unwrap();
    assert!(active.is_empty());

    let archived_listing = manager.store().list(true).await.unwrap();
    assert_eq!(archived_listing.len(), 1);
    assert_eq!(archived_listing[0].id, record.id);
}

#[tokio::test]
async fn unarchive_restores_and_appends_attributed_note() {
    let (manager, actor) = setup().await;
    let record = manager
        .create(payload("Amal", Some("original context")), &actor)
        .await
        .unwrap();
    manager.archive(record.id, &actor).await.unwrap();

    let restored = manager
        .unarchive(record.id, &actor, "Customer complaint resolved")
        .await
        .unwrap();

    assert!(!restored.is_archived);
    assert!(restored.archived_at.is_none());
    assert!(restored.archived_by.is_none());

    let notes = restored.notes.unwrap();
    assert!(notes.starts_with("original context"));
    assert!(notes.contains("[UNARCHIVED on "));
    assert!(notes.ends_with("]: Customer complaint resolved"));

    // Back in the active listing
    let active = manager.store().list(false).await.unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn short_note_rejected_and_record_stays_archived() {
    let (manager, actor) = setup().await;
    let record = manager.create(payload("Amal", None), &actor).await.unwrap();
    manager.archive(record.id, &actor).await.unwrap();

    let err = manager
        .unarchive(record.id, &actor, "   too few  ")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Lifecycle(LifecycleError::NoteTooShort { minimum: 10 })
    ));

    let archived = manager.store().list(true).await.unwrap();
    assert_eq!(archived.len(), 1);
    assert!(archived[0].is_archived);
}

#[tokio::test]
async fn finance_records_stay_editable_while_archived() {
    let (manager, actor) = setup().await;
    let record = manager.create(payload("Amal", None), &actor).await.unwrap();
    manager.archive(record.id, &actor).await.unwrap();

    let updated = manager
        .update(record.id, payload("Amal Updated", None), &actor)
        .await
        .unwrap();
    assert_eq!(updated.customer_name, "Amal Updated");
    assert!(updated.is_archived);
}

#[tokio::test]
async fn edits_never_strip_the_unarchive_line() {
    let (manager, actor) = setup().await;
    let record = manager.create(payload("Amal", None), &actor).await.unwrap();
    manager.archive(record.id, &actor).await.unwrap();
    manager
        .unarchive(record.id, &actor, "restored after review")
        .await
        .unwrap();

    // A later edit replaces the notes wholesale; the unarchive line survives
    let updated = manager
        .update(record.id, payload("Amal", Some("fresh notes")), &actor)
        .await
        .unwrap();
    let notes = updated.notes.unwrap();
    assert!(notes.starts_with("fresh notes"));
    assert!(notes.contains("]: restored after review"));
}

#[tokio::test]
async fn hard_delete_is_not_available_for_finance() {
    let (manager, actor) = setup().await;
    let record = manager.create(payload("Amal", None), &actor).await.unwrap();

    let err = manager.hard_delete(record.id, &actor).await.unwrap_err();
    assert!(matches!(
        err,
        InternalError::Lifecycle(LifecycleError::HardDeleteUnsupported)
    ));
}

#[tokio::test]
async fn update_restamps_updated_by_but_not_created_by() {
    let db = setup_test_db().await;
    let users = UserStore::new(db.clone());
    let creator = session_user(&create_user(&users, "a@example.com", Role::User, true).await);
    let editor = session_user(&create_user(&users, "b@example.com", Role::User, true).await);
    let manager = LifecycleManager::new(FinanceStore::new(db), LifecyclePolicy::archive_only());

    let record = manager.create(payload("Amal", None), &creator).await.unwrap();
    let updated = manager
        .update(record.id, payload("Amal", None), &editor)
        .await
        .unwrap();

    assert_eq!(updated.created_by, creator.id);
    assert_eq!(updated.updated_by, editor.id);
}
