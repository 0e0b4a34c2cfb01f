mod common;

use backoffice_backend::errors::{InternalError, LifecycleError};
use backoffice_backend::services::{ArchivableStore, LifecycleManager, LifecyclePolicy};
use backoffice_backend::stores::{InstallmentPayload, InstallmentStore, UserStore};
use backoffice_backend::types::internal::Role;

use common::{create_user, session_user, setup_test_db};

fn payload(installment_id: &str) -> InstallmentPayload {
    InstallmentPayload {
        order_number: "ORD-2001".to_string(),
        installment_id: installment_id.to_string(),
        is_added_to_magento: false,
        cardholder_name: None,
        cardholder_phone_number: None,
        cardholder_mother_name: None,
        notes: None,
    }
}

async fn setup() -> (
    LifecycleManager<InstallmentStore>,
    backoffice_backend::types::internal::SessionUser,
) {
    let db = setup_test_db().await;
    let users = UserStore::new(db.clone());
    let actor = create_user(&users, "mod@example.com", Role::Moderator, false).await;
    let manager = LifecycleManager::new(
        InstallmentStore::new(db),
        LifecyclePolicy::hard_delete_only(),
    );
    (manager, session_user(&actor))
}

#[tokio::test]
async fn create_and_update_round_trip() {
    let (manager, actor) = setup().await;
    let record = manager.create(payload("INST-1"), &actor).await.unwrap();
    assert_eq!(record.installment_id, "INST-1");
    assert!(!record.is_added_to_magento);

    let mut changed = payload("INST-1");
    changed.is_added_to_magento = true;
    changed.cardholder_name = Some("A. Cardholder".to_string());
    let updated = manager.update(record.id, changed, &actor).await.unwrap();
    assert!(updated.is_added_to_magento);
    assert_eq!(updated.cardholder_name.as_deref(), Some("A. Cardholder"));
}

#[tokio::test]
async fn duplicate_installment_id_is_a_validation_error() {
    let (manager, actor) = setup().await;
    manager.create(payload("INST-1"), &actor).await.unwrap();

    let err = manager.create(payload("INST-1"), &actor).await.unwrap_err();
    assert!(matches!(
        err,
        InternalError::Lifecycle(LifecycleError::DuplicateUnique { .. })
    ));
}

#[tokio::test]
async fn hard_delete_removes_the_record() {
    let (manager, actor) = setup().await;
    let record = manager.create(payload("INST-1"), &actor).await.unwrap();

    manager.hard_delete(record.id, &actor).await.unwrap();
    assert!(manager.store().fetch(record.id).await.unwrap().is_none());
}

#[tokio::test]
async fn hard_delete_missing_record_is_not_found() {
    let (manager, actor) = setup().await;
    let err = manager.hard_delete(404, &actor).await.unwrap_err();
    assert!(matches!(
        err,
        InternalError::Lifecycle(LifecycleError::NotFound(404))
    ));
}

#[tokio::test]
async fn archive_is_not_available_for_installments() {
    let (manager, actor) = setup().await;
    let record = manager.create(payload("INST-1"), &actor).await.unwrap();

    let err = manager.archive(record.id, &actor).await.unwrap_err();
    assert!(matches!(
        err,
        InternalError::Lifecycle(LifecycleError::ArchiveUnsupported)
    ));

    let err = manager
        .unarchive(record.id, &actor, "a long enough note")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Lifecycle(LifecycleError::ArchiveUnsupported)
    ));
}

#[tokio::test]
async fn bulk_delete_clears_the_table() {
    let (manager, actor) = setup().await;
    for n in 0..3 {
        manager
            .create(payload(&format!("INST-{}", n)), &actor)
            .await
            .unwrap();
    }

    let count = manager.store().delete_all().await.unwrap();
    assert_eq!(count, 3);
    assert!(manager.store().list().await.unwrap().is_empty());
}
