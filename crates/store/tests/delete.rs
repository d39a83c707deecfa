//! Integration tests for delete, which carries the same authorization as put

mod common;

use ::common::authorize::{DenyReason, Identity};
use ::common::records::{AclEntry, AclKey, Key};
use store::StoreError;

#[tokio::test]
async fn test_delete_by_authorized_writer() {
    let store = common::test_store();
    common::bootstrap(&store, vec![AclEntry::new("8a8e1239773", 1001)]).await;

    let caller = common::digest_identity();
    let key = common::file_key("example.txt");
    store
        .put(key.clone(), common::digest_value(b"example txt data", 1001), &caller)
        .await
        .unwrap();

    store.delete(&key, &caller).await.unwrap();
    assert!(matches!(
        store.get(&key, &caller).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_missing_key_is_not_found() {
    let store = common::test_store();
    let caller = common::digest_identity();

    let result = store.delete(&common::file_key("missing.txt"), &caller).await;
    assert!(matches!(result, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_delete_by_non_member_is_denied() {
    let store = common::test_store();
    common::bootstrap(&store, vec![AclEntry::new("8a8e1239773", 1001)]).await;

    let writer = common::digest_identity();
    let key = common::file_key("example.txt");
    let value = common::digest_value(b"example txt data", 1001);
    store.put(key.clone(), value.clone(), &writer).await.unwrap();

    let intruder = Identity::new("deadbeef", 666);
    let result = store.delete(&key, &intruder).await;
    assert!(matches!(
        result,
        Err(StoreError::Denied(DenyReason::NotInAcl))
    ));

    // the record is untouched
    assert_eq!(store.get(&key, &writer).await.unwrap(), value);
}

#[tokio::test]
async fn test_delete_uid_mismatch_is_distinct() {
    let store = common::test_store();
    common::bootstrap(&store, vec![AclEntry::new("8a8e1239773", 1001)]).await;

    let writer = common::digest_identity();
    let key = common::file_key("example.txt");
    store
        .put(key.clone(), common::digest_value(b"example txt data", 1001), &writer)
        .await
        .unwrap();

    let wrong_uid = Identity::new("8a8e1239773", 9999);
    let result = store.delete(&key, &wrong_uid).await;
    assert!(matches!(
        result,
        Err(StoreError::Denied(DenyReason::UidMismatch))
    ));
}

#[tokio::test]
async fn test_delete_acl_record_requires_membership() {
    let store = common::test_store();
    common::bootstrap(&store, vec![AclEntry::new("8a8e1239773", 1001)]).await;

    let acl_key = Key::from(AclKey::new(common::WRITER));

    let intruder = Identity::new("deadbeef", 666);
    assert!(matches!(
        store.delete(&acl_key, &intruder).await,
        Err(StoreError::Denied(DenyReason::NotInAcl))
    ));

    let member = common::digest_identity();
    store.delete(&acl_key, &member).await.unwrap();
    assert!(matches!(
        store.get(&acl_key, &member).await,
        Err(StoreError::NotFound)
    ));
}
