//! Integration tests for record construction, validation, and wire stability

use common::crypto::{Digest, SecretKey};
use common::records::{
    AclEntry, AclKey, AclValue, DataKey, DataValue, Key, RecordError, Signature, Value,
};
use common::wire::WireEncoded;

#[test]
fn test_record_wire_stability() {
    // the same record always encodes to the same bytes; signatures would
    // not be portable otherwise
    let value = Value::Data(DataValue::new(
        b"example txt data".to_vec(),
        Signature::digest_over(b"example txt data", Some(AclKey::new("writer1")), 1001),
    ));

    let first = value.encode().unwrap();
    let second = value.encode().unwrap();
    assert_eq!(first, second);
    assert_eq!(Value::decode(&first).unwrap(), value);
}

#[test]
fn test_key_wire_roundtrip() {
    let keys = vec![
        Key::from(AclKey::new("writer1")),
        Key::from(DataKey::file(["folder", "example.txt"])),
        Key::from(DataKey::folder(["folder"])),
    ];
    for key in keys {
        let bytes = key.encode().unwrap();
        assert_eq!(Key::decode(&bytes).unwrap(), key);
    }
}

#[test]
fn test_folder_and_file_keys_are_distinct() {
    let file = Key::from(DataKey::file(["notes"]));
    let folder = Key::from(DataKey::folder(["notes"]));
    assert_ne!(file, folder);
    assert_ne!(
        file.fingerprint().unwrap(),
        folder.fingerprint().unwrap()
    );
}

#[test]
fn test_acl_value_shape_invariants() {
    let valid = AclValue::new(vec![
        AclEntry::new("8a8e1239773", 1001),
        AclEntry::new("8a8e1239773", 1002),
    ]);
    assert!(Value::Acl(valid).validate().is_ok());

    let duplicated = AclValue::new(vec![
        AclEntry::new("8a8e1239773", 1001),
        AclEntry::new("8a8e1239773", 1001),
    ]);
    assert!(matches!(
        Value::Acl(duplicated).validate(),
        Err(RecordError::DuplicateAclEntry(_, _))
    ));
}

#[test]
fn test_signature_schemes_agree_on_payload() {
    let data = b"example txt data";
    let writer = Some(AclKey::new("writer1"));

    let digest_sig = Signature::digest_over(data, writer.clone(), 1001);
    assert_eq!(digest_sig.signature, Digest::of(data).to_hex());
    assert!(digest_sig.proof().unwrap().verify(data, None));

    let key = SecretKey::generate();
    let real_sig = Signature::sign_over(data, &key, writer, 1001);
    assert!(real_sig
        .proof()
        .unwrap()
        .verify(data, Some(&key.public())));
    // the two proof forms are never confused for one another
    assert_ne!(digest_sig.signature.len(), real_sig.signature.len());
}
