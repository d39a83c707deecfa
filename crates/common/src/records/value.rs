use serde::{Deserialize, Serialize};

use crate::wire::WireEncoded;

use super::acl::AclValue;
use super::key::Key;
use super::signature::Signature;
use super::RecordError;

/// A data record: raw bytes plus the signature block that proves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataValue {
    pub data: Vec<u8>,
    pub signature: Signature,
}

impl DataValue {
    pub fn new(data: Vec<u8>, signature: Signature) -> Self {
        DataValue { data, signature }
    }
}

/// A store value. Exactly one variant, matched exhaustively everywhere; a
/// record with no recognizable shape cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Acl(AclValue),
    Data(DataValue),
}

impl WireEncoded for Value {}

impl Value {
    /// Check the shape invariants for this value.
    pub fn validate(&self) -> Result<(), RecordError> {
        match self {
            Value::Acl(acl) => acl.validate(),
            // any byte payload is a valid shape, including empty; integrity
            // is the proof's concern, not validation's
            Value::Data(_) => Ok(()),
        }
    }

    /// Check that this value's kind matches the key it is stored under.
    pub fn matches_key(&self, key: &Key) -> Result<(), RecordError> {
        match (key, self) {
            (Key::Acl(_), Value::Acl(_)) | (Key::Data(_), Value::Data(_)) => Ok(()),
            _ => Err(RecordError::KindMismatch {
                key: key.kind(),
                value: self.kind(),
            }),
        }
    }

    /// Short kind tag, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Acl(_) => "acl",
            Value::Data(_) => "data",
        }
    }

    pub fn as_acl(&self) -> Option<&AclValue> {
        match self {
            Value::Acl(acl) => Some(acl),
            Value::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&DataValue> {
        match self {
            Value::Acl(_) => None,
            Value::Data(data) => Some(data),
        }
    }
}

impl From<AclValue> for Value {
    fn from(acl: AclValue) -> Self {
        Value::Acl(acl)
    }
}

impl From<DataValue> for Value {
    fn from(data: DataValue) -> Self {
        Value::Data(data)
    }
}
