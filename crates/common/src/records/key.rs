use serde::{Deserialize, Serialize};

use crate::wire::WireEncoded;

use super::RecordError;

/// Key of the ACL record governing a writer namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AclKey {
    /// Identifier of the writer namespace this ACL governs.
    pub write_id: String,
}

impl AclKey {
    pub fn new(write_id: impl Into<String>) -> Self {
        AclKey {
            write_id: write_id.into(),
        }
    }
}

impl std::fmt::Display for AclKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "acl:{}", self.write_id)
    }
}

/// Key of a filesystem object, addressed by path components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataKey {
    /// Ordered path segments, root first. Must not be empty: the root itself
    /// is not addressable as a record.
    pub path: Vec<String>,
    pub is_folder: bool,
}

impl DataKey {
    pub fn new(path: Vec<String>, is_folder: bool) -> Self {
        DataKey { path, is_folder }
    }

    /// Key for a file at the given path.
    pub fn file<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataKey {
            path: path.into_iter().map(Into::into).collect(),
            is_folder: false,
        }
    }

    /// Key for a folder at the given path.
    pub fn folder<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataKey {
            path: path.into_iter().map(Into::into).collect(),
            is_folder: true,
        }
    }
}

impl std::fmt::Display for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:/{}", self.path.join("/"))?;
        if self.is_folder {
            write!(f, "/")?;
        }
        Ok(())
    }
}

/// A store key. Every key is exactly one of the variants; consumers match
/// exhaustively, there is no catch-all shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Acl(AclKey),
    Data(DataKey),
}

impl WireEncoded for Key {}

impl Key {
    /// Check the shape invariants for this key.
    pub fn validate(&self) -> Result<(), RecordError> {
        match self {
            Key::Acl(acl_key) => {
                if acl_key.write_id.is_empty() {
                    return Err(RecordError::EmptyWriteId);
                }
            }
            Key::Data(data_key) => {
                if data_key.path.is_empty() {
                    return Err(RecordError::EmptyPath);
                }
                for (index, segment) in data_key.path.iter().enumerate() {
                    if segment.is_empty() {
                        return Err(RecordError::EmptySegment(index));
                    }
                }
            }
        }
        Ok(())
    }

    /// Short kind tag, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Acl(_) => "acl",
            Key::Data(_) => "data",
        }
    }
}

impl From<AclKey> for Key {
    fn from(key: AclKey) -> Self {
        Key::Acl(key)
    }
}

impl From<DataKey> for Key {
    fn from(key: DataKey) -> Self {
        Key::Data(key)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Acl(key) => key.fmt(f),
            Key::Data(key) => key.fmt(f),
        }
    }
}
