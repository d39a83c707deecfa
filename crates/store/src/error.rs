use common::authorize::DenyReason;
use common::records::RecordError;
use common::wire::WireError;

/// Protocol errors, generic over the persistence engine's error type.
///
/// Every failure is a returned value; nothing here is fatal and nothing is
/// used for control flow elsewhere. The retry contract:
///
/// - [`MalformedRecord`](StoreError::MalformedRecord): caller bug, never
///   retried
/// - [`IntegrityFailure`](StoreError::IntegrityFailure): never retried,
///   logged as a potential tampering event at the failure site
/// - [`PolicyNotFound`](StoreError::PolicyNotFound): surfaced; resolved by
///   out-of-band bootstrap, not by retrying
/// - [`Denied`](StoreError::Denied): surfaced, not retried
/// - [`NotFound`](StoreError::NotFound): ordinary negative result
/// - [`StorageTimeout`](StoreError::StorageTimeout) /
///   [`StorageFailure`](StoreError::StorageFailure): safe to retry with
///   backoff; operations are idempotent
#[derive(Debug, thiserror::Error)]
pub enum StoreError<E> {
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] RecordError),
    #[error("integrity failure")]
    IntegrityFailure,
    #[error("no governing acl: {0}")]
    PolicyNotFound(String),
    #[error("denied: {0}")]
    Denied(DenyReason),
    #[error("not found")]
    NotFound,
    #[error("storage failure: timeout")]
    StorageTimeout,
    #[error("storage failure: {0}")]
    StorageFailure(E),
    #[error("codec error: {0}")]
    Codec(#[from] WireError),
}

impl<E> StoreError<E> {
    /// Whether a caller may retry the operation with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::StorageTimeout | StoreError::StorageFailure(_)
        )
    }
}
