use crate::payload::PayloadError;
use core_host::HostError;
use thiserror::Error;

/// Failure of a completion-accept reconstruction.
#[derive(Debug, Error)]
pub enum AcceptError {
    /// `user_data` did not carry the round-trip payload; nothing was touched.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// The editor rejected a query or mutation for a reason other than the
    /// transient text lock.
    #[error(transparent)]
    Host(#[from] HostError),
}
