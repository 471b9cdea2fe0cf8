//! Errors surfaced by singleton resolution.

use asset_host::HostError;
use thiserror::Error;

/// Why an access could not produce the canonical object.
///
/// Failing to destroy a duplicate is not an error: it is logged and the
/// access still succeeds.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SingletonError {
    /// Enumerating, creating, or flagging an object failed in the host.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}
