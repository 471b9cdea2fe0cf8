//! Error types for the host boundary.

use crate::id::InstanceId;
use thiserror::Error;

/// Errors reported by an [`AssetHost`](crate::AssetHost).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HostError {
    /// No live object carries this id.
    #[error("instance not found: {0}")]
    NotFound(InstanceId),

    /// The host could not bring a new object into existence.
    #[error("failed to create {asset}: {reason}")]
    CreateFailed {
        /// Name of the asset type that was requested.
        asset: String,
        /// Why creation failed.
        reason: String,
    },

    /// The object behind this id is not of the requested type.
    #[error("instance {id} is not a {expected}")]
    TypeMismatch {
        /// The id that was looked up.
        id: InstanceId,
        /// Name of the asset type the caller expected.
        expected: String,
    },

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Construction hook errors. The host logs these and keeps the object
/// (use [`ConstructionVerdict::Destroy`](crate::ConstructionVerdict::Destroy)
/// to remove it).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook execution failed.
    #[error("hook failed: {0}")]
    Failed(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
