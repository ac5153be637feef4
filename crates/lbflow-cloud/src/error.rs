//! Load balancer workflow error types

use thiserror::Error;

/// Errors surfaced by the provisioning and attachment workflows.
///
/// Retries happen inside [`crate::retry::RetryPolicy`]; every error here is
/// terminal for the current run and propagates unchanged to the caller.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("control plane credentials missing or rejected: {0}")]
    Credential(String),

    #[error("no subnet found for network: {0}")]
    SubnetNotFound(String),

    #[error("floating ip not found: {0}")]
    FloatingIpNotFound(String),

    #[error("instance not found: {0}")]
    InstanceNotFound(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("load balancer already exists: {0}")]
    AlreadyExists(String),

    #[error("instance already attached addr: {0}")]
    AlreadyAttached(String),

    #[error("instance failed to attach addr {address}: {source}")]
    AttachmentFailed {
        address: String,
        #[source]
        source: Box<CloudError>,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("control plane API error: {0}")]
    Api(String),

    #[error("command execution failed: {0}")]
    CommandFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
