//! OpenStack client error types

use lbflow_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeutronError {
    #[error("neutron CLI not found. Please install python-neutronclient")]
    NeutronNotFound,

    #[error("openstack CLI not found. Please install python-openstackclient")]
    OpenstackNotFound,

    #[error("missing credential environment variable: {0}")]
    CredentialsMissing(String),

    #[error("command failed: {0}")]
    CommandFailed(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NeutronError>;

impl From<NeutronError> for CloudError {
    fn from(err: NeutronError) -> Self {
        match err {
            NeutronError::NeutronNotFound | NeutronError::OpenstackNotFound => {
                CloudError::Credential(err.to_string())
            }
            NeutronError::CredentialsMissing(var) => CloudError::Credential(format!(
                "missing credential environment variable: {var}"
            )),
            NeutronError::CommandFailed(msg) => CloudError::CommandFailed(msg),
            NeutronError::UnexpectedResponse(msg) => CloudError::Api(msg),
            NeutronError::JsonError(err) => CloudError::Json(err),
            NeutronError::IoError(err) => CloudError::Io(err),
        }
    }
}
