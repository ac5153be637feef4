//! Keystone credential loading
//!
//! Credentials are read once from the environment at the process boundary
//! and passed explicitly to the CLI wrappers; nothing here mutates or
//! caches process-wide state.

use crate::error::{NeutronError, Result};

/// Keystone v2 credentials for the `neutron` and `openstack` CLIs.
#[derive(Debug, Clone)]
pub struct OsCredentials {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub tenant_name: String,
    pub region: Option<String>,
}

impl OsCredentials {
    /// Load credentials from the standard `OS_*` environment variables.
    ///
    /// Fails fast on the first missing variable so a misconfigured
    /// environment never reaches the control plane.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            auth_url: require("OS_AUTH_URL")?,
            username: require("OS_USERNAME")?,
            password: require("OS_PASSWORD")?,
            tenant_name: require("OS_TENANT_NAME")?,
            region: std::env::var("OS_REGION_NAME").ok(),
        })
    }

    /// Environment entries exported to CLI subprocesses.
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("OS_AUTH_URL", self.auth_url.clone()),
            ("OS_USERNAME", self.username.clone()),
            ("OS_PASSWORD", self.password.clone()),
            ("OS_TENANT_NAME", self.tenant_name.clone()),
        ];
        if let Some(region) = &self.region {
            vars.push(("OS_REGION_NAME", region.clone()));
        }
        vars
    }
}

fn require(var: &str) -> Result<String> {
    std::env::var(var).map_err(|_| NeutronError::CredentialsMissing(var.to_string()))
}
