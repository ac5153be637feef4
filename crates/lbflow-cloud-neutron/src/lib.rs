//! OpenStack control plane clients for lbflow
//!
//! Implements the `lbflow-cloud` client traits over the `neutron` and
//! `openstack` command line tools with JSON output. Credentials come from
//! the standard `OS_*` environment variables and are validated before any
//! remote call.

pub mod client;
pub mod credentials;
pub mod error;
pub mod neutron;
pub mod nova;

pub use client::{NeutronNetworkClient, NovaComputeClient};
pub use credentials::OsCredentials;
pub use error::{NeutronError, Result};
pub use neutron::NeutronCli;
pub use nova::NovaCli;
