//! Member attachment workflow
//!
//! Resolves a named compute instance to its private address and registers
//! it under a load balancer pool, skipping the mutation when the member
//! already exists.

use crate::check::IdempotencyChecker;
use crate::client::{ComputeControlClient, NetworkControlClient};
use crate::error::{CloudError, Result};
use crate::model::MemberSpec;

/// Result of one attachment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The instance's address was registered as a new member.
    Attached { address: String },
    /// The (pool, address) pair already existed; nothing was created.
    AlreadyAttached { address: String },
}

impl AttachOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, AttachOutcome::Attached { .. })
    }

    pub fn address(&self) -> &str {
        match self {
            AttachOutcome::Attached { address } => address,
            AttachOutcome::AlreadyAttached { address } => address,
        }
    }
}

/// Attaches compute instances to load balancer pools.
pub struct MemberAttacher<'a> {
    net: &'a dyn NetworkControlClient,
    compute: &'a dyn ComputeControlClient,
}

impl<'a> MemberAttacher<'a> {
    pub fn new(net: &'a dyn NetworkControlClient, compute: &'a dyn ComputeControlClient) -> Self {
        Self { net, compute }
    }

    /// Attach `instance_name` to `pool_name` on `port`.
    ///
    /// The already-attached case is signalled internally as
    /// [`CloudError::AlreadyAttached`] and mapped to the non-error
    /// [`AttachOutcome::AlreadyAttached`] here, so callers see it as a
    /// successful no-op.
    pub async fn attach(
        &self,
        instance_name: &str,
        pool_name: &str,
        port: u16,
    ) -> Result<AttachOutcome> {
        match self.attach_inner(instance_name, pool_name, port).await {
            Ok(address) => Ok(AttachOutcome::Attached { address }),
            Err(CloudError::AlreadyAttached(address)) => {
                Ok(AttachOutcome::AlreadyAttached { address })
            }
            Err(err) => Err(err),
        }
    }

    async fn attach_inner(
        &self,
        instance_name: &str,
        pool_name: &str,
        port: u16,
    ) -> Result<String> {
        let instance = self.compute.find_instance_by_name(instance_name).await?;
        let address = instance
            .first_address()
            .ok_or_else(|| {
                CloudError::ResourceNotFound(format!(
                    "instance {instance_name} has no network address"
                ))
            })?
            .to_string();
        tracing::debug!(instance = %instance_name, address = %address, "resolved instance address");

        let checker = IdempotencyChecker::new(self.net);
        if checker.member_attached(pool_name, &address).await? {
            tracing::info!(pool = %pool_name, address = %address, "member already attached");
            return Err(CloudError::AlreadyAttached(address));
        }

        let pool_id = checker
            .pool_id_by_name(pool_name)
            .await?
            .ok_or_else(|| CloudError::ResourceNotFound(format!("pool {pool_name}")))?;

        let member = self
            .net
            .create_member(&MemberSpec {
                pool_id,
                address: address.clone(),
                protocol_port: port,
            })
            .await
            .map_err(|err| CloudError::AttachmentFailed {
                address: address.clone(),
                source: Box::new(err),
            })?;
        tracing::info!(
            member_id = %member.id,
            pool = %pool_name,
            address = %address,
            port,
            "attached member"
        );

        Ok(address)
    }
}
