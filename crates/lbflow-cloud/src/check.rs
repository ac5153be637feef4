//! Pre-flight idempotency checks
//!
//! Pure reads against the control plane that decide whether the desired
//! end state already exists. Name matching is exact; when the control
//! plane holds several resources with the same name, the first one in
//! listing order wins.

use crate::client::NetworkControlClient;
use crate::error::Result;

/// Read-only existence checks backing the idempotent workflows.
pub struct IdempotencyChecker<'a> {
    net: &'a dyn NetworkControlClient,
}

impl<'a> IdempotencyChecker<'a> {
    pub fn new(net: &'a dyn NetworkControlClient) -> Self {
        Self { net }
    }

    /// Whether a pool with exactly this name exists.
    pub async fn pool_exists(&self, name: &str) -> Result<bool> {
        let pools = self.net.list_pools().await?;
        Ok(pools.iter().any(|pool| pool.name == name))
    }

    /// Id of the first pool with this name, if any.
    pub async fn pool_id_by_name(&self, name: &str) -> Result<Option<String>> {
        let pools = self.net.list_pools().await?;
        Ok(pools
            .into_iter()
            .find(|pool| pool.name == name)
            .map(|pool| pool.id))
    }

    /// Whether `address` is already a member of the named pool.
    ///
    /// Returns false when the pool itself does not exist; the mutating
    /// workflows report the missing pool separately.
    pub async fn member_attached(&self, pool_name: &str, address: &str) -> Result<bool> {
        let Some(pool_id) = self.pool_id_by_name(pool_name).await? else {
            return Ok(false);
        };

        let members = self.net.list_members().await?;
        Ok(members
            .iter()
            .any(|member| member.pool_id == pool_id && member.address == address))
    }
}
