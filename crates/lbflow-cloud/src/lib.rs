//! lbflow control plane abstraction
//!
//! This crate provides the load balancer provisioning workflows for lbflow:
//! an idempotent, declarative layer over an OpenStack-style networking
//! control plane.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   lbflow CLI                     │
//! │             (lbflow provision/attach)            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                lbflow-cloud                      │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  ResourceProvisioner / MemberAttacher     │   │
//! │  │  IdempotencyChecker / RetryPolicy         │   │
//! │  └──────────────────────────────────────────┘   │
//! │  trait NetworkControlClient                      │
//! │  trait ComputeControlClient                      │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────────┐
//! │ lbflow-cloud-     │
//! │ neutron (CLI shim)│
//! └───────────────────┘
//! ```
//!
//! All durable state lives in the remote control plane; the workflows hold
//! only transient resource ids threaded through a single run.

pub mod attach;
pub mod check;
pub mod client;
pub mod error;
pub mod model;
pub mod params;
pub mod provision;
pub mod retry;

// Re-exports
pub use attach::{AttachOutcome, MemberAttacher};
pub use check::IdempotencyChecker;
pub use client::{ComputeControlClient, NetworkControlClient};
pub use error::{CloudError, Result};
pub use model::{
    BalancingMethod, FloatingIp, FloatingIpBinding, FloatingIpSpec, HealthHttpMethod,
    HealthMonitor, HealthMonitorSpec, Instance, InstanceNetwork, Member, MemberSpec, Pool,
    PoolSpec, Protocol, ResourceKind, Subnet, VirtualIp, VirtualIpSpec,
};
pub use params::ProvisionParams;
pub use provision::{ProvisionOutcome, ResourceProvisioner};
pub use retry::RetryPolicy;
