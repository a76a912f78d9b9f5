//! Operation tables for Amazon Keyspaces and CloudWatch Observability Admin
//!
//! Each service module exposes its `SERVICE` descriptor, one `static`
//! [`OperationDescriptor`] per API operation, and an `OPERATIONS` slice.
//! [`registry`] validates all of them once and hands out the shared
//! [`Registry`].

use awsops_core::{CoreError, OperationDescriptor, Registry};
use once_cell::sync::Lazy;

pub mod keyspaces;
pub mod observability_admin;

static REGISTRY: Lazy<Result<Registry, CoreError>> = Lazy::new(|| Registry::new(all_operations()));

/// Every operation of every service, in registration order
pub fn all_operations() -> impl Iterator<Item = &'static OperationDescriptor> {
    keyspaces::OPERATIONS
        .iter()
        .chain(observability_admin::OPERATIONS)
        .copied()
}

/// The validated process-wide registry
///
/// Built on first use; a malformed table surfaces here as
/// [`CoreError::InvalidDescriptor`].
pub fn registry() -> Result<&'static Registry, CoreError> {
    REGISTRY.as_ref().map_err(Clone::clone)
}
