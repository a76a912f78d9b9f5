//! Table-driven operation engine
//!
//! An operation invocation flows through four stages, each driven by the
//! operation's static [`OperationDescriptor`]:
//!
//! 1. [`bind`] maps caller input onto typed [`BoundParameters`]
//! 2. [`build_request`] places bound values into a [`RequestEnvelope`]
//! 3. a client (see `awsops-client`) turns the envelope into a [`ResponseEnvelope`]
//! 4. a [`Selector`] projects the response for the caller
//!
//! This crate performs no I/O.

pub mod binder;
pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod selector;
pub mod value;

pub use binder::{bind, BoundParameters};
pub use descriptor::{
    DefaultValue, FieldKind, OperationDescriptor, OutputField, Pagination, ParamKind, ParamSpec,
    Protocol, ServiceDescriptor,
};
pub use envelope::{build_request, RequestEnvelope, ResponseEnvelope};
pub use error::{CoreError, Result};
pub use registry::Registry;
pub use selector::Selector;
pub use value::ParamValue;
