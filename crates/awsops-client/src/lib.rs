//! Network side of an invocation
//!
//! - [`HttpClient`] / [`ReqwestHttpClient`]: transport seam
//! - [`SigV4Signer`]: request signing from the AWS credential chain
//! - [`ServiceClient`]: protocol encoding and error decoding behind [`ApiClient`]
//! - [`Invoker`] / [`Paginator`]: page loop with cooperative cancellation

pub mod cancel;
pub mod error;
pub mod http;
pub mod invoker;
pub mod protocol;
pub mod service;
pub mod sign;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use error::InvokeError;
pub use http::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use invoker::{InvokeOptions, InvokeSummary, Invoker, PageState, Paginator};
pub use service::{ApiClient, ClientOptions, ServiceClient};
pub use sign::SigV4Signer;
