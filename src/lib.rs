// awsops - table-driven command line for AWS Keyspaces and CloudWatch
// Observability Admin
//
// The binary is a thin shell over this library:
// - call: bind parameters, resolve the selector, invoke, emit pages
// - catalog: list and describe registered operations
// - output: line-oriented JSON emission
// - init: tracing setup (stderr only)

mod call;
mod catalog;
mod init;
mod output;

pub use call::{parse_param, run_call, CallRequest};
pub use catalog::{describe_json, write_description, write_operations};
pub use init::init_tracing;
pub use output::Emitter;

use awsops_client::CancelHandle;
use tokio::signal;
use tracing::{error, warn};

/// Trip `handle` on Ctrl+C
///
/// Pages already written stay written; the in-flight request is abandoned.
pub async fn cancel_on_ctrl_c(handle: CancelHandle) {
    match signal::ctrl_c().await {
        Ok(()) => {
            warn!("Received Ctrl+C, cancelling");
            handle.cancel();
        }
        Err(e) => error!("Failed to install Ctrl+C handler: {}", e),
    }
}
