//! Handler entry points invoked by the external event runtime.

mod provision_handler;
mod stream_handler;

pub use provision_handler::ProvisionHandler;
pub use stream_handler::StreamHandler;

/// Ambient metadata the event runtime supplies with each invocation.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Runtime-assigned identifier for this invocation.
    pub request_id: String,
}

impl InvocationContext {
    /// Create a context with the given request id.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}
