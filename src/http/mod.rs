//! HTTP invocation: request building, retry with backoff, and execution.

pub mod engine;
pub mod outbound;
pub mod retry;

pub use engine::{HttpEngine, RawResponse};
pub use outbound::{FormField, OutboundRequest, RequestBody};
pub use retry::RetryPolicy;
