//! Profile backend library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
