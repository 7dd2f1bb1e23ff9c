//! API middleware components

pub mod error_body;
pub mod logging;
pub mod metrics;

pub use error_body::error_body_middleware;
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
