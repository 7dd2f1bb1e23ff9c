//! Infrastructure layer - Storage backends, services and observability

pub mod logging;
pub mod observability;
pub mod services;
pub mod storage;
