//! Observability: request metrics.

pub mod metrics;
