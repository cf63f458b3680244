pub mod config;
pub mod dom;
pub mod lineup;
pub mod pipeline;
pub mod tracing;
