//! HTTP server for the university admin backend.

pub mod api;
pub mod app;
pub mod errors;
pub mod tracing;
