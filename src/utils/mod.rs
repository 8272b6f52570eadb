//! Utility functions and types used throughout the codebase.
pub mod cli;
pub mod config;
pub mod validation;
