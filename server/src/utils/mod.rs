//! Shared helpers

pub mod file;
