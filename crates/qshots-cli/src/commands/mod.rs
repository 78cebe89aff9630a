//! CLI command implementations.

pub mod common;
pub mod render;
pub mod samples;
pub mod select;
pub mod version;
