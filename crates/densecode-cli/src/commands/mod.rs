//! CLI command implementations.

pub mod common;
pub mod demo;
pub mod run;
pub mod sweep;
pub mod version;
