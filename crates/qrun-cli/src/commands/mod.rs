//! CLI command implementations.

pub mod common;
pub mod draw;
pub mod run;
pub mod tutorial;
pub mod version;
