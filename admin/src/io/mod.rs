//! Side-effecting adapters: configuration, filesystem layout, git.

pub mod assets;
pub mod config;
pub mod git;
pub mod paths;
pub mod store;
