//! Local administration for a static-site project portfolio.
//!
//! Each portfolio project is a markdown document with front matter plus a
//! directory of positional images. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (slugs, validation, document
//!   render/parse, visual reconciliation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, documents, assets, git).
//!
//! Orchestration modules ([`create`], [`update`], [`delete`], [`list`],
//! [`show`]) coordinate core logic with I/O to implement CLI commands.

pub mod core;
pub mod create;
pub mod delete;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod list;
pub mod logging;
pub mod portfolio;
pub mod show;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod update;
