//! ros-hooks core library.
//!
//! This crate exposes programmatic APIs for the pre-commit hooks shipped by
//! the `ros-hooks` binary. Each hook takes file paths and returns a
//! `HookReport`; the binary turns the report into printed lines and an exit
//! code.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `include_guard`: Include guard derivation and in-place fixing.
//! - `package_xml`: Dependency tag ordering for `package.xml`.
//! - `gitmodules`: Structural checks for `.gitmodules`.
//! - `models`: Report structs shared by hooks and printers.
//! - `output`: Human/JSON printers.
//! - `error`: Fatal error type.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod error;
pub mod gitmodules;
pub mod include_guard;
pub mod models;
pub mod output;
pub mod package_xml;
pub mod utils;

pub use error::{HookError, Result};
