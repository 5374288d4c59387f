//! snapbump: Update a package recipe to the latest upstream git snapshot
//!
//! This crate provides:
//! - Downloading the upstream snapshot tarball
//! - Reading the ChangeLog and version out of the tarball
//! - Rewriting the `.spec` and `.changes` files of a package checkout

pub mod archive;
pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod workdir;

pub use archive::Tarball;
pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{run, run_from_tarball, Summary};
