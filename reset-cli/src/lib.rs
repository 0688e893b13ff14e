//! Reset a Django development environment to a clean slate.
//!
//! The binary wires the real terminal and process runner into
//! [`pipeline::run`]; tests swap them for the doubles in [`testing`].

pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod process;
pub mod testing;

pub use config::ResetConfig;
pub use error::{ResetError, Result};
pub use pipeline::Outcome;
