//! Parsing and validation of `tbreset.toml` configuration files.
//!
//! The configuration file is entirely optional: every key has a default and
//! a missing file yields [`ProjectConfig::default`]. CLI flags override
//! whatever the file provides.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{CleanConfig, ProjectConfig, StrategyChoice};
