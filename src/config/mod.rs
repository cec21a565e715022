//! Converter Configuration Module
//!
//! Every tunable of a conversion run, loaded from a TOML file and validated
//! once at startup.
//!
//! ## Loading Order
//!
//! 1. Explicit path (the `--config` flag)
//! 2. `LIGHTLIST_CONFIG` environment variable (path to TOML file)
//! 3. `lightlist.toml` in the current working directory
//! 4. Built-in defaults
//!
//! ## Usage
//!
//! The loaded config is passed by reference to whatever needs it:
//!
//! ```ignore
//! let config = ConverterConfig::load(args.config.as_deref())?;
//! let converter = Converter::new(config)?;
//! ```

mod converter_config;
pub mod defaults;
pub mod validation;

pub use converter_config::*;
