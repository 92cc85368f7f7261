//! Runtime view of the native library's compile-time configuration.
//!
//! The native side exposes an array of `(name, value)` options terminated by
//! an entry whose name is null. [`ConfigTable`] copies that array into an
//! ordered map and [`BuildSettings`] derives the typed flags callers use.

pub mod error;
pub mod options;
pub mod settings;

pub use error::{Result, RuntimeConfigError};
pub use options::{ConfigOption, ConfigTable};
pub use settings::BuildSettings;
