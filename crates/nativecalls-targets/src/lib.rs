//! Target platform catalog for native call generation.
//!
//! Every generated binding file targets exactly one [`PlatformDescriptor`]:
//! an operating-system family plus an architecture. The descriptor decides
//! the native library file name the bindings load and the
//! conditional-compilation symbol that gates the file.
//!
//! - [`family`]: OS families (Windows, Linux, macOS) and their library extensions
//! - [`platform`]: platform descriptors and the built-in five-entry catalog
//! - [`parse`]: TOML loading, serialization, validation and selection of catalogs

pub mod error;
pub mod family;
pub mod parse;
pub mod platform;

pub use error::{Result, TargetError};
pub use family::OsFamily;
pub use platform::{builtin_catalog, find_platform, PlatformDescriptor};
