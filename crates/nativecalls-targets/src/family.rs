//! Operating-system families.
//!
//! A family owns the properties shared by all of its architectures: the
//! runtime identifier prefix, the preprocessor constant, a display name
//! and the shared-library extension.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// An operating-system family that one or more platforms belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OsFamily {
    /// Runtime identifier prefix (e.g., "win", "linux", "osx").
    pub id: String,
    /// Preprocessor constant for the whole family (e.g., "WIN").
    pub constant: String,
    /// Human-readable name (e.g., "Windows").
    pub friendly_name: String,
    /// Shared-library extension without the dot (e.g., "dll").
    pub library_extension: String,
}

impl OsFamily {
    /// Build a family from its four properties.
    pub fn new(
        id: impl Into<String>,
        constant: impl Into<String>,
        friendly_name: impl Into<String>,
        library_extension: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            constant: constant.into(),
            friendly_name: friendly_name.into(),
            library_extension: library_extension.into(),
        }
    }

    pub fn linux() -> Self {
        Self::new("linux", "LINUX", "Linux", "so")
    }

    pub fn windows() -> Self {
        Self::new("win", "WIN", "Windows", "dll")
    }

    pub fn osx() -> Self {
        Self::new("osx", "OSX", "OSX", "dylib")
    }

    /// The three built-in families, in declaration order (Linux, Windows, OSX).
    pub fn all() -> &'static [OsFamily] {
        static FAMILIES: OnceLock<Vec<OsFamily>> = OnceLock::new();
        FAMILIES.get_or_init(|| vec![Self::linux(), Self::windows(), Self::osx()])
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.friendly_name)
    }
}
