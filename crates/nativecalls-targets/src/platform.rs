//! Platform descriptors and the built-in catalog.
//!
//! A descriptor combines an [`OsFamily`] with a word size. The library file
//! name and the conditional-compilation symbol are derived from it, so two
//! runs over the same catalog always name things identically.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};
use crate::family::OsFamily;

/// One OS + architecture target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformDescriptor {
    /// Compound runtime identifier (e.g., "win-x64").
    pub id: String,
    /// Preprocessor constant gating this platform's bindings (e.g., "WIN_X64").
    pub constant: String,
    /// Owning OS family.
    pub family: OsFamily,
    /// Whether the target is 64-bit.
    pub is_64_bit: bool,
    /// Display name used in listings (e.g., "Win64").
    pub class_name: String,
}

impl PlatformDescriptor {
    pub fn new(
        id: impl Into<String>,
        constant: impl Into<String>,
        family: OsFamily,
        is_64_bit: bool,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            constant: constant.into(),
            family,
            is_64_bit,
            class_name: class_name.into(),
        }
    }

    /// Architecture suffix: `x64` or `x86`.
    pub fn arch(&self) -> &'static str {
        if self.is_64_bit {
            "x64"
        } else {
            "x86"
        }
    }

    /// Native library file name for this platform.
    ///
    /// `<stem>.<family-id lowercased>.<x64|x86>.<extension>`, e.g.
    /// `bearssl.win.x64.dll`.
    pub fn library_file_name(&self, stem: &str) -> String {
        format!(
            "{stem}.{}.{}.{}",
            self.family.id.to_lowercase(),
            self.arch(),
            self.family.library_extension
        )
    }

    /// Symbol that must be defined for this platform's bindings to compile.
    pub fn conditional_symbol(&self) -> &str {
        &self.constant
    }
}

/// The built-in catalog, in generation order.
pub fn builtin_catalog() -> &'static [PlatformDescriptor] {
    static CATALOG: OnceLock<Vec<PlatformDescriptor>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            PlatformDescriptor::new("win-x86", "WIN_X86", OsFamily::windows(), false, "Win32"),
            PlatformDescriptor::new("win-x64", "WIN_X64", OsFamily::windows(), true, "Win64"),
            PlatformDescriptor::new("linux-x86", "LINUX_X86", OsFamily::linux(), false, "Linux32"),
            PlatformDescriptor::new("linux-x64", "LINUX_X64", OsFamily::linux(), true, "Linux64"),
            PlatformDescriptor::new("osx-x64", "OSX_X64", OsFamily::osx(), true, "MacOs64"),
        ]
    })
}

/// Look up a platform by id.
pub fn find_platform<'a>(catalog: &'a [PlatformDescriptor], id: &str) -> Result<&'a PlatformDescriptor> {
    catalog
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| TargetError::UnknownPlatform { id: id.to_string() })
}
