//! TOML parsing, serialization, validation, and selection for platform catalogs.
//!
//! A custom catalog replaces the built-in table entirely. It is stored as a
//! list of `[[platforms]]` tables:
//!
//! ```toml
//! [[platforms]]
//! id = "win-x64"
//! constant = "WIN_X64"
//! is-64-bit = true
//! class-name = "Win64"
//!
//! [platforms.family]
//! id = "win"
//! constant = "WIN"
//! friendly-name = "Windows"
//! library-extension = "dll"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};
use crate::platform::{find_platform, PlatformDescriptor};

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    platforms: Vec<PlatformDescriptor>,
}

/// A validation issue found in a catalog.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Platform the issue concerns, if any.
    pub platform: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.platform {
            Some(id) => write!(f, "{id}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Load and validate a catalog from a TOML file.
pub fn load_catalog_toml(path: &Path) -> Result<Vec<PlatformDescriptor>> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let catalog = parse_catalog_toml(&content)?;
    validate_catalog(&catalog).map_err(|issues| TargetError::Validation {
        detail: issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    })?;
    Ok(catalog)
}

/// Parse a catalog from a TOML string. Entry order is preserved.
pub fn parse_catalog_toml(toml_str: &str) -> Result<Vec<PlatformDescriptor>> {
    let file: CatalogFile = toml::from_str(toml_str)?;
    Ok(file.platforms)
}

/// Serialize a catalog to pretty TOML.
pub fn catalog_to_toml(catalog: &[PlatformDescriptor]) -> Result<String> {
    let file = CatalogFile {
        platforms: catalog.to_vec(),
    };
    Ok(toml::to_string_pretty(&file)?)
}

/// Validate a catalog for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with every problem found.
pub fn validate_catalog(catalog: &[PlatformDescriptor]) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if catalog.is_empty() {
        issues.push(ValidationIssue {
            platform: None,
            message: "catalog has no platforms".into(),
        });
    }

    let mut ids = HashSet::new();
    let mut constants = HashSet::new();
    for p in catalog {
        let owner = Some(p.id.clone());
        if p.id.trim().is_empty() {
            issues.push(ValidationIssue {
                platform: None,
                message: "platform id is empty".into(),
            });
        } else if !ids.insert(p.id.as_str()) {
            issues.push(ValidationIssue {
                platform: owner.clone(),
                message: "duplicate platform id".into(),
            });
        }

        if !is_symbol(&p.constant) {
            issues.push(ValidationIssue {
                platform: owner.clone(),
                message: format!("constant '{}' is not a valid preprocessor symbol", p.constant),
            });
        } else if !constants.insert(p.constant.as_str()) {
            issues.push(ValidationIssue {
                platform: owner.clone(),
                message: format!("constant '{}' is used by another platform", p.constant),
            });
        }

        if p.family.id.trim().is_empty() {
            issues.push(ValidationIssue {
                platform: owner.clone(),
                message: "family id is empty".into(),
            });
        }
        if p.family.library_extension.is_empty() || p.family.library_extension.starts_with('.') {
            issues.push(ValidationIssue {
                platform: owner,
                message: format!(
                    "library extension '{}' must be non-empty and have no leading dot",
                    p.family.library_extension
                ),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Pick the requested platforms out of a catalog.
///
/// The result keeps catalog order regardless of the order of `ids`, so the
/// generated file sequence never depends on how the request was spelled.
pub fn select_platforms(catalog: &[PlatformDescriptor], ids: &[String]) -> Result<Vec<PlatformDescriptor>> {
    for id in ids {
        find_platform(catalog, id)?;
    }
    Ok(catalog
        .iter()
        .filter(|p| ids.iter().any(|id| *id == p.id))
        .cloned()
        .collect())
}

fn is_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::OsFamily;
    use crate::platform::builtin_catalog;

    #[test]
    fn round_trip_builtin() {
        let toml_str = catalog_to_toml(builtin_catalog()).unwrap();
        let parsed = parse_catalog_toml(&toml_str).unwrap();
        assert_eq!(parsed, builtin_catalog());
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
[[platforms]]
id = "linux-arm64"
constant = "LINUX_ARM64"
is-64-bit = true
class-name = "LinuxArm64"

[platforms.family]
id = "linux"
constant = "LINUX"
friendly-name = "Linux"
library-extension = "so"
"#;
        let catalog = parse_catalog_toml(toml_str).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].library_file_name("bearssl"), "bearssl.linux.x64.so");
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(parse_catalog_toml("this is not valid toml [[[").is_err());
    }

    #[test]
    fn parse_missing_field_returns_error() {
        let toml_str = r#"
[[platforms]]
id = "incomplete"
"#;
        assert!(parse_catalog_toml(toml_str).is_err());
    }

    #[test]
    fn validate_builtin() {
        assert!(validate_catalog(builtin_catalog()).is_ok());
    }

    #[test]
    fn validate_empty_catalog() {
        let issues = validate_catalog(&[]).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("no platforms")));
    }

    #[test]
    fn validate_duplicate_id_and_constant() {
        let mut catalog = builtin_catalog().to_vec();
        catalog.push(catalog[0].clone());
        let issues = validate_catalog(&catalog).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("duplicate platform id")));
        assert!(issues.iter().any(|i| i.message.contains("used by another platform")));
    }

    #[test]
    fn validate_bad_constant() {
        let catalog = vec![PlatformDescriptor::new(
            "win-x64",
            "WIN-X64",
            OsFamily::windows(),
            true,
            "Win64",
        )];
        let issues = validate_catalog(&catalog).unwrap_err();
        assert!(issues[0].message.contains("not a valid preprocessor symbol"));
        assert_eq!(issues[0].to_string().split(':').next(), Some("win-x64"));
    }

    #[test]
    fn validate_dotted_extension() {
        let family = OsFamily::new("win", "WIN", "Windows", ".dll");
        let catalog = vec![PlatformDescriptor::new("win-x64", "WIN_X64", family, true, "Win64")];
        let issues = validate_catalog(&catalog).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("leading dot")));
    }

    #[test]
    fn select_keeps_catalog_order() {
        let ids = vec!["osx-x64".to_string(), "win-x86".to_string()];
        let selected = select_platforms(builtin_catalog(), &ids).unwrap();
        let got: Vec<_> = selected.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(got, ["win-x86", "osx-x64"]);
    }

    #[test]
    fn select_none() {
        assert!(select_platforms(builtin_catalog(), &[]).unwrap().is_empty());
    }

    #[test]
    fn select_unknown_fails() {
        let ids = vec!["beos-x86".to_string()];
        assert!(matches!(
            select_platforms(builtin_catalog(), &ids),
            Err(TargetError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn load_not_found() {
        let result = load_catalog_toml(Path::new("/nonexistent/targets.toml"));
        assert!(matches!(result.unwrap_err(), TargetError::NotFound { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.toml");
        std::fs::write(&path, catalog_to_toml(&builtin_catalog()[..2]).unwrap()).unwrap();

        let catalog = load_catalog_toml(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].id, "win-x64");
    }

    #[test]
    fn load_rejects_invalid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.toml");
        std::fs::write(&path, "platforms = []\n").unwrap();

        let err = load_catalog_toml(&path).unwrap_err();
        assert!(matches!(err, TargetError::Validation { .. }));
    }
}
