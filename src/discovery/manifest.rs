//! Repository manifest (xls.yaml) parsing.
//!
//! The manifest is optional. It tunes discovery excludes and the external
//! reference lookup used by the amendment template checks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XlsError};

/// Settings for the entity existence lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Set to false to never touch the network.
    pub enabled: bool,

    /// URL template for ledger entry types; `{name}` is the lowercased name.
    pub ledger_entry_url: String,

    /// URL template for transaction types; `{name}` is the lowercased name.
    pub transaction_url: String,

    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ledger_entry_url:
                "https://xrpl.org/docs/references/protocol/ledger-data/ledger-entry-types/{name}"
                    .to_string(),
            transaction_url: "https://xrpl.org/docs/references/protocol/transactions/types/{name}"
                .to_string(),
            timeout_secs: 5,
        }
    }
}

/// Repository manifest loaded from xls.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Patterns for document paths to skip.
    pub excludes: Vec<String>,

    /// Entity reference lookup settings.
    pub reference: ReferenceConfig,
}

impl Manifest {
    /// Load manifest from an xls.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| XlsError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| XlsError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check xls.yaml syntax".to_string()),
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob matching: `*` prefix/suffix or plain substring.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(dir) = pattern
            .strip_prefix("**/")
            .and_then(|rest| rest.strip_suffix("/*"))
        {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }

        if let Some(prefix) = pattern.strip_suffix('*') {
            // XLS-00* style folder prefixes
            return path
                .split('/')
                .any(|component| component.starts_with(prefix));
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            return path.ends_with(suffix);
        }

        path.contains(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();

        assert!(manifest.excludes.is_empty());
        assert!(manifest.reference.enabled);
        assert_eq!(manifest.reference.timeout_secs, 5);
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
excludes:
  - "XLS-0001*"
  - "**/drafts/*"
reference:
  enabled: false
  transaction_url: "http://mirror.local/tx/{name}"
  timeout_secs: 2
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.excludes, vec!["XLS-0001*", "**/drafts/*"]);
        assert!(!manifest.reference.enabled);
        assert_eq!(manifest.reference.transaction_url, "http://mirror.local/tx/{name}");
        assert_eq!(manifest.reference.timeout_secs, 2);
        // Unset keys keep their defaults
        assert!(manifest.reference.ledger_entry_url.starts_with("https://xrpl.org/"));
    }

    #[test]
    fn test_parse_invalid_manifest() {
        let result = Manifest::parse("excludes: [unclosed");
        assert!(matches!(result, Err(XlsError::Config { .. })));
    }

    #[test]
    fn test_is_excluded_prefix() {
        let manifest = Manifest {
            excludes: vec!["XLS-0001*".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("root/XLS-0001-foo/README.md")));
        assert!(!manifest.is_excluded(Path::new("root/XLS-0002-bar/README.md")));
    }

    #[test]
    fn test_is_excluded_directory() {
        let manifest = Manifest {
            excludes: vec!["**/drafts/*".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("repo/drafts/XLS-0003-x/README.md")));
        assert!(!manifest.is_excluded(Path::new("repo/XLS-0003-x/README.md")));
    }

    #[test]
    fn test_is_excluded_substring() {
        let manifest = Manifest {
            excludes: vec!["deprecated".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("XLS-0004-deprecated-thing/README.md")));
    }
}
