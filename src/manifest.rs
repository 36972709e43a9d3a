//! Extension Manifest
//!
//! JSON metadata describing an extension to the host: name, version, and
//! the functions it exports keyed by selector. The host can read the
//! manifest before loading the extension to learn which selectors are
//! valid.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Function;

/// Manifest errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Extension manifest (extension.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    /// Extension name.
    pub name: String,

    /// Semantic version.
    pub version: String,

    /// Brief description.
    #[serde(default)]
    pub description: String,

    /// Exported functions, keyed by selector.
    #[serde(default)]
    pub functions: Vec<FunctionExport>,
}

impl ExtensionManifest {
    /// Create a manifest with the minimal required fields.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
            functions: Vec::new(),
        }
    }

    /// The manifest describing this crate's built-in exports.
    pub fn builtin() -> Self {
        let mut manifest = Self::new("kernel-extension", env!("CARGO_PKG_VERSION"));
        manifest.description = "Elementwise float/double transforms".to_string();
        for function in Function::ALL {
            manifest.functions.push(FunctionExport {
                selector: function.selector(),
                name: function.name().to_string(),
                description: match function {
                    Function::Square => "output[i] = input[i] * input[i]".to_string(),
                    Function::Cube => "output[i] = input[i]^3".to_string(),
                },
            });
        }
        manifest
    }

    /// Load a manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ManifestResult<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Save the manifest to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> ManifestResult<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> ManifestResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> ManifestResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up an export by selector.
    pub fn find(&self, selector: i64) -> Option<&FunctionExport> {
        self.functions.iter().find(|f| f.selector == selector)
    }
}

/// An exported function entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionExport {
    /// Selector value the host passes to invoke this function.
    pub selector: i64,

    /// Function name.
    pub name: String,

    /// Brief description.
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_square_and_cube() {
        let manifest = ExtensionManifest::builtin();
        assert_eq!(manifest.functions.len(), 2);
        assert_eq!(manifest.find(1).unwrap().name, "square");
        assert_eq!(manifest.find(2).unwrap().name, "cube");
        assert!(manifest.find(3).is_none());
    }

    #[test]
    fn json_round_trip() {
        let manifest = ExtensionManifest::builtin();
        let json = manifest.to_json().unwrap();
        let parsed = ExtensionManifest::from_json(&json).unwrap();
        assert_eq!(parsed.name, manifest.name);
        assert_eq!(parsed.functions, manifest.functions);
    }

    #[test]
    fn missing_fields_default() {
        let manifest =
            ExtensionManifest::from_json(r#"{"name": "demo", "version": "0.0.1"}"#).unwrap();
        assert_eq!(manifest.name, "demo");
        assert!(manifest.description.is_empty());
        assert!(manifest.functions.is_empty());
    }
}
