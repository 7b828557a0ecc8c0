use std::fs;
use std::path::{Path, PathBuf};

use authbook_gen::GeneratorConfig;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Where the credential document lives and how accounts are generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    /// Hold an exclusive sidecar lock for every write cycle.
    pub lock: bool,
    pub generator: GeneratorConfig,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Auth_Data"),
            file_name: "auth_accounts.yaml".into(),
            lock: true,
            generator: GeneratorConfig::default(),
        }
    }
}

impl BookConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Full path of the backing document.
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}
