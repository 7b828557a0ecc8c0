use serde::{Deserialize, Serialize};

/// Configuration for credential generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Password assigned to every generated account.
    pub password: String,
    /// Synthetic candidates tried per account before falling back.
    pub max_attempts: usize,
    /// Domain of fallback emails (`user<digits>@<domain>`).
    pub fallback_domain: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            password: "123456".into(),
            max_attempts: 5,
            fallback_domain: "example.com".into(),
        }
    }
}
