//! Spec-file configuration
//!
//! Layered from built-in defaults, then environment variables, then per-call
//! tool arguments.

use serde::{Deserialize, Serialize};

pub const SPEC_SUFFIX_ENV: &str = "MOCKTHIS_SPEC_SUFFIX";
pub const DEFAULT_EXTENSION_ENV: &str = "MOCKTHIS_DEFAULT_EXTENSION";

const DEFAULT_SUFFIX: &str = ".spec";

/// Recognized test-file suffixes and the one used for new files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MockConfig {
    /// Suffixes that mark a test file, in lookup order (`.spec`, `.test`, ...)
    pub spec_suffix: Vec<String>,
    /// Suffix used when a new test file has to be created
    pub default_extension: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            spec_suffix: vec![DEFAULT_SUFFIX.to_string()],
            default_extension: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl MockConfig {
    /// Defaults overridden by `MOCKTHIS_SPEC_SUFFIX` (comma separated) and
    /// `MOCKTHIS_DEFAULT_EXTENSION`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(SPEC_SUFFIX_ENV) {
            let suffixes = parse_suffix_list(&raw);
            if !suffixes.is_empty() {
                config.spec_suffix = suffixes;
            }
        }

        if let Some(raw) = lookup(DEFAULT_EXTENSION_ENV) {
            let extension = raw.trim();
            if !extension.is_empty() {
                config.default_extension = extension.to_string();
            }
        }

        log::debug!("Loaded configuration: {:?}", config);
        config
    }

    /// A copy with per-request overrides applied
    pub fn with_overrides(
        &self,
        spec_suffix: Option<&[String]>,
        default_extension: Option<&str>,
    ) -> Self {
        let mut config = self.clone();

        if let Some(suffixes) = spec_suffix.filter(|suffixes| !suffixes.is_empty()) {
            config.spec_suffix = suffixes.to_vec();
        }
        if let Some(extension) = default_extension.map(str::trim).filter(|e| !e.is_empty()) {
            config.default_extension = extension.to_string();
        }

        config
    }
}

fn parse_suffix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|suffix| !suffix.is_empty())
        .map(str::to_string)
        .collect()
}
