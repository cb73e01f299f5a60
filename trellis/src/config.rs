//! Router configuration.
//!
//! ```toml
//! cache_limit = 500
//! max_param_length = 64
//! allowed_namespaces = ["app::controllers"]
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use trellis_core::ConfigError;
use trellis_std::routing::DEFAULT_CACHE_LIMIT;

/// Default upper bound on the length of one parameter segment, in bytes.
pub const DEFAULT_MAX_PARAM_LENGTH: usize = 255;

/// Tunables of a [`Router`](crate::Router).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Maximum number of cached trie resolutions. `0` disables the cache.
    pub cache_limit: usize,
    /// Maximum length of a matched parameter segment.
    pub max_param_length: usize,
    /// Controller name prefixes accepted for action handlers. Empty allows all.
    pub allowed_namespaces: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cache_limit: DEFAULT_CACHE_LIMIT,
            max_param_length: DEFAULT_MAX_PARAM_LENGTH,
            allowed_namespaces: Vec::new(),
        }
    }
}

impl RouterConfig {
    /// Set the cache limit.
    #[must_use]
    pub fn cache_limit(mut self, limit: usize) -> Self {
        self.cache_limit = limit;
        self
    }

    /// Set the maximum parameter length.
    #[must_use]
    pub fn max_param_length(mut self, limit: usize) -> Self {
        self.max_param_length = limit;
        self
    }

    /// Set the allowed controller namespaces.
    #[must_use]
    pub fn allowed_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_param_length == 0 {
            return Err(ConfigError::Invalid(
                "max_param_length must be at least 1".into(),
            ));
        }
        if let Some(empty) = self.allowed_namespaces.iter().position(|ns| ns.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "allowed_namespaces[{empty}] is empty"
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
