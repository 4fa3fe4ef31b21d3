use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable overriding [`Config::floatx`].
pub const FLOATX_ENV: &str = "SAFE_ASARRAY_FLOATX";

/// Default floating-point element type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatX {
    Float32,
    #[default]
    Float64,
}

impl fmt::Display for FloatX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatX::Float32 => f.write_str("float32"),
            FloatX::Float64 => f.write_str("float64"),
        }
    }
}

impl FromStr for FloatX {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float32" => Ok(FloatX::Float32),
            "float64" => Ok(FloatX::Float64),
            _ => Err(ConfigError::InvalidFloatX(s.to_string())),
        }
    }
}

/// Process-level settings consulted when resolving `floatX`.
///
/// ```toml
/// floatX = "float32"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "floatX")]
    pub floatx: FloatX,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), floatx = %config.floatx, "loaded config");
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `SAFE_ASARRAY_FLOATX` if it is set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_floatx_override(std::env::var(FLOATX_ENV).ok().as_deref())
    }

    fn with_floatx_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = value {
            self.floatx = value.parse()?;
            tracing::debug!(floatx = %self.floatx, "floatX overridden from {}", FLOATX_ENV);
        }
        Ok(self)
    }
}
