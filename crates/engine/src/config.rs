//! Dispatcher configuration.
//!
//! Every key is optional; an empty document yields [`DispatchConfig::default`].
//!
//! ```toml
//! validation = "collect-all"
//! overloads = "first-declared"
//! hooks = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::introspect::OverloadPolicy;

/// How the parameter gate reports failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
	/// Stop at the first failing parameter.
	#[default]
	FailFast,
	/// Evaluate every parameter and report all failures.
	CollectAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DispatchConfig {
	pub validation: ValidationMode,
	pub overloads: OverloadPolicy,
	/// Run method-level hooks before invocation.
	pub hooks: bool,
}

impl Default for DispatchConfig {
	fn default() -> Self {
		Self {
			validation: ValidationMode::default(),
			overloads: OverloadPolicy::default(),
			hooks: true,
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config {}: {source}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
}

impl DispatchConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses a TOML config file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&input)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_is_default() {
		let config = DispatchConfig::from_toml_str("").unwrap();
		assert_eq!(config, DispatchConfig::default());
		assert_eq!(config.validation, ValidationMode::FailFast);
		assert_eq!(config.overloads, OverloadPolicy::Reject);
		assert!(config.hooks);
	}

	#[test]
	fn parses_kebab_case_values() {
		let config = DispatchConfig::from_toml_str(
			r#"
			validation = "collect-all"
			overloads = "first-declared"
			hooks = false
			"#,
		)
		.unwrap();
		assert_eq!(
			config,
			DispatchConfig {
				validation: ValidationMode::CollectAll,
				overloads: OverloadPolicy::FirstDeclared,
				hooks: false,
			}
		);
	}

	#[test]
	fn rejects_unknown_keys_and_values() {
		assert!(matches!(DispatchConfig::from_toml_str("retries = 3"), Err(ConfigError::Parse(_))));
		assert!(matches!(
			DispatchConfig::from_toml_str(r#"validation = "sometimes""#),
			Err(ConfigError::Parse(_))
		));
	}

	#[test]
	fn missing_file_reports_path() {
		let err = DispatchConfig::load("/nonexistent/vigil.toml").unwrap_err();
		assert!(matches!(err, ConfigError::Read { .. }));
		assert!(err.to_string().contains("/nonexistent/vigil.toml"));
	}
}
