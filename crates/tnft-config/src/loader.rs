//! Configuration loader for multi-file configurations.
//!
//! A configuration file may pull in other files with a top-level
//! `include` key (a string or an array of strings). Included files may
//! include further files. Every top-level section must come from exactly
//! one file.

use crate::{resolve_env_vars, Config, ConfigError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration loader that handles multi-file configurations with includes.
pub struct ConfigLoader {
	/// Base path for resolving relative includes
	base_path: PathBuf,
	/// Files on the current include chain, for cycle detection
	include_stack: Vec<PathBuf>,
	/// Which file each top-level section came from
	section_sources: HashMap<String, PathBuf>,
}

impl ConfigLoader {
	pub fn new(base_path: impl AsRef<Path>) -> Self {
		Self {
			base_path: base_path.as_ref().to_path_buf(),
			include_stack: Vec::new(),
			section_sources: HashMap::new(),
		}
	}

	/// Loads a configuration file and everything it includes.
	pub async fn load_config(
		&mut self,
		config_path: impl AsRef<Path>,
	) -> Result<Config, ConfigError> {
		let path = self.resolve_path(config_path.as_ref())?;
		let mut combined = toml::Table::new();
		self.merge_file(&path, &mut combined).await?;

		let rendered = toml::to_string(&combined).map_err(|e| {
			ConfigError::Parse(format!("Failed to serialize combined config: {}", e))
		})?;
		tracing::debug!(
			sections = self.section_sources.len(),
			path = %path.display(),
			"Loaded configuration"
		);
		rendered.parse()
	}

	/// Parses `path`, merges its sections into `combined`, then recurses
	/// into its includes.
	async fn merge_file(
		&mut self,
		path: &Path,
		combined: &mut toml::Table,
	) -> Result<(), ConfigError> {
		let canonical = tokio::fs::canonicalize(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("Cannot resolve path {}: {}", path.display(), e),
			))
		})?;
		if self.include_stack.contains(&canonical) {
			return Err(ConfigError::Validation(format!(
				"Circular include detected: {} was already loaded",
				canonical.display()
			)));
		}

		let content = tokio::fs::read_to_string(&canonical).await?;
		let mut table: toml::Table = toml::from_str(&resolve_env_vars(&content)?)?;
		let includes = Self::take_includes(&mut table)?;

		for (key, value) in table {
			if let Some(existing) = self.section_sources.get(&key) {
				return Err(ConfigError::Validation(format!(
					"Duplicate section '{}' found in {} and {}. \
					Each top-level section must be unique across all configuration files.",
					key,
					existing.display(),
					canonical.display()
				)));
			}
			self.section_sources.insert(key.clone(), canonical.clone());
			combined.insert(key, value);
		}

		self.include_stack.push(canonical);
		for include in includes {
			let resolved = self.resolve_path(&include)?;
			Box::pin(self.merge_file(&resolved, combined)).await?;
		}
		self.include_stack.pop();

		Ok(())
	}

	/// Removes the `include` directive from a parsed file.
	fn take_includes(table: &mut toml::Table) -> Result<Vec<PathBuf>, ConfigError> {
		match table.remove("include") {
			None => Ok(Vec::new()),
			Some(toml::Value::String(path)) => Ok(vec![PathBuf::from(path)]),
			Some(toml::Value::Array(items)) => items
				.into_iter()
				.map(|item| match item {
					toml::Value::String(path) => Ok(PathBuf::from(path)),
					_ => Err(ConfigError::Validation(
						"Include array must contain only strings".into(),
					)),
				})
				.collect(),
			Some(_) => Err(ConfigError::Validation(
				"Include must be a string or array of strings".into(),
			)),
		}
	}

	/// Resolves a path relative to the base path.
	fn resolve_path(&self, path: &Path) -> Result<PathBuf, ConfigError> {
		let resolved = if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.base_path.join(path)
		};

		if !resolved.exists() {
			return Err(ConfigError::Io(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("Configuration file not found: {}", resolved.display()),
			)));
		}

		Ok(resolved)
	}
}
