//! Configuration module for the TNFT deployment toolkit.
//!
//! This module provides the deployment configuration: the per-network
//! records, the asset categories, deployment settings and the signing
//! account setup. Configuration comes either from the built-in presets or
//! from TOML files, with `${VAR}` environment substitution.
//!
//! ## Modular Configuration Support
//!
//! Configurations can be split into multiple files:
//! - Use `include = ["file1.toml", "file2.toml"]` to include other config files
//! - Included files may include further files
//! - Each top-level section must be unique across all files (no duplicates allowed)

mod loader;
mod network_registry;
pub mod presets;

pub use network_registry::NetworkRegistry;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tnft_types::{AssetCatalog, NetworksConfig};

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message, drop the echoed input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Deployment-wide settings. Unset fields take the built-in settings,
	/// with `BLOCK_CONFIRMATIONS` read from the environment.
	#[serde(default)]
	pub deployment: DeploymentSettings,
	/// Network records keyed by chain id (or `default`).
	pub networks: NetworksConfig,
	/// Asset categories. Defaults to the built-in catalog.
	#[serde(default = "presets::assets")]
	pub assets: AssetCatalog,
	/// Signing account setup, required only for signing vouchers.
	pub account: Option<AccountConfig>,
}

/// Deployment-wide settings shared by every network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploymentSettings {
	/// Networks where test tooling (mocks, faucets) is deployed.
	pub development_chains: Vec<String>,
	/// Networks that run in-process or on a local node.
	pub development_chains_local: Vec<String>,
	/// Confirmations to wait for after each deployment transaction.
	pub block_confirmations: u64,
	/// GBP conversion fee passed to the price oracles.
	pub gbp_conversion_fee: u64,
	/// Role name to account index.
	pub named_accounts: BTreeMap<String, u32>,
}

impl Default for DeploymentSettings {
	fn default() -> Self {
		let named_accounts = [
			"deployer",
			"storageFeeAddress",
			"sellFeeAddress",
			"priceManager",
			"randomUser",
			"randomUser2",
			"randomUser3",
			"randomUser4",
		]
		.into_iter()
		.zip(0u32..)
		.map(|(name, index)| (name.to_string(), index))
		.collect();

		Self {
			development_chains: ["hardhat", "localhost", "mumbai", "unreal"]
				.map(String::from)
				.to_vec(),
			development_chains_local: ["hardhat", "localhost"].map(String::from).to_vec(),
			block_confirmations: 0,
			gbp_conversion_fee: 1_000_000,
			named_accounts,
		}
	}
}

/// Configuration for the signing accounts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of account implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

impl AccountConfig {
	/// Returns the configuration table of the primary implementation.
	pub fn primary_config(&self) -> Result<&toml::Value, ConfigError> {
		self.implementations.get(&self.primary).ok_or_else(|| {
			ConfigError::Validation(format!(
				"Primary account '{}' not found in implementations",
				self.primary
			))
		})
	}
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	resolve_env_vars_with(input, |name| std::env::var(name).ok())
}

fn resolve_env_vars_with(
	input: &str,
	lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;
	for cap in re.captures_iter(input) {
		let (Some(full), Some(name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let value = match (lookup(name.as_str()), cap.get(2)) {
			(Some(value), _) => value,
			(None, Some(default)) => default.as_str().to_string(),
			(None, None) => {
				return Err(ConfigError::Validation(format!(
					"Environment variable '{}' not found",
					name.as_str()
				)))
			},
		};
		result.push_str(&input[last..full.start()]);
		result.push_str(&value);
		last = full.end();
	}
	result.push_str(&input[last..]);

	Ok(result)
}

impl Config {
	/// Builds the built-in configuration, reading RPC URLs, deployer keys
	/// and explorer tokens from the process environment.
	pub fn builtin() -> Self {
		Self::builtin_with(|name| std::env::var(name).ok())
	}

	/// Builds the built-in configuration against an explicit environment.
	pub fn builtin_with(env: impl Fn(&str) -> Option<String>) -> Self {
		Self {
			deployment: presets::deployment(&env),
			networks: presets::networks(&env),
			assets: presets::assets(),
			account: None,
		}
	}

	/// Loads configuration from a file.
	///
	/// This method supports modular configuration through include directives:
	/// - `include = ["file1.toml", "file2.toml"]` - Include specific files
	///
	/// Each top-level section must be unique across all configuration files.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
		let file_name = path.file_name().ok_or_else(|| {
			ConfigError::Validation(format!("Invalid path: {}", path.display()))
		})?;

		let mut loader = loader::ConfigLoader::new(base_dir);
		loader.load_config(file_name).await
	}

	/// Parses configuration from a TOML string against an explicit
	/// environment.
	///
	/// `env` resolves `${VAR}` references and supplies `BLOCK_CONFIRMATIONS`
	/// when the file does not set `deployment.block_confirmations`.
	pub fn from_str_with(
		s: &str,
		env: impl Fn(&str) -> Option<String>,
	) -> Result<Self, ConfigError> {
		let resolved = resolve_env_vars_with(s, &env)?;
		let table: toml::Table = toml::from_str(&resolved)?;
		let confirmations_set = table
			.get("deployment")
			.and_then(|deployment| deployment.get("block_confirmations"))
			.is_some();

		let mut config: Config = toml::Value::Table(table).try_into()?;
		if !confirmations_set {
			config.deployment.block_confirmations = presets::deployment(&env).block_confirmations;
		}
		config.validate()?;
		Ok(config)
	}

	/// Builds the network registry for this configuration.
	pub fn registry(&self) -> NetworkRegistry {
		NetworkRegistry::new(self.networks.clone(), &self.deployment)
	}

	/// Validates the configuration.
	///
	/// - At least one network must be configured
	/// - Network names must be non-empty and unique
	/// - RPC URLs, when present, must not be empty
	/// - The primary account implementation must be configured
	fn validate(&self) -> Result<(), ConfigError> {
		if self.networks.is_empty() {
			return Err(ConfigError::Validation(
				"Networks configuration cannot be empty".into(),
			));
		}

		let mut names = HashSet::new();
		for (key, network) in &self.networks {
			if network.name.trim().is_empty() {
				return Err(ConfigError::Validation(format!(
					"Network {} must have a name",
					key
				)));
			}
			if !names.insert(network.name.as_str()) {
				return Err(ConfigError::Validation(format!(
					"Duplicate network name '{}' on network {}",
					network.name, key
				)));
			}
			if let Some(rpc) = &network.rpc {
				if rpc.url.trim().is_empty() {
					return Err(ConfigError::Validation(format!(
						"Network {} has an empty rpc url",
						key
					)));
				}
			}
		}

		if let Some(account) = &self.account {
			if account.primary.is_empty() {
				return Err(ConfigError::Validation(
					"Account primary implementation cannot be empty".into(),
				));
			}
			account.primary_config()?;
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved before parsing and the configuration
/// is validated afterwards.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_str_with(s, |name| std::env::var(name).ok())
	}
}
