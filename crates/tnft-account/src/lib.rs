//! Signing agents for the TNFT toolkit.
//!
//! A signing agent holds keys and signs EIP-712 typed-data documents on
//! behalf of a signer address. This module defines the agent interface, the
//! error model shared by every agent and the factory registry used to build
//! agents from TOML configuration.

use alloy::dyn_abi::TypedData;
use async_trait::async_trait;
use thiserror::Error;
use tnft_types::{Address, ImplementationRegistry};

/// Re-export implementations
pub mod implementations {
	pub mod local;
	pub mod rpc;
}

/// Errors that can occur during signing.
#[derive(Debug, Error)]
pub enum AccountError {
	/// The agent could not be reached or its response could not be read.
	#[error("Transport error: {0}")]
	Transport(String),
	/// The agent answered but refused or failed to sign.
	#[error("Signing agent rejected the request: {0}")]
	Rejected(String),
	/// A configured key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when configuring or driving the implementation.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Interface of an external key-holding signing agent.
///
/// A request is a single attempt: agents never retry, and timeouts are
/// whatever the underlying transport applies.
#[async_trait]
pub trait SigningAgent: Send + Sync {
	/// Signs `document` with the key of `signer`.
	///
	/// Returns the `0x`-prefixed hex signature exactly as the agent produced
	/// it; validating its length is the caller's job.
	async fn sign_typed_data(
		&self,
		signer: Address,
		document: &TypedData,
	) -> Result<String, AccountError>;

	/// Lists the signer addresses this agent can sign for.
	async fn accounts(&self) -> Result<Vec<Address>, AccountError>;
}

/// Type alias for agent factory functions.
pub type AccountFactory = fn(&toml::Value) -> Result<Box<dyn SigningAgent>, AccountError>;

/// Registry trait for signing agent implementations.
pub trait AccountRegistry: ImplementationRegistry<Factory = AccountFactory> {}

/// Get all registered signing agent implementations.
///
/// Returns a vector of (name, factory) tuples for all available implementations.
pub fn get_all_implementations() -> Vec<(&'static str, AccountFactory)> {
	use implementations::{local, rpc};

	vec![
		(local::Registry::NAME, local::Registry::factory()),
		(rpc::Registry::NAME, rpc::Registry::factory()),
	]
}

/// Service that owns the configured signing agent.
pub struct AccountService {
	implementation: Box<dyn SigningAgent>,
}

impl AccountService {
	pub fn new(implementation: Box<dyn SigningAgent>) -> Self {
		Self { implementation }
	}

	/// Builds the agent registered under `name` from its configuration table.
	pub fn from_config(name: &str, config: &toml::Value) -> Result<Self, AccountError> {
		let factory = get_all_implementations()
			.into_iter()
			.find(|(registered, _)| *registered == name)
			.map(|(_, factory)| factory)
			.ok_or_else(|| {
				AccountError::Implementation(format!("Unknown account implementation '{}'", name))
			})?;
		Ok(Self::new(factory(config)?))
	}

	/// Signs a typed-data document with the key of `signer`.
	pub async fn sign_typed_data(
		&self,
		signer: Address,
		document: &TypedData,
	) -> Result<String, AccountError> {
		self.implementation.sign_typed_data(signer, document).await
	}

	/// Lists the signer addresses available through the agent.
	pub async fn accounts(&self) -> Result<Vec<Address>, AccountError> {
		self.implementation.accounts().await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unknown_implementation_rejected() {
		let config = toml::Value::Table(toml::Table::new());
		let result = AccountService::from_config("hsm", &config);
		assert!(matches!(result, Err(AccountError::Implementation(_))));
	}

	#[tokio::test]
	async fn test_service_builds_local_agent() {
		let mut table = toml::Table::new();
		table.insert(
			"private_keys".into(),
			toml::Value::Array(vec![toml::Value::String(
				"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".into(),
			)]),
		);

		let service = AccountService::from_config("local", &toml::Value::Table(table)).unwrap();
		let accounts = service.accounts().await.unwrap();

		assert_eq!(
			accounts,
			vec!["0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
				.parse::<Address>()
				.unwrap()]
		);
	}
}
