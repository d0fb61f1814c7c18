//! In-process keyring signing agent.
//!
//! Holds a list of private keys and signs typed-data documents with the one
//! whose address matches the requested signer. Intended for local networks
//! and tests, where the keys are the well-known development accounts.

use crate::{AccountError, SigningAgent};
use alloy::dyn_abi::TypedData;
use alloy::signers::{local::PrivateKeySigner, Signer};
use async_trait::async_trait;
use tnft_types::{with_0x_prefix, Address, SecretString};

/// Keyring of local private keys.
pub struct LocalKeyring {
	signers: Vec<PrivateKeySigner>,
}

impl LocalKeyring {
	/// Builds a keyring from hex-encoded private keys, with or without `0x`.
	pub fn new(private_keys: &[SecretString]) -> Result<Self, AccountError> {
		let signers = private_keys
			.iter()
			.enumerate()
			.map(|(index, key)| {
				key.with_exposed(|k| k.parse::<PrivateKeySigner>()).map_err(|_| {
					AccountError::InvalidKey(format!("Invalid private key at index {}", index))
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { signers })
	}

	fn signer_for(&self, address: Address) -> Option<&PrivateKeySigner> {
		self.signers.iter().find(|s| s.address() == address)
	}
}

#[async_trait]
impl SigningAgent for LocalKeyring {
	async fn sign_typed_data(
		&self,
		signer: Address,
		document: &TypedData,
	) -> Result<String, AccountError> {
		let key = self
			.signer_for(signer)
			.ok_or_else(|| AccountError::Rejected("unknown account".into()))?;

		let hash = document
			.eip712_signing_hash()
			.map_err(|e| AccountError::Rejected(format!("Invalid typed data: {}", e)))?;
		let signature = key
			.sign_hash(&hash)
			.await
			.map_err(|e| AccountError::Rejected(e.to_string()))?;

		tracing::debug!(%signer, %hash, "Signed typed data with local key");
		Ok(with_0x_prefix(&hex::encode(signature.as_bytes())))
	}

	async fn accounts(&self) -> Result<Vec<Address>, AccountError> {
		Ok(self.signers.iter().map(|s| s.address()).collect())
	}
}

/// Factory function to create a local keyring from configuration.
///
/// Configuration parameters:
/// - `private_keys` (required): array of hex private keys
pub fn create_account(config: &toml::Value) -> Result<Box<dyn SigningAgent>, AccountError> {
	let keys = config
		.get("private_keys")
		.and_then(|v| v.as_array())
		.ok_or_else(|| AccountError::Implementation("private_keys is required".into()))?
		.iter()
		.map(|v| {
			v.as_str().map(SecretString::from).ok_or_else(|| {
				AccountError::Implementation("private_keys must contain only strings".into())
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(Box::new(LocalKeyring::new(&keys)?))
}

/// Registry for the local keyring implementation.
pub struct Registry;

impl tnft_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = crate::AccountFactory;

	fn factory() -> Self::Factory {
		create_account
	}
}

impl crate::AccountRegistry for Registry {}
