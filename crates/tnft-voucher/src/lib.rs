//! Voucher signing for TNFT contracts.
//!
//! A voucher is signed in a fixed sequence: the verifying contract is asked
//! for its chain id, the EIP-712 domain and typed-data document are built,
//! the document is sent to a signing agent once, and the returned signature
//! is checked to decompose into `r`, `s` and `v` before it is handed back.
//! Each construction is independent; nothing is cached between vouchers.

use alloy::dyn_abi::TypedData;
use alloy::sol_types::Eip712Domain;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tnft_account::{AccountError, AccountService};
use tnft_types::utils::{signing_domain, truncate_id, DOMAIN_FIELDS};
use tnft_types::{
	Address, BurnVoucher, MintVoucher, SignatureError, SignatureParts, SignedVoucher,
	VoucherPayload, U256,
};
use tracing::instrument;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Errors that can occur while constructing a voucher.
#[derive(Debug, Error)]
pub enum VoucherError {
	/// The verifying contract could not be read.
	#[error("Contract read failed: {0}")]
	Contract(String),
	/// The signing agent could not be reached or refused to sign.
	#[error("Signing failed: {0}")]
	Signing(#[from] AccountError),
	/// The agent returned something that is not a 65-byte signature.
	#[error("Malformed signature: {0}")]
	MalformedSignature(#[from] SignatureError),
	/// The typed-data document could not be built.
	#[error("Invalid typed data document: {0}")]
	Document(String),
}

/// Read access to the contract that verifies vouchers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractReader: Send + Sync {
	/// Address of the verifying contract.
	fn address(&self) -> Address;

	/// Chain id as stored by the contract (its `_chainId()` view).
	async fn chain_id(&self) -> Result<U256, VoucherError>;
}

/// Signs mint and burn vouchers for one verifying contract.
pub struct VoucherSigner {
	contract: Arc<dyn ContractReader>,
	accounts: Arc<AccountService>,
}

impl VoucherSigner {
	pub fn new(contract: Arc<dyn ContractReader>, accounts: Arc<AccountService>) -> Self {
		Self { contract, accounts }
	}

	/// Reads the chain id from the contract and builds the signing domain.
	///
	/// The domain is derived fresh on every call. A failed read is returned
	/// as is; no chain id is assumed.
	pub async fn signing_domain(&self) -> Result<Eip712Domain, VoucherError> {
		let chain_id = self.contract.chain_id().await?;
		Ok(signing_domain(chain_id, self.contract.address()))
	}

	/// Builds the typed-data document for `voucher` under `domain`.
	pub fn typed_data<V: VoucherPayload>(
		domain: &Eip712Domain,
		voucher: &V,
	) -> Result<TypedData, VoucherError> {
		fn field_list<'a>(fields: impl IntoIterator<Item = &'a (&'a str, &'a str)>) -> Value {
			fields
				.into_iter()
				.map(|(name, ty)| json!({ "name": name, "type": ty }))
				.collect()
		}

		let mut types = Map::new();
		types.insert("EIP712Domain".into(), field_list(&DOMAIN_FIELDS));
		types.insert(V::NAME.into(), field_list(V::FIELDS));

		let domain =
			serde_json::to_value(domain).map_err(|e| VoucherError::Document(e.to_string()))?;
		let document = json!({
			"types": types,
			"primaryType": V::NAME,
			"domain": domain,
			"message": voucher.message(),
		});

		serde_json::from_value(document).map_err(|e| VoucherError::Document(e.to_string()))
	}

	/// Signs `voucher` with the key of `signer`.
	#[instrument(skip_all, fields(kind = V::NAME, contract = %self.contract.address(), signer = %signer))]
	pub async fn sign<V: VoucherPayload>(
		&self,
		signer: Address,
		voucher: V,
	) -> Result<SignedVoucher<V>, VoucherError> {
		let domain = self.signing_domain().await.inspect_err(|e| {
			tracing::warn!(error = %e, "Failed to derive signing domain");
		})?;
		let document = Self::typed_data(&domain, &voucher)?;

		let signature = self
			.accounts
			.sign_typed_data(signer, &document)
			.await
			.inspect_err(|e| tracing::warn!(error = %e, "Signing agent failed"))?;
		let parts = SignatureParts::from_hex(&signature)?;

		tracing::info!(
			signature = %truncate_id(&signature),
			v = parts.v,
			"Voucher signed"
		);
		Ok(SignedVoucher { voucher, signature })
	}

	/// Signs a mint voucher.
	pub async fn create_mint_voucher(
		&self,
		signer: Address,
		voucher: MintVoucher,
	) -> Result<SignedVoucher<MintVoucher>, VoucherError> {
		self.sign(signer, voucher).await
	}

	/// Signs a burn voucher.
	pub async fn create_burn_voucher(
		&self,
		signer: Address,
		voucher: BurnVoucher,
	) -> Result<SignedVoucher<BurnVoucher>, VoucherError> {
		self.sign(signer, voucher).await
	}
}
