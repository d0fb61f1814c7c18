//! Contract reader backed by an alloy HTTP provider.

use crate::{ContractReader, VoucherError};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;
use tnft_types::{Address, U256};

sol! {
	/// View exposed by TNFT contracts that verify vouchers.
	#[sol(rpc)]
	interface IVoucherVerifier {
		function _chainId() external view returns (uint256);
	}
}

/// Reads the voucher domain inputs from a deployed contract.
pub struct AlloyContractReader {
	contract: IVoucherVerifier::IVoucherVerifierInstance<DynProvider>,
}

impl AlloyContractReader {
	pub fn new(address: Address, provider: DynProvider) -> Self {
		Self {
			contract: IVoucherVerifier::new(address, provider),
		}
	}

	/// Connects to `rpc_url` over HTTP.
	pub fn connect(address: Address, rpc_url: &str) -> Result<Self, VoucherError> {
		let url = rpc_url
			.parse()
			.map_err(|e| VoucherError::Contract(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;
		let provider = ProviderBuilder::new().connect_http(url).erased();
		Ok(Self::new(address, provider))
	}
}

#[async_trait]
impl ContractReader for AlloyContractReader {
	fn address(&self) -> Address {
		*self.contract.address()
	}

	async fn chain_id(&self) -> Result<U256, VoucherError> {
		let chain_id = self
			.contract
			._chainId()
			.call()
			.await
			.map_err(|e| VoucherError::Contract(format!("_chainId() call failed: {}", e)))?;

		tracing::debug!(contract = %self.address(), %chain_id, "Read contract chain id");
		Ok(chain_id)
	}
}
