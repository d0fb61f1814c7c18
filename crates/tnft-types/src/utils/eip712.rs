//! EIP-712 helpers for TNFT vouchers.
//!
//! The voucher signing domain is fixed to name `TNFT-Voucher`, version `1`;
//! only the chain id and verifying contract vary.

use alloy::primitives::{Address, U256};
use alloy::sol_types::Eip712Domain;
use std::borrow::Cow;

/// Protocol name bound into every voucher signature.
pub const SIGNING_DOMAIN: &str = "TNFT-Voucher";
/// Protocol version bound into every voucher signature.
pub const SIGNATURE_VERSION: &str = "1";
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Field list of the domain type, as `(name, solidity type)` pairs.
pub const DOMAIN_FIELDS: [(&str, &str); 4] = [
	("name", "string"),
	("version", "string"),
	("chainId", "uint256"),
	("verifyingContract", "address"),
];

/// Builds the voucher signing domain for a contract on a chain.
pub fn signing_domain(chain_id: U256, verifying_contract: Address) -> Eip712Domain {
	Eip712Domain::new(
		Some(Cow::Borrowed(SIGNING_DOMAIN)),
		Some(Cow::Borrowed(SIGNATURE_VERSION)),
		Some(chain_id),
		Some(verifying_contract),
		None,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_domain_type_matches_fields() {
		let fields: Vec<String> = DOMAIN_FIELDS
			.iter()
			.map(|(name, ty)| format!("{} {}", ty, name))
			.collect();
		let rendered = format!("EIP712Domain({})", fields.join(","));

		assert_eq!(rendered, DOMAIN_TYPE);
		assert_eq!(
			signing_domain(U256::from(1u64), Address::ZERO).encode_type(),
			DOMAIN_TYPE
		);
	}

	#[test]
	fn test_domain_binds_chain_and_contract() {
		let contract = Address::repeat_byte(0x42);
		let base = signing_domain(U256::from(137u64), contract).separator();

		assert_ne!(base, signing_domain(U256::from(80001u64), contract).separator());
		assert_ne!(
			base,
			signing_domain(U256::from(137u64), Address::repeat_byte(0x43)).separator()
		);
	}
}
