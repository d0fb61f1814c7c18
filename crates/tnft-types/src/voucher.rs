//! Mint and burn voucher payloads.
//!
//! A voucher is an off-chain signed authorization that a TNFT contract
//! checks before minting or burning. The structs below are the EIP-712
//! message types; their field order and Solidity types are part of the
//! signature and must match the verifying contract exactly.

use crate::signature::{SignatureError, SignatureParts};
use crate::{Address, B256};
use alloy::primitives::Signature;
use alloy::sol;
use alloy::sol_types::{Eip712Domain, SolStruct};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

sol! {
	/// Authorization to mint `mintCount` tokens of `amount` each.
	#[derive(Debug, PartialEq, Eq)]
	struct MintVoucher {
		address token;
		uint256 tokenId;
		uint256 price;
		uint256 storageYears;
		uint256 mintingFee;
		uint256 amount;
		uint256 mintCount;
		address vendor;
		string brand;
	}

	/// Authorization to burn `amount` of `tokenId` held by `from`.
	#[derive(Debug, PartialEq, Eq)]
	struct BurnVoucher {
		address token;
		uint256 tokenId;
		uint256 amount;
		address from;
	}
}

/// A voucher kind that can be signed as EIP-712 typed data.
pub trait VoucherPayload: SolStruct + Clone + Send + Sync {
	/// `(field name, solidity type)` pairs in declaration order.
	const FIELDS: &'static [(&'static str, &'static str)];

	/// The message object of the typed-data document.
	///
	/// Integers are rendered as decimal strings so 256-bit values survive
	/// JSON transports intact.
	fn message(&self) -> Value;
}

fn checksum(address: &Address) -> String {
	address.to_checksum(None)
}

impl VoucherPayload for MintVoucher {
	const FIELDS: &'static [(&'static str, &'static str)] = &[
		("token", "address"),
		("tokenId", "uint256"),
		("price", "uint256"),
		("storageYears", "uint256"),
		("mintingFee", "uint256"),
		("amount", "uint256"),
		("mintCount", "uint256"),
		("vendor", "address"),
		("brand", "string"),
	];

	fn message(&self) -> Value {
		json!({
			"token": checksum(&self.token),
			"tokenId": self.tokenId.to_string(),
			"price": self.price.to_string(),
			"storageYears": self.storageYears.to_string(),
			"mintingFee": self.mintingFee.to_string(),
			"amount": self.amount.to_string(),
			"mintCount": self.mintCount.to_string(),
			"vendor": checksum(&self.vendor),
			"brand": self.brand,
		})
	}
}

impl VoucherPayload for BurnVoucher {
	const FIELDS: &'static [(&'static str, &'static str)] = &[
		("token", "address"),
		("tokenId", "uint256"),
		("amount", "uint256"),
		("from", "address"),
	];

	fn message(&self) -> Value {
		json!({
			"token": checksum(&self.token),
			"tokenId": self.tokenId.to_string(),
			"amount": self.amount.to_string(),
			"from": checksum(&self.from),
		})
	}
}

/// A voucher together with the raw signature over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedVoucher<V> {
	pub voucher: V,
	/// `0x`-prefixed 65-byte signature as returned by the signing agent.
	pub signature: String,
}

impl<V: VoucherPayload> SignedVoucher<V> {
	/// Splits the signature into `r`, `s` and `v`.
	pub fn parts(&self) -> Result<SignatureParts, SignatureError> {
		SignatureParts::from_hex(&self.signature)
	}

	/// The EIP-712 digest the signature commits to under `domain`.
	pub fn signing_hash(&self, domain: &Eip712Domain) -> B256 {
		self.voucher.eip712_signing_hash(domain)
	}

	/// Recovers the address that signed this voucher under `domain`.
	pub fn recover_signer(&self, domain: &Eip712Domain) -> Result<Address, SignatureError> {
		let parts = self.parts()?;
		let signature = Signature::try_from(&parts.to_bytes()[..])
			.map_err(|e| SignatureError::Unrecoverable(e.to_string()))?;
		signature
			.recover_address_from_prehash(&self.signing_hash(domain))
			.map_err(|e| SignatureError::Unrecoverable(e.to_string()))
	}

	/// The voucher fields merged with the signature, as contract-call code
	/// expects them.
	pub fn to_json(&self) -> Value {
		let mut map = match self.voucher.message() {
			Value::Object(map) => map,
			_ => Map::new(),
		};
		map.insert("signature".into(), Value::String(self.signature.clone()));
		Value::Object(map)
	}
}

impl<V: VoucherPayload> Serialize for SignedVoucher<V> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_json().serialize(serializer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::utils::signing_domain;
	use crate::U256;

	fn encode_type<V: VoucherPayload>() -> String {
		let fields: Vec<String> = V::FIELDS
			.iter()
			.map(|(name, ty)| format!("{} {}", ty, name))
			.collect();
		format!("{}({})", V::NAME, fields.join(","))
	}

	fn mint_voucher() -> MintVoucher {
		MintVoucher {
			token: Address::with_last_byte(1),
			tokenId: U256::from(1u64),
			price: U256::from(1000u64),
			storageYears: U256::from(2u64),
			mintingFee: U256::from(50u64),
			amount: U256::from(1u64),
			mintCount: U256::from(1u64),
			vendor: Address::with_last_byte(2),
			brand: "Acme".to_string(),
		}
	}

	#[test]
	fn test_field_schemas_match_sol_types() {
		assert_eq!(
			encode_type::<MintVoucher>(),
			MintVoucher::eip712_encode_type()
		);
		assert_eq!(
			encode_type::<BurnVoucher>(),
			BurnVoucher::eip712_encode_type()
		);
	}

	#[test]
	fn test_message_keeps_full_width_integers() {
		let mut voucher = mint_voucher();
		voucher.tokenId = U256::MAX;
		let message = voucher.message();

		assert_eq!(message["tokenId"], U256::MAX.to_string());
		assert_eq!(
			message["token"],
			"0x0000000000000000000000000000000000000001"
		);
		assert_eq!(message["brand"], "Acme");
	}

	#[test]
	fn test_signing_hash_prefixes_domain_and_struct() {
		let domain = signing_domain(U256::from(31337u64), Address::repeat_byte(0x42));
		let signed = SignedVoucher {
			voucher: mint_voucher(),
			signature: String::new(),
		};

		let mut preimage = vec![0x19, 0x01];
		preimage.extend_from_slice(domain.separator().as_slice());
		preimage.extend_from_slice(signed.voucher.eip712_hash_struct().as_slice());

		assert_eq!(signed.signing_hash(&domain), alloy::primitives::keccak256(preimage));
	}

	#[test]
	fn test_signed_voucher_json_merges_signature() {
		let signed = SignedVoucher {
			voucher: BurnVoucher {
				token: Address::with_last_byte(1),
				tokenId: U256::from(7u64),
				amount: U256::from(3u64),
				from: Address::with_last_byte(9),
			},
			signature: "0xdead".to_string(),
		};
		let json = serde_json::to_value(&signed).unwrap();

		assert_eq!(json["tokenId"], "7");
		assert_eq!(json["amount"], "3");
		assert_eq!(json["signature"], "0xdead");
		assert!(signed.parts().is_err());
	}
}
