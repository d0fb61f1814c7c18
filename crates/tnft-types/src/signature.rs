//! Decomposition of 65-byte ECDSA signatures.
//!
//! Contracts verifying vouchers take either the packed signature or its
//! `r`, `s` and `v` components. The split is deterministic: the first 32
//! bytes are `r`, the next 32 are `s` and the final byte is `v`.

use crate::utils::without_0x_prefix;
use crate::B256;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Length of a packed `r || s || v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Errors that can occur when decoding a signature.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
	/// The signature is not valid hex.
	#[error("Invalid signature hex: {0}")]
	InvalidHex(String),
	/// The signature decoded to the wrong number of bytes.
	#[error("Invalid signature length: expected {SIGNATURE_LENGTH} bytes, got {0}")]
	InvalidLength(usize),
	/// No signer address could be recovered from the signature.
	#[error("Unrecoverable signature: {0}")]
	Unrecoverable(String),
}

/// The components of a packed signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureParts {
	pub r: B256,
	pub s: B256,
	/// Recovery byte, 27 or 28 for signatures produced by standard signers.
	pub v: u8,
}

impl SignatureParts {
	/// Splits a `0x`-prefixed (or bare) hex signature into its parts.
	pub fn from_hex(signature: &str) -> Result<Self, SignatureError> {
		let bytes = hex::decode(without_0x_prefix(signature.trim()))
			.map_err(|e| SignatureError::InvalidHex(e.to_string()))?;
		Self::from_bytes(&bytes)
	}

	/// Splits a packed signature into its parts.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
		if bytes.len() != SIGNATURE_LENGTH {
			return Err(SignatureError::InvalidLength(bytes.len()));
		}
		Ok(Self {
			r: B256::from_slice(&bytes[..32]),
			s: B256::from_slice(&bytes[32..64]),
			v: bytes[64],
		})
	}

	/// Packs the parts back into `r || s || v`.
	pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
		let mut out = [0u8; SIGNATURE_LENGTH];
		out[..32].copy_from_slice(self.r.as_slice());
		out[32..64].copy_from_slice(self.s.as_slice());
		out[64] = self.v;
		out
	}
}

impl Serialize for SignatureParts {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		#[derive(Serialize)]
		struct Parts {
			r: String,
			s: String,
			v: u8,
		}

		Parts {
			r: format!("{:#x}", self.r),
			s: format!("{:#x}", self.s),
			v: self.v,
		}
		.serialize(serializer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_signature() -> String {
		format!("0x{}{}1c", "aa".repeat(32), "bb".repeat(32))
	}

	#[test]
	fn test_split_signature() {
		let parts = SignatureParts::from_hex(&sample_signature()).unwrap();

		assert_eq!(parts.r, B256::repeat_byte(0xaa));
		assert_eq!(parts.s, B256::repeat_byte(0xbb));
		assert_eq!(parts.v, 28);
	}

	#[test]
	fn test_split_without_prefix() {
		let bare = sample_signature()[2..].to_string();
		let parts = SignatureParts::from_hex(&bare).unwrap();
		assert_eq!(parts.v, 0x1c);
	}

	#[test]
	fn test_pack_restores_original() {
		let parts = SignatureParts::from_hex(&sample_signature()).unwrap();
		assert_eq!(
			format!("0x{}", hex::encode(parts.to_bytes())),
			sample_signature()
		);
	}

	#[test]
	fn test_short_signature_rejected() {
		let short = format!("0x{}", "aa".repeat(64));
		assert_eq!(
			SignatureParts::from_hex(&short),
			Err(SignatureError::InvalidLength(64))
		);
	}

	#[test]
	fn test_long_signature_rejected() {
		let long = format!("{}00", sample_signature());
		assert_eq!(
			SignatureParts::from_hex(&long),
			Err(SignatureError::InvalidLength(66))
		);
	}

	#[test]
	fn test_non_hex_rejected() {
		assert!(matches!(
			SignatureParts::from_hex("0xzz"),
			Err(SignatureError::InvalidHex(_))
		));
	}

	#[test]
	fn test_serialize_parts() {
		let parts = SignatureParts::from_hex(&sample_signature()).unwrap();
		let json = serde_json::to_value(parts).unwrap();
		assert_eq!(json["v"], 28);
		assert_eq!(json["r"], format!("0x{}", "aa".repeat(32)));
	}
}
