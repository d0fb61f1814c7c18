//! Redacting string type for deployer keys and explorer API tokens.
//!
//! Network records carry private keys and API tokens read from the
//! environment. `SecretString` zeroes its buffer on drop and never prints
//! its contents, so records can be logged or dumped as JSON safely.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

const REDACTED: &str = "***REDACTED***";

/// A string that is zeroed on drop and redacted in `Debug`, `Display` and
/// serialized output.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the secret value.
	///
	/// Callers must not log or persist the returned slice.
	pub fn expose_secret(&self) -> &str {
		&self.0
	}

	/// Runs `f` with the exposed secret, limiting how long it is borrowed.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(&self.0)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString({})", REDACTED)
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

// Dumped records must never leak keys, so serialization always redacts.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_private_key_is_redacted() {
		let key = SecretString::from("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");

		assert_eq!(format!("{:?}", key), "SecretString(***REDACTED***)");
		assert_eq!(key.to_string(), "***REDACTED***");
		assert_eq!(
			serde_json::to_string(&key).unwrap(),
			"\"***REDACTED***\""
		);
		assert!(key.expose_secret().starts_with("0xac09"));
	}

	#[test]
	fn test_with_exposed_and_equality() {
		let a = SecretString::from("api-key");
		let b = SecretString::from("api-key".to_string());

		assert_eq!(a, b);
		assert_eq!(a.with_exposed(|s| s.len()), 7);
		assert!(!a.is_empty());
		assert!(SecretString::from("").is_empty());
	}
}
