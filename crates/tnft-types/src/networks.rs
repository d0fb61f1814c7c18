//! Network configuration types for multi-chain TNFT deployments.
//!
//! This module defines the per-chain deployment record: the addresses of the
//! contracts the TNFT suite talks to, feature flags, metadata URLs and the
//! RPC and explorer endpoints used when deploying to that chain.

use crate::{Address, SecretString};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a network key cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid network key '{0}': expected a chain id or \"default\"")]
pub struct NetworkKeyError(pub String);

/// Key identifying a network record.
///
/// Most records are keyed by their chain id. The in-process development
/// network has no chain id entry of its own and lives under `Default`.
///
/// Keys order chain ids ascending with `Default` last, which is also the
/// order records are registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NetworkKey {
	Chain(u64),
	Default,
}

impl NetworkKey {
	/// Returns the chain id, if this key names a concrete chain.
	pub fn chain_id(&self) -> Option<u64> {
		match self {
			NetworkKey::Chain(id) => Some(*id),
			NetworkKey::Default => None,
		}
	}
}

impl fmt::Display for NetworkKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NetworkKey::Chain(id) => write!(f, "{}", id),
			NetworkKey::Default => f.write_str("default"),
		}
	}
}

impl FromStr for NetworkKey {
	type Err = NetworkKeyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		if trimmed == "default" {
			return Ok(NetworkKey::Default);
		}
		trimmed
			.parse::<u64>()
			.map(NetworkKey::Chain)
			.map_err(|_| NetworkKeyError(s.to_string()))
	}
}

impl From<u64> for NetworkKey {
	fn from(chain_id: u64) -> Self {
		NetworkKey::Chain(chain_id)
	}
}

impl Serialize for NetworkKey {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for NetworkKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct KeyVisitor;

		impl de::Visitor<'_> for KeyVisitor {
			type Value = NetworkKey;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a chain id or \"default\"")
			}

			fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
				Ok(NetworkKey::Chain(v))
			}

			fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
				u64::try_from(v)
					.map(NetworkKey::Chain)
					.map_err(|_| E::custom(NetworkKeyError(v.to_string())))
			}

			fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
				v.parse().map_err(E::custom)
			}
		}

		deserializer.deserialize_any(KeyVisitor)
	}
}

/// Serde adapter for address fields that may be left empty.
///
/// An empty string means "not deployed on this chain" and maps to `None`.
/// Anything else must parse as an address.
pub mod optional_address {
	use super::*;

	pub fn serialize<S>(value: &Option<Address>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match value {
			Some(address) => serializer.serialize_str(&address.to_checksum(None)),
			None => serializer.serialize_str(""),
		}
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			return Ok(None);
		}
		trimmed
			.parse::<Address>()
			.map(Some)
			.map_err(|e| de::Error::custom(format!("Invalid address '{}': {}", raw, e)))
	}
}

macro_rules! contract_addresses {
	($( $(#[$doc:meta])* $field:ident ),* $(,)?) => {
		/// Addresses of the contracts the TNFT suite depends on for one chain.
		///
		/// Every field is optional: `None` means the contract is not deployed
		/// on that chain, which callers must handle rather than treat as an error.
		#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
		#[serde(default)]
		pub struct ContractAddresses {
			$(
				$(#[$doc])*
				#[serde(with = "optional_address")]
				pub $field: Option<Address>,
			)*
		}

		impl ContractAddresses {
			/// Returns every address field paired with its configuration name.
			pub fn entries(&self) -> Vec<(&'static str, Option<Address>)> {
				vec![$( (stringify!($field), self.$field) ),*]
			}

			/// Looks up an address field by its configuration name.
			///
			/// Returns `None` for an unknown field name and `Some(None)` for a
			/// known field that is not deployed.
			pub fn get(&self, field: &str) -> Option<Option<Address>> {
				match field {
					$( stringify!($field) => Some(self.$field), )*
					_ => None,
				}
			}
		}
	};
}

contract_addresses! {
	/// USDC stablecoin.
	usdc_address,
	/// USDT stablecoin.
	usdt_address,
	/// USDR stablecoin.
	usdr_address,
	/// USTB stablecoin.
	ustb_address,
	/// DAI stablecoin.
	dai_address,
	/// TNGBL governance token.
	tngbl_address,
	/// Wrapped native token.
	wrapped_matic,
	/// Chainlink XAU/USD feed.
	chain_link_gold_oracle,
	/// Chainlink GBP/USD feed.
	chain_link_gbp_oracle,
	/// Matrix oracle used for real estate pricing.
	chainlink_matrix_oracle,
	router_address,
	pearl_router,
	pearl_factory,
	uniswap_factory,
	aave_pool,
	our_pool,
	/// Tangible Labs operational account (multisig on production chains).
	tangible_labs,
	/// DAO account (multisig on production chains).
	tangible_dao,
	passive_nft_address,
	revenue_share,
	rent_share,
	/// Revenue distributor receiving protocol fees.
	fee_distributor,
}

/// RPC endpoint used to reach a chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RpcEndpoint {
	/// HTTP(S) JSON-RPC URL.
	pub url: String,
	/// Deployer private keys, in named-account order.
	#[serde(default)]
	pub accounts: Vec<SecretString>,
	/// Fixed gas price in wei, when the chain needs one.
	pub gas_price: Option<u64>,
	/// Chain id to expect from the endpoint, when it is not the record key.
	pub chain_id: Option<u64>,
}

/// Block explorer used for contract verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExplorerConfig {
	pub api_key: Option<SecretString>,
	pub api_url: Option<String>,
	pub browser_url: Option<String>,
}

/// Deployment record for a single network.
///
/// # Fields
///
/// * `name` - Unique human-readable network name (e.g. "polygon")
/// * `contracts` - Contract addresses, flattened into the record table
/// * `token_url` - Base URL for token metadata
/// * `fetch_external` - Base URL of the metadata API
/// * `instant_trade_enabled` - Whether instant trades are allowed on this chain
///
/// Keys that name no field are rejected, so a misspelled contract address
/// fails to load instead of silently reading as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawNetworkRecord")]
pub struct NetworkRecord {
	pub name: String,
	#[serde(flatten)]
	pub contracts: ContractAddresses,
	pub token_url: Option<String>,
	pub fetch_external: Option<String>,
	pub revenue_share_abi: Option<String>,
	pub passive_nft_abi: Option<String>,
	#[serde(default)]
	pub instant_trade_enabled: bool,
	pub rpc: Option<RpcEndpoint>,
	pub explorer: Option<ExplorerConfig>,
}

// `deny_unknown_fields` does not combine with `flatten`; leftover keys are
// collected here instead.
#[derive(Deserialize)]
struct RawNetworkRecord {
	name: String,
	#[serde(flatten)]
	contracts: ContractAddresses,
	token_url: Option<String>,
	fetch_external: Option<String>,
	revenue_share_abi: Option<String>,
	passive_nft_abi: Option<String>,
	#[serde(default)]
	instant_trade_enabled: bool,
	rpc: Option<RpcEndpoint>,
	explorer: Option<ExplorerConfig>,
	#[serde(flatten)]
	unknown: BTreeMap<String, de::IgnoredAny>,
}

impl TryFrom<RawNetworkRecord> for NetworkRecord {
	type Error = String;

	fn try_from(raw: RawNetworkRecord) -> Result<Self, Self::Error> {
		if let Some(key) = raw.unknown.keys().next() {
			return Err(format!(
				"unknown field `{}` in network '{}'",
				key, raw.name
			));
		}

		Ok(Self {
			name: raw.name,
			contracts: raw.contracts,
			token_url: raw.token_url,
			fetch_external: raw.fetch_external,
			revenue_share_abi: raw.revenue_share_abi,
			passive_nft_abi: raw.passive_nft_abi,
			instant_trade_enabled: raw.instant_trade_enabled,
			rpc: raw.rpc,
			explorer: raw.explorer,
		})
	}
}

impl NetworkRecord {
	/// Creates an empty record with the given name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}
}

/// Networks configuration mapping network keys to their records.
///
/// The map is ordered so that iteration and name lookup follow the same
/// registration order everywhere.
pub type NetworksConfig = BTreeMap<NetworkKey, NetworkRecord>;
