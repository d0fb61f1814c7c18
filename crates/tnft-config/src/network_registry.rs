//! Read-only registry of network records.
//!
//! The registry is built once from the configured networks and never
//! mutated. Records live in an arena in registration order (key order) with
//! two indices on top, one by key and one by name, so lookups in either
//! direction avoid a scan.

use crate::DeploymentSettings;
use std::collections::HashMap;
use tnft_types::{NetworkKey, NetworkRecord, NetworksConfig};

/// Immutable network lookup table.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
	records: Vec<(NetworkKey, NetworkRecord)>,
	by_key: HashMap<NetworkKey, usize>,
	by_name: HashMap<String, usize>,
	development: Vec<String>,
	local: Vec<String>,
}

impl NetworkRegistry {
	/// Builds the registry.
	///
	/// Records are registered in key order. When two records share a name,
	/// the name index keeps the first one registered and the duplicate is
	/// reachable only through its key.
	pub fn new(networks: NetworksConfig, deployment: &DeploymentSettings) -> Self {
		let mut by_key = HashMap::with_capacity(networks.len());
		let mut by_name = HashMap::with_capacity(networks.len());
		let records: Vec<_> = networks.into_iter().collect();

		for (index, (key, record)) in records.iter().enumerate() {
			by_key.insert(*key, index);
			if by_name.contains_key(&record.name) {
				tracing::warn!(
					network = %key,
					name = %record.name,
					"Duplicate network name, keeping the first registered record"
				);
				continue;
			}
			by_name.insert(record.name.clone(), index);
		}

		Self {
			records,
			by_key,
			by_name,
			development: deployment.development_chains.clone(),
			local: deployment.development_chains_local.clone(),
		}
	}

	/// Returns the record registered under `key`.
	pub fn get(&self, key: &NetworkKey) -> Option<&NetworkRecord> {
		self.by_key.get(key).map(|&index| &self.records[index].1)
	}

	/// Returns the record for a concrete chain id.
	pub fn get_chain(&self, chain_id: u64) -> Option<&NetworkRecord> {
		self.get(&NetworkKey::Chain(chain_id))
	}

	/// Returns the key and record registered under `name`.
	pub fn get_by_name(&self, name: &str) -> Option<(NetworkKey, &NetworkRecord)> {
		self.by_name.get(name).map(|&index| {
			let (key, record) = &self.records[index];
			(*key, record)
		})
	}

	/// Maps a network name to its key.
	///
	/// Matching is exact and case-sensitive. Returns `None` for unknown names.
	pub fn resolve_chain_id(&self, name: &str) -> Option<NetworkKey> {
		self.get_by_name(name).map(|(key, _)| key)
	}

	/// Iterates records in registration order.
	pub fn iter(&self) -> impl Iterator<Item = (&NetworkKey, &NetworkRecord)> {
		self.records.iter().map(|(key, record)| (key, record))
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Whether test tooling is deployed on the named network.
	pub fn is_development(&self, name: &str) -> bool {
		self.development.iter().any(|n| n == name)
	}

	/// Whether the named network runs in-process or on a local node.
	pub fn is_local(&self, name: &str) -> bool {
		self.local.iter().any(|n| n == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::presets;
	use std::collections::BTreeMap;

	fn builtin() -> NetworkRegistry {
		NetworkRegistry::new(presets::networks(|_| None), &DeploymentSettings::default())
	}

	#[test]
	fn test_resolve_every_known_name() {
		let registry = builtin();
		let expected = [
			("hardhat", NetworkKey::Default),
			("localhost", NetworkKey::Chain(31337)),
			("unreal", NetworkKey::Chain(18231)),
			("mumbai", NetworkKey::Chain(80001)),
			("polygon", NetworkKey::Chain(137)),
		];

		for (name, key) in expected {
			assert_eq!(registry.resolve_chain_id(name), Some(key), "{}", name);
			assert_eq!(registry.get(&key).unwrap().name, name);
		}
	}

	#[test]
	fn test_unknown_name_not_found() {
		let registry = builtin();
		assert_eq!(registry.resolve_chain_id("nosuchchain"), None);
		assert_eq!(registry.resolve_chain_id("Polygon"), None);
		assert_eq!(registry.resolve_chain_id(""), None);
	}

	#[test]
	fn test_duplicate_names_resolve_to_first_registered() {
		let mut networks = BTreeMap::new();
		networks.insert(NetworkKey::Chain(80001), NetworkRecord::new("shared"));
		networks.insert(NetworkKey::Default, NetworkRecord::new("shared"));
		networks.insert(NetworkKey::Chain(137), NetworkRecord::new("shared"));

		let registry = NetworkRegistry::new(networks, &DeploymentSettings::default());

		assert_eq!(registry.resolve_chain_id("shared"), Some(NetworkKey::Chain(137)));
		assert_eq!(registry.len(), 3);
		assert!(registry.get(&NetworkKey::Default).is_some());
	}

	#[test]
	fn test_iteration_follows_key_order() {
		let registry = builtin();
		let names: Vec<_> = registry.iter().map(|(_, r)| r.name.as_str()).collect();
		assert_eq!(names, vec!["polygon", "unreal", "localhost", "mumbai", "hardhat"]);
	}

	#[test]
	fn test_development_chains() {
		let registry = builtin();
		assert!(registry.is_development("mumbai"));
		assert!(!registry.is_development("polygon"));
		assert!(registry.is_local("hardhat"));
		assert!(!registry.is_local("unreal"));
	}

	#[test]
	fn test_get_chain() {
		let registry = builtin();
		let polygon = registry.get_chain(137).unwrap();
		assert!(polygon.contracts.aave_pool.is_some());
		assert!(registry.get_chain(1).is_none());
	}
}
