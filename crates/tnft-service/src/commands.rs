//! Command implementations.
//!
//! Each command returns the JSON value printed by the binary, so the output
//! can be checked without capturing stdout.

use serde_json::{json, Map, Value};
use std::sync::Arc;
use tnft_account::implementations::local::LocalKeyring;
use tnft_account::implementations::rpc::RpcSigningAgent;
use tnft_account::AccountService;
use tnft_config::{Config, NetworkRegistry};
use tnft_types::{Address, SecretString};
use tnft_voucher::implementations::evm::alloy::AlloyContractReader;
use tnft_voucher::VoucherSigner;

/// Where and by whom a voucher is signed.
#[derive(clap::Args, Debug)]
pub struct Target {
	/// Network name, as registered in the configuration
	#[arg(long)]
	pub network: String,

	/// Address of the contract that verifies the voucher
	#[arg(long)]
	pub contract: Address,

	/// Address of the signing account
	#[arg(long)]
	pub signer: Address,

	/// Private key for a local keyring, used when no account is configured
	#[arg(long, env = "TNFT_PRIVATE_KEY", hide_env_values = true)]
	pub private_key: Option<SecretString>,
}

/// Every registered record, keyed by chain key.
pub fn networks(registry: &NetworkRegistry) -> Result<Value, serde_json::Error> {
	let mut records = Map::new();
	for (key, record) in registry.iter() {
		records.insert(key.to_string(), serde_json::to_value(record)?);
	}
	Ok(Value::Object(records))
}

/// The chain key registered under `name`.
pub fn resolve(registry: &NetworkRegistry, name: &str) -> Result<Value, String> {
	registry
		.resolve_chain_id(name)
		.map(|key| json!({ "name": name, "chain_id": key }))
		.ok_or_else(|| format!("Network '{}' not found", name))
}

/// Builds a voucher signer for the target network and contract.
///
/// The signing agent is the configured primary account. Without one, a
/// local keyring is built from `--private-key`, or else from the network's
/// RPC accounts. A network with no accounts signs through its node.
pub fn voucher_signer(
	config: &Config,
	target: &Target,
) -> Result<VoucherSigner, Box<dyn std::error::Error>> {
	let registry = config.registry();
	let (key, network) = registry
		.get_by_name(&target.network)
		.ok_or_else(|| format!("Network '{}' not found", target.network))?;
	let rpc = network
		.rpc
		.as_ref()
		.ok_or_else(|| format!("Network '{}' has no RPC endpoint", network.name))?;

	let accounts = match (&config.account, &target.private_key) {
		(Some(account), _) => {
			AccountService::from_config(&account.primary, account.primary_config()?)?
		},
		(None, Some(private_key)) => AccountService::new(Box::new(LocalKeyring::new(
			std::slice::from_ref(private_key),
		)?)),
		(None, None) if rpc.accounts.is_empty() => {
			tracing::debug!(network = %network.name, "No local keys, signing through the node");
			AccountService::new(Box::new(RpcSigningAgent::new(rpc.url.clone())))
		},
		(None, None) => AccountService::new(Box::new(LocalKeyring::new(&rpc.accounts)?)),
	};
	let contract = AlloyContractReader::connect(target.contract, &rpc.url)?;

	tracing::info!(network = %network.name, chain = %key, contract = %target.contract, "Using network");
	Ok(VoucherSigner::new(Arc::new(contract), Arc::new(accounts)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{routing::post, Json, Router};
	use std::fs;
	use tempfile::TempDir;
	use tnft_types::{BurnVoucher, U256};

	const NODE_SIGNATURE: &str = "0x111111111111111111111111111111111111111111111111111111111111111122222222222222222222222222222222222222222222222222222222222222221b";

	/// Starts a node answering `eth_call` with chain id 31337 and signing
	/// every typed-data request with `NODE_SIGNATURE`.
	async fn spawn_node() -> String {
		let app = Router::new().route(
			"/",
			post(|Json(request): Json<Value>| async move {
				let reply = match request["method"].as_str() {
					Some("eth_call") => json!({ "result": format!("0x{:064x}", 31337u64) }),
					Some("eth_chainId") => json!({ "result": "0x7a69" }),
					Some("eth_signTypedData") => json!({ "result": NODE_SIGNATURE }),
					_ => json!({ "error": { "code": -32601, "message": "method not found" } }),
				};
				let mut body = json!({ "jsonrpc": "2.0", "id": request["id"].clone() });
				if let (Some(body), Some(reply)) = (body.as_object_mut(), reply.as_object()) {
					body.extend(reply.clone());
				}
				Json(body)
			}),
		);

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});
		format!("http://{}/", addr)
	}

	fn target(network: &str) -> Target {
		Target {
			network: network.into(),
			contract: Address::repeat_byte(0x42),
			signer: Address::repeat_byte(0x01),
			private_key: None,
		}
	}

	#[test]
	fn test_networks_keyed_by_chain() {
		let config = Config::builtin_with(|_| None);
		let output = networks(&config.registry()).unwrap();

		assert_eq!(output.as_object().unwrap().len(), 5);
		assert_eq!(output["137"]["name"], "polygon");
		assert_eq!(output["default"]["name"], "hardhat");
	}

	#[test]
	fn test_resolve() {
		let registry = Config::builtin_with(|_| None).registry();

		assert_eq!(
			resolve(&registry, "unreal").unwrap(),
			json!({ "name": "unreal", "chain_id": "18231" })
		);
		assert_eq!(resolve(&registry, "hardhat").unwrap()["chain_id"], "default");
		assert!(resolve(&registry, "nosuchchain")
			.unwrap_err()
			.contains("not found"));
	}

	#[tokio::test]
	async fn test_signer_needs_rpc_endpoint() {
		let config = Config::builtin_with(|_| None);

		let missing = voucher_signer(&config, &target("nosuchchain")).err().unwrap();
		assert!(missing.to_string().contains("not found"));

		let no_rpc = voucher_signer(&config, &target("hardhat")).err().unwrap();
		assert!(no_rpc.to_string().contains("no RPC endpoint"));
	}

	#[tokio::test]
	async fn test_signer_from_config_file() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("tnft.toml");
		fs::write(
			&path,
			r#"
[networks.31337]
name = "localhost"
rpc = { url = "http://127.0.0.1:8545" }

[account]
primary = "local"
[account.implementations.local]
private_keys = ["0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"]
"#,
		)
		.unwrap();

		let config = Config::from_file(&path).await.unwrap();
		assert!(voucher_signer(&config, &target("localhost")).is_ok());
	}

	#[tokio::test]
	async fn test_signer_rejects_bad_private_key() {
		let config = Config::builtin_with(|_| None);
		let mut target = target("localhost");
		target.private_key = Some("0x1234".into());

		assert!(voucher_signer(&config, &target).is_err());
	}

	#[test]
	fn test_private_key_hidden_from_debug() {
		let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
		let mut target = target("localhost");
		target.private_key = Some(key.into());

		let printed = format!("{:?}", target);
		assert!(!printed.contains("ac0974bec39a17e36ba4"));
		assert!(printed.contains("REDACTED"));
	}

	#[tokio::test]
	async fn test_signer_without_keys_signs_through_node() {
		let url = spawn_node().await;
		let config: Config = format!(
			"[networks.31337]\nname = \"localhost\"\nrpc = {{ url = \"{}\" }}\n",
			url
		)
		.parse()
		.unwrap();
		let target = target("localhost");

		let signer = voucher_signer(&config, &target).unwrap();
		let signed = signer
			.create_burn_voucher(
				target.signer,
				BurnVoucher {
					token: Address::repeat_byte(0x03),
					tokenId: U256::from(7),
					amount: U256::from(1),
					from: Address::repeat_byte(0x04),
				},
			)
			.await
			.unwrap();

		assert_eq!(signed.signature, NODE_SIGNATURE);
	}
}
