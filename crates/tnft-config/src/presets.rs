//! Built-in deployment tables.
//!
//! These are the networks, asset categories and deployment settings the TNFT
//! suite ships with. Literal addresses are compiled in; RPC URLs, deployer
//! keys and explorer tokens come from the environment lookup passed in, so
//! tests can supply a fixed environment.

use crate::DeploymentSettings;
use alloy::primitives::address;
use std::collections::BTreeMap;
use tnft_types::{
	AssetCatalog, AssetTypeDescriptor, ContractAddresses, ExplorerConfig, GoldBar, NetworkKey,
	NetworkRecord, NetworksConfig, RpcEndpoint, SecretString, TnftTypeInfo,
};

/// Chain id of the unreal testnet.
pub const UNREAL_CHAIN_ID: u64 = 18231;
/// Chain id of the Polygon Mumbai testnet.
pub const MUMBAI_CHAIN_ID: u64 = 80001;
/// Chain id of Polygon mainnet.
pub const POLYGON_CHAIN_ID: u64 = 137;
/// Chain id of a local Hardhat node.
pub const LOCALHOST_CHAIN_ID: u64 = 31337;

const TEST_TOKEN_URL: &str = "https://onu50475eh.execute-api.us-east-1.amazonaws.com/tnfts";
const TEST_FETCH_EXTERNAL: &str = "https://onu50475eh.execute-api.us-east-1.amazonaws.com";
const PROD_TOKEN_URL: &str = "https://n0iqbl374f.execute-api.us-east-1.amazonaws.com/tnfts";
const PROD_FETCH_EXTERNAL: &str = "https://n0iqbl374f.execute-api.us-east-1.amazonaws.com";

fn some(s: &str) -> Option<String> {
	Some(s.to_string())
}

/// Builds an RPC endpoint, or `None` when no URL is available.
///
/// Deployer keys missing from the environment are skipped.
fn endpoint(
	env: &impl Fn(&str) -> Option<String>,
	url: Option<String>,
	account_vars: &[&str],
	gas_price: Option<u64>,
	chain_id: Option<u64>,
) -> Option<RpcEndpoint> {
	let url = url.filter(|u| !u.trim().is_empty())?;
	let accounts = account_vars
		.iter()
		.filter_map(|var| env(var))
		.filter(|key| !key.is_empty())
		.map(SecretString::new)
		.collect();
	Some(RpcEndpoint {
		url,
		accounts,
		gas_price,
		chain_id,
	})
}

fn polygonscan(env: &impl Fn(&str) -> Option<String>) -> ExplorerConfig {
	ExplorerConfig {
		api_key: env("POLYGON_EXPLORER_API_KEY").map(SecretString::new),
		..Default::default()
	}
}

/// The in-process Hardhat network.
fn hardhat() -> NetworkRecord {
	NetworkRecord {
		name: "hardhat".into(),
		contracts: ContractAddresses {
			wrapped_matic: Some(address!("0000000000000000000000000000000000000001")),
			router_address: Some(address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506")),
			tangible_labs: Some(address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506")),
			tngbl_address: Some(address!("B675259cAF6F5122a9E82493610e6487373D7E98")),
			dai_address: Some(address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063")),
			passive_nft_address: Some(address!("850c158FF905dE7d2B5166DB08620A0f0fF86816")),
			revenue_share: Some(address!("FD5bF91894276E1237c3365DcB7057B2b5732f76")),
			rent_share: Some(address!("FD5bF91894276E1237c3365DcB7057B2b5732f76")),
			..Default::default()
		},
		token_url: some(TEST_TOKEN_URL),
		fetch_external: some(TEST_FETCH_EXTERNAL),
		revenue_share_abi: some("./abis/mumbai/RevenueShare.json"),
		..Default::default()
	}
}

fn localhost() -> NetworkRecord {
	NetworkRecord {
		name: "localhost".into(),
		contracts: ContractAddresses {
			wrapped_matic: Some(address!("0000000000000000000000000000000000000001")),
			router_address: Some(address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506")),
			tangible_labs: Some(address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506")),
			tngbl_address: Some(address!("B675259cAF6F5122a9E82493610e6487373D7E98")),
			passive_nft_address: Some(address!("19C0d076B7a5860C041316fA9750D559bD7eD496")),
			revenue_share: Some(address!("7069Bd636C8Bdb18d78A9dCB9A68593137477772")),
			rent_share: Some(address!("539Ca1307fb13d4dDf1b6Fd0f0F23c2b1EB85a34")),
			uniswap_factory: Some(address!("C0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac")),
			..Default::default()
		},
		token_url: some(TEST_TOKEN_URL),
		fetch_external: some(TEST_FETCH_EXTERNAL),
		revenue_share_abi: some("./abis/mumbai/RevenueShare.json"),
		passive_nft_abi: some("../abis/mumbai/PassiveNFT.json"),
		rpc: Some(RpcEndpoint {
			url: "http://127.0.0.1:8545".into(),
			accounts: Vec::new(),
			gas_price: None,
			chain_id: Some(LOCALHOST_CHAIN_ID),
		}),
		..Default::default()
	}
}

fn unreal(env: &impl Fn(&str) -> Option<String>) -> NetworkRecord {
	NetworkRecord {
		name: "unreal".into(),
		contracts: ContractAddresses {
			usdc_address: Some(address!("abAa4C39cf3dF55480292BBDd471E88de8Cc3C97")),
			pearl_factory: Some(address!("6254c71Eae8476BE8fd0B9F14AEB61d578422991")),
			tangible_dao: Some(address!("b99468CF65F43A2656280A749A3F092dF54AA58d")),
			tangible_labs: Some(address!("23bfB039Fe7fE0764b830960a9d31697D154F2E4")),
			tngbl_address: Some(address!("86254FfaA70910447578E4aC37d51624409aeae3")),
			dai_address: Some(address!("665D4921fe931C0eA1390Ca4e0C422ba34d26169")),
			passive_nft_address: Some(address!("131995372479B06532ae2eba3794345CE6EcC2D1")),
			revenue_share: Some(address!("177753854F244e08E69Ec199b313c3Ad85652E1c")),
			fee_distributor: Some(address!("F8A1aD46057c546D2161198049367E4EDCEA6912")),
			..Default::default()
		},
		token_url: some(TEST_TOKEN_URL),
		fetch_external: some(TEST_FETCH_EXTERNAL),
		rpc: endpoint(
			env,
			some("https://rpc.unreal.gelato.digital"),
			&["PK1", "PK2"],
			None,
			Some(UNREAL_CHAIN_ID),
		),
		explorer: Some(ExplorerConfig {
			api_key: Some(SecretString::from("api-key")),
			api_url: some("https://unreal.blockscout.com/api"),
			browser_url: some("https://unreal.blockscout.com"),
		}),
		..Default::default()
	}
}

fn mumbai(env: &impl Fn(&str) -> Option<String>) -> NetworkRecord {
	NetworkRecord {
		name: "mumbai".into(),
		contracts: ContractAddresses {
			usdc_address: Some(address!("667269618f67f543d3121DE3DF169747950Deb13")),
			usdt_address: Some(address!("98D75A58F5bf3Cac470b6CC886d4F9932dCB5328")),
			usdr_address: Some(address!("8885a6E2f1F4BC383963eD848438A8bEC243886F")),
			ustb_address: Some(address!("71395cC9211dc43220EBe3Bb0466d482D6ef5335")),
			pearl_router: Some(address!("E592427A0AEce92De3Edee1F18E0157C05861564")),
			pearl_factory: Some(address!("B4cF5a388778046aAc5fB33AC0e99107a2403Ed7")),
			wrapped_matic: Some(address!("9c3c9283d3e44854697cd22d3faa240cfb032889")),
			tangible_dao: Some(address!("b99468CF65F43A2656280A749A3F092dF54AA58d")),
			tangible_labs: Some(address!("23bfB039Fe7fE0764b830960a9d31697D154F2E4")),
			router_address: Some(address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506")),
			tngbl_address: Some(address!("C3Cd8cE66D0aa591a75686Ee99BAa7b8667d6EE0")),
			dai_address: Some(address!("f46c460F5B2D33aC5c4cE2aA015c8B5c430231C5")),
			passive_nft_address: Some(address!("a0b08D6BBc11e798177D2E6BF838704c5fDe1401")),
			revenue_share: Some(address!("74c03a9FBEEd64635468b8067A7Eb032ffD3ac25")),
			rent_share: Some(address!("8A2baC12fA52Cff055FAc75509bf7aB789089e10")),
			uniswap_factory: Some(address!("c35DADB65012eC5796536bD9864eD8773aBc74C4")),
			chainlink_matrix_oracle: Some(address!("bE2F59A77eb5D38FE4E14c8E5284e72E07f74cee")),
			fee_distributor: Some(address!("186661c459f89f3dc2515fcb4a12fa17aCA686A0")),
			..Default::default()
		},
		token_url: some(TEST_TOKEN_URL),
		fetch_external: some(TEST_FETCH_EXTERNAL),
		revenue_share_abi: some("../abis/mumbai/RevenueShare.json"),
		passive_nft_abi: some("../abis/mumbai/PassiveNFT.json"),
		instant_trade_enabled: true,
		rpc: endpoint(
			env,
			env("INFURA_URL_MUMBAI"),
			&["PK1", "PK2", "PK2"],
			Some(2_000_000_000),
			None,
		),
		explorer: Some(polygonscan(env)),
	}
}

fn polygon(env: &impl Fn(&str) -> Option<String>) -> NetworkRecord {
	NetworkRecord {
		name: "polygon".into(),
		contracts: ContractAddresses {
			usdc_address: Some(address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174")),
			usdr_address: Some(address!("b5DFABd7fF7F83BAB83995E72A52B97ABb7bcf63")),
			pearl_router: Some(address!("cC25C0FD84737F44a7d38649b69491BBf0c7f083")),
			aave_pool: Some(address!("445FE580eF8d70FF569aB36e80c647af338db351")),
			our_pool: Some(address!("a138341185a9D0429B0021A11FB717B225e13e1F")),
			chain_link_gold_oracle: Some(address!("0c466540b2ee1a31b441671eac0ca886e051e410")),
			chain_link_gbp_oracle: Some(address!("099a2540848573e94fb1ca0fa420b00acbbc845a")),
			wrapped_matic: Some(address!("0d500b1d8e8ef31e21c99d1db9a6444d3adf1270")),
			tangible_labs: Some(address!("AF8A1548Fd69a59Ce6A2a5f308bCC4698E1Db2E5")),
			tangible_dao: Some(address!("100fCC635acf0c22dCdceF49DD93cA94E55F0c71")),
			router_address: Some(address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506")),
			tngbl_address: Some(address!("49e6A20f1BBdfEeC2a8222E052000BbB14EE6007")),
			dai_address: Some(address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063")),
			passive_nft_address: Some(address!("Dc7ee66c43f35aC8C1d12Df90e61f05fbc2cD2c1")),
			revenue_share: Some(address!("0531Dfd07643B549a07F21dd5BA1Da1e1C43142e")),
			rent_share: Some(address!("119775e06Abb7b083ae864C55f8C630d62EC7dF3")),
			uniswap_factory: Some(address!("c35DADB65012eC5796536bD9864eD8773aBc74C4")),
			chainlink_matrix_oracle: Some(address!("731209585143011778C56BDfaAf87d341adE7C07")),
			fee_distributor: Some(address!("6ceD48EfBb581A141667D7487222E42a3FA17cf7")),
			..Default::default()
		},
		token_url: some(PROD_TOKEN_URL),
		fetch_external: some(PROD_FETCH_EXTERNAL),
		revenue_share_abi: some("../abis/polygon/RevenueShare.json"),
		passive_nft_abi: some("../abis/polygon/PassiveNFT.json"),
		instant_trade_enabled: false,
		rpc: endpoint(
			env,
			env("INFURA_URL_POLYGON"),
			&["PK1", "PK2"],
			None,
			None,
		),
		explorer: Some(polygonscan(env)),
	}
}

/// The built-in network table.
pub fn networks(env: impl Fn(&str) -> Option<String>) -> NetworksConfig {
	let mut networks = BTreeMap::new();
	networks.insert(NetworkKey::Default, hardhat());
	networks.insert(NetworkKey::Chain(LOCALHOST_CHAIN_ID), localhost());
	networks.insert(NetworkKey::Chain(UNREAL_CHAIN_ID), unreal(&env));
	networks.insert(NetworkKey::Chain(MUMBAI_CHAIN_ID), mumbai(&env));
	networks.insert(NetworkKey::Chain(POLYGON_CHAIN_ID), polygon(&env));
	networks
}

/// The built-in asset categories.
pub fn assets() -> AssetCatalog {
	let gold_bars = [(100, 1), (250, 2), (500, 3), (1000, 4)]
		.into_iter()
		.map(|(g_weight, fingerprint)| GoldBar {
			g_weight,
			fingerprint,
		})
		.collect();

	AssetCatalog {
		gold: AssetTypeDescriptor {
			name: "TangibleGoldBars".into(),
			symbol: "TanXAU".into(),
			fixed_storage_fee: false,
			storage_required: true,
			pays_rent: false,
			storage_percentage_bps: Some(10),
			realty_fee_bps: None,
			symbol_in_uri: true,
			sell_stock: Some(43),
			gold_bars,
			tnft_type: 1,
		},
		real_estate: AssetTypeDescriptor {
			name: "TangibleREstate".into(),
			symbol: "RLTY".into(),
			fixed_storage_fee: false,
			storage_required: false,
			pays_rent: true,
			storage_percentage_bps: None,
			realty_fee_bps: Some(100),
			symbol_in_uri: true,
			sell_stock: None,
			gold_bars: Vec::new(),
			tnft_type: 2,
		},
		tnft_types: vec![
			TnftTypeInfo {
				id: 1,
				description: "Gold bars".into(),
				pays_rent: false,
			},
			TnftTypeInfo {
				id: 2,
				description: "Real Estates".into(),
				pays_rent: true,
			},
		],
	}
}

/// The built-in deployment settings.
///
/// `BLOCK_CONFIRMATIONS` overrides the confirmation count; an unparsable
/// value is ignored with a warning.
pub fn deployment(env: impl Fn(&str) -> Option<String>) -> DeploymentSettings {
	let mut settings = DeploymentSettings::default();
	if let Some(raw) = env("BLOCK_CONFIRMATIONS") {
		match raw.trim().parse() {
			Ok(confirmations) => settings.block_confirmations = confirmations,
			Err(e) => tracing::warn!(value = %raw, error = %e, "Ignoring invalid BLOCK_CONFIRMATIONS"),
		}
	}
	settings
}
