//! Main entry point for the TNFT command-line tool.
//!
//! This binary exposes the network registry and the voucher signer: it
//! prints deployment records, resolves network names to chain keys and signs
//! mint and burn vouchers against a deployed contract.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tnft_config::Config;
use tnft_types::{Address, U256};

mod commands;

/// Command-line arguments for the TNFT tool.
#[derive(Parser, Debug)]
#[command(name = "tnft", author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file (built-in network presets when omitted)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print every network record as JSON
	Networks,
	/// Print the chain key registered under a network name
	Resolve {
		/// Exact, case-sensitive network name
		name: String,
	},
	/// Print the tokenized asset presets as JSON
	Assets,
	/// Sign a mint voucher
	MintVoucher {
		#[command(flatten)]
		target: commands::Target,
		#[arg(long)]
		token: Address,
		#[arg(long)]
		token_id: U256,
		#[arg(long)]
		price: U256,
		#[arg(long)]
		storage_years: U256,
		#[arg(long)]
		minting_fee: U256,
		#[arg(long)]
		amount: U256,
		#[arg(long)]
		mint_count: U256,
		#[arg(long)]
		vendor: Address,
		#[arg(long)]
		brand: String,
	},
	/// Sign a burn voucher
	BurnVoucher {
		#[command(flatten)]
		target: commands::Target,
		#[arg(long)]
		token: Address,
		#[arg(long)]
		token_id: U256,
		#[arg(long)]
		amount: U256,
		/// Holder whose tokens are burned
		#[arg(long)]
		from: Address,
	},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	// stdout carries command output
	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	let config = match &args.config {
		Some(path) => Config::from_file(path).await?,
		None => Config::builtin(),
	};
	tracing::debug!(networks = config.networks.len(), "Loaded configuration");

	let output = match args.command {
		Command::Networks => commands::networks(&config.registry())?,
		Command::Resolve { name } => commands::resolve(&config.registry(), &name)?,
		Command::Assets => serde_json::to_value(&config.assets)?,
		Command::MintVoucher {
			target,
			token,
			token_id,
			price,
			storage_years,
			minting_fee,
			amount,
			mint_count,
			vendor,
			brand,
		} => {
			let voucher = tnft_types::MintVoucher {
				token,
				tokenId: token_id,
				price,
				storageYears: storage_years,
				mintingFee: minting_fee,
				amount,
				mintCount: mint_count,
				vendor,
				brand,
			};
			let signer = commands::voucher_signer(&config, &target)?;
			signer
				.create_mint_voucher(target.signer, voucher)
				.await?
				.to_json()
		},
		Command::BurnVoucher {
			target,
			token,
			token_id,
			amount,
			from,
		} => {
			let voucher = tnft_types::BurnVoucher {
				token,
				tokenId: token_id,
				amount,
				from,
			};
			let signer = commands::voucher_signer(&config, &target)?;
			signer
				.create_burn_voucher(target.signer, voucher)
				.await?
				.to_json()
		},
	};

	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}
