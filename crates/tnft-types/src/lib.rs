//! Common types module for the TNFT deployment toolkit.
//!
//! This module defines the data types shared by the configuration, account
//! and voucher crates: per-network deployment records, tokenized asset
//! descriptors, EIP-712 voucher structures and signature handling.

/// Tokenized asset category descriptors.
pub mod assets;
/// Network keys and per-chain deployment records.
pub mod networks;
/// Base trait for self-registering implementations.
pub mod registry;
/// Secure string type for private keys and API tokens.
pub mod secret_string;
/// Signature decomposition into r, s and v.
pub mod signature;
/// Utility functions for hex formatting and EIP-712 hashing.
pub mod utils;
/// Mint and burn voucher payloads and their signed form.
pub mod voucher;

pub use alloy::primitives::{Address, B256, U256};

pub use assets::{AssetCatalog, AssetTypeDescriptor, GoldBar, TnftTypeInfo};
pub use networks::{
	ContractAddresses, ExplorerConfig, NetworkKey, NetworkKeyError, NetworkRecord, NetworksConfig,
	RpcEndpoint,
};
pub use registry::ImplementationRegistry;
pub use secret_string::SecretString;
pub use signature::{SignatureError, SignatureParts};
pub use utils::{with_0x_prefix, without_0x_prefix};
pub use voucher::{BurnVoucher, MintVoucher, SignedVoucher, VoucherPayload};
