//! Tokenized asset categories.
//!
//! Each TNFT contract tokenizes one category of physical asset. The
//! descriptors here carry the static parameters a deployment passes to the
//! category's contracts.

use serde::{Deserialize, Serialize};

/// A standard gold bar size offered for minting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GoldBar {
	/// Weight in grams.
	pub g_weight: u32,
	pub fingerprint: u64,
}

/// Static description of a tokenized asset category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetTypeDescriptor {
	/// Contract name, e.g. "TangibleGoldBars".
	pub name: String,
	/// Token symbol, e.g. "TanXAU".
	pub symbol: String,
	#[serde(default)]
	pub fixed_storage_fee: bool,
	/// Whether the asset has to be kept in physical storage.
	#[serde(default)]
	pub storage_required: bool,
	/// Whether holders receive recurring rent.
	#[serde(default)]
	pub pays_rent: bool,
	/// Storage fee in basis points (10 = 0.1%).
	pub storage_percentage_bps: Option<u16>,
	/// Realty fee in basis points (100 = 1%).
	pub realty_fee_bps: Option<u16>,
	/// Whether token URIs embed the symbol (`<base>/<symbol>/<tokenId>`).
	#[serde(default)]
	pub symbol_in_uri: bool,
	pub sell_stock: Option<u32>,
	#[serde(default)]
	pub gold_bars: Vec<GoldBar>,
	/// Value of the on-chain `tnftType` enumeration for this category.
	pub tnft_type: u8,
}

impl AssetTypeDescriptor {
	/// Returns the category fee in basis points.
	///
	/// Storage-backed categories charge a storage percentage, rent-paying
	/// ones a realty fee. Categories with neither charge nothing.
	pub fn fee_bps(&self) -> u16 {
		self.storage_percentage_bps
			.or(self.realty_fee_bps)
			.unwrap_or(0)
	}
}

/// One entry of the on-chain `tnftType` enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TnftTypeInfo {
	pub id: u8,
	pub description: String,
	pub pays_rent: bool,
}

/// The asset categories and type enumeration of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetCatalog {
	pub gold: AssetTypeDescriptor,
	pub real_estate: AssetTypeDescriptor,
	pub tnft_types: Vec<TnftTypeInfo>,
}

impl AssetCatalog {
	/// Finds the type enumeration entry matching a descriptor.
	pub fn type_info(&self, asset: &AssetTypeDescriptor) -> Option<&TnftTypeInfo> {
		self.tnft_types.iter().find(|t| t.id == asset.tnft_type)
	}
}
