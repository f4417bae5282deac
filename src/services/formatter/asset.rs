//! Display names of ledger assets.

use crate::models::AssetRef;

/// Display name of the native asset
pub const NATIVE_ASSET_NAME: &str = "lumens";

/// Code of the native asset
pub const NATIVE_ASSET_CODE: &str = "XLM";

/// Placeholder for assets that cannot be named
pub const UNKNOWN_ASSET: &str = "unknown";

/// Returns the display name of an asset: `lumens`, `CODE:ISSUER` or `unknown`
pub fn asset_name(asset: &AssetRef) -> String {
	match asset {
		AssetRef::Native => NATIVE_ASSET_NAME.to_string(),
		AssetRef::Issued { code, issuer } => format!("{}:{}", code, issuer),
		AssetRef::Other(_) => UNKNOWN_ASSET.to_string(),
	}
}

/// Returns the code of an asset: `XLM`, `CODE` or `unknown`
pub fn asset_code(asset: &AssetRef) -> String {
	match asset {
		AssetRef::Native => NATIVE_ASSET_CODE.to_string(),
		AssetRef::Issued { code, .. } => code.clone(),
		AssetRef::Other(_) => UNKNOWN_ASSET.to_string(),
	}
}
