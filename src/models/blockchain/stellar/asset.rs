//! Stellar asset references.
//!
//! Horizon describes assets in three shapes depending on the endpoint:
//! - flattened `asset_type` / `asset_code` / `asset_issuer` fields (optionally prefixed)
//! - an object with the same three fields (path entries, balance changes)
//! - the canonical string form `native` or `CODE:ISSUER` (claimable balances, reserves)
//!
//! All of them decode into [`AssetRef`].

use serde::{Deserialize, Deserializer, Serialize};

/// Horizon asset type for the native currency
pub const NATIVE_ASSET_TYPE: &str = "native";

/// Reference to an asset on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum AssetRef {
	/// The ledger's native currency
	Native,
	/// An asset issued by an account
	Issued {
		/// Asset code (1-12 alphanumeric characters)
		code: String,
		/// Issuing account id
		issuer: String,
	},
	/// Any other shape (liquidity pool shares, incomplete or malformed data)
	Other(String),
}

impl AssetRef {
	/// Builds an asset from Horizon's flattened type / code / issuer fields
	pub fn from_parts(asset_type: Option<&str>, code: Option<&str>, issuer: Option<&str>) -> Self {
		match (asset_type, code, issuer) {
			(Some(NATIVE_ASSET_TYPE), _, _) => Self::Native,
			(Some("credit_alphanum4" | "credit_alphanum12"), Some(code), Some(issuer))
				if !code.is_empty() && !issuer.is_empty() =>
			{
				Self::Issued {
					code: code.to_string(),
					issuer: issuer.to_string(),
				}
			}
			(asset_type, _, _) => Self::Other(asset_type.unwrap_or_default().to_string()),
		}
	}

	/// Parses the canonical string form used by Horizon (`native` or `CODE:ISSUER`)
	pub fn from_canonical(value: &str) -> Self {
		if value == NATIVE_ASSET_TYPE {
			return Self::Native;
		}

		match value.split_once(':') {
			Some((code, issuer)) if !code.is_empty() && !issuer.is_empty() => Self::Issued {
				code: code.to_string(),
				issuer: issuer.to_string(),
			},
			_ => Self::Other(value.to_string()),
		}
	}
}

impl Default for AssetRef {
	fn default() -> Self {
		Self::Other(String::new())
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAsset {
	Canonical(String),
	Parts {
		asset_type: Option<String>,
		asset_code: Option<String>,
		asset_issuer: Option<String>,
	},
}

impl<'de> Deserialize<'de> for AssetRef {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(match RawAsset::deserialize(deserializer)? {
			RawAsset::Canonical(value) => Self::from_canonical(&value),
			RawAsset::Parts {
				asset_type,
				asset_code,
				asset_issuer,
			} => Self::from_parts(
				asset_type.as_deref(),
				asset_code.as_deref(),
				asset_issuer.as_deref(),
			),
		})
	}
}
