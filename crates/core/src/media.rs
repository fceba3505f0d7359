//! Media asset kinds, license tiers, and listing filter helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Cents;

// ---------------------------------------------------------------------------
// Media type
// ---------------------------------------------------------------------------

pub const MEDIA_TYPE_IMAGE: &str = "IMAGE";
pub const MEDIA_TYPE_VIDEO: &str = "VIDEO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => MEDIA_TYPE_IMAGE,
            MediaType::Video => MEDIA_TYPE_VIDEO,
        }
    }

    /// CDN resource segment used in delivery URLs (`image` / `video`).
    pub fn resource_type(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MEDIA_TYPE_IMAGE => Ok(MediaType::Image),
            MEDIA_TYPE_VIDEO => Ok(MediaType::Video),
            other => Err(CoreError::Validation(format!(
                "Unknown media type '{other}'. Expected IMAGE or VIDEO"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// License tiers
// ---------------------------------------------------------------------------

pub const LICENSE_STANDARD: &str = "STANDARD";
pub const LICENSE_EXTENDED: &str = "EXTENDED";
pub const LICENSE_PREMIUM: &str = "PREMIUM";

/// Licensing tier attached to assets and order items.
///
/// Each tier multiplies the asset's base price: Standard x1, Extended x2,
/// Premium x3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseType {
    #[default]
    Standard,
    Extended,
    Premium,
}

impl LicenseType {
    pub const ALL: [LicenseType; 3] = [
        LicenseType::Standard,
        LicenseType::Extended,
        LicenseType::Premium,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LicenseType::Standard => LICENSE_STANDARD,
            LicenseType::Extended => LICENSE_EXTENDED,
            LicenseType::Premium => LICENSE_PREMIUM,
        }
    }

    pub fn multiplier(self) -> i64 {
        match self {
            LicenseType::Standard => 1,
            LicenseType::Extended => 2,
            LicenseType::Premium => 3,
        }
    }

    /// Price of `base_price` under this license, or a validation error on
    /// overflow.
    pub fn apply(self, base_price: Cents) -> Result<Cents, CoreError> {
        base_price
            .checked_mul(self.multiplier())
            .ok_or_else(|| CoreError::Validation("Price is out of range".into()))
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LICENSE_STANDARD => Ok(LicenseType::Standard),
            LICENSE_EXTENDED => Ok(LicenseType::Extended),
            LICENSE_PREMIUM => Ok(LicenseType::Premium),
            other => Err(CoreError::Validation(format!(
                "Unknown license type '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing filters
// ---------------------------------------------------------------------------

/// Split a comma-separated `tags` query value into trimmed, non-empty tags.
pub fn parse_tag_filter(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Escape `%`, `_` and `\` so user input is matched literally by `ILIKE`.
pub fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Validate the price bounds of a listing query.
pub fn validate_price_range(min: Option<Cents>, max: Option<Cents>) -> Result<(), CoreError> {
    if min.is_some_and(|m| m < 0) || max.is_some_and(|m| m < 0) {
        return Err(CoreError::Validation(
            "Price filters must not be negative".into(),
        ));
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(CoreError::Validation(
                "minPrice must not exceed maxPrice".into(),
            ));
        }
    }
    Ok(())
}
