//! Invoice issuers with a known grammar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InkvoiceError;

/// Supplier whose invoice layout the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Vendor {
    /// World Famous / Ink Projects sales orders, including Kuro Sumi lines.
    WorldFamous,
    /// Eternal Ink invoices.
    Eternal,
    /// Solid Ink invoices.
    SolidInk,
}

impl Vendor {
    /// All vendors, in selector order.
    pub const ALL: [Vendor; 3] = [Vendor::WorldFamous, Vendor::Eternal, Vendor::SolidInk];

    /// Stable identifier used by the stock layer (`worldFamous`, ...).
    pub fn id(&self) -> &'static str {
        match self {
            Self::WorldFamous => "worldFamous",
            Self::Eternal => "eternal",
            Self::SolidInk => "solidInk",
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WorldFamous => "World Famous",
            Self::Eternal => "Eternal",
            Self::SolidInk => "Solid Ink",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Vendor {
    type Err = InkvoiceError;

    /// Accepts `worldFamous`, `world_famous`, `world-famous` and friends,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "worldfamous" => Ok(Self::WorldFamous),
            "eternal" => Ok(Self::Eternal),
            "solidink" => Ok(Self::SolidInk),
            _ => Err(InkvoiceError::UnsupportedVendor(s.to_string())),
        }
    }
}
