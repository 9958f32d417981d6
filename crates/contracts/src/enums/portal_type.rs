use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tenant portals served by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalType {
    Admin,
    Customer,
    Tech,
    Vendor,
}

impl PortalType {
    /// Code used in URLs, cache keys and the `portal` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            PortalType::Admin => "admin",
            PortalType::Customer => "customer",
            PortalType::Tech => "tech",
            PortalType::Vendor => "vendor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PortalType::Admin => "Admin portal",
            PortalType::Customer => "Customer portal",
            PortalType::Tech => "Tech portal",
            PortalType::Vendor => "Vendor portal",
        }
    }

    pub fn all() -> [PortalType; 4] {
        [
            PortalType::Admin,
            PortalType::Customer,
            PortalType::Tech,
            PortalType::Vendor,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(PortalType::Admin),
            "customer" => Some(PortalType::Customer),
            "tech" => Some(PortalType::Tech),
            "vendor" => Some(PortalType::Vendor),
            _ => None,
        }
    }
}

impl fmt::Display for PortalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PortalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unknown portal type: {}", s))
    }
}
