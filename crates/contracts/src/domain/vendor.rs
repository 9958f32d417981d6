use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Active,
    Invited,
    Suspended,
}

impl VendorStatus {
    pub fn code(&self) -> &'static str {
        match self {
            VendorStatus::Active => "active",
            VendorStatus::Invited => "invited",
            VendorStatus::Suspended => "suspended",
        }
    }

    pub fn all() -> [VendorStatus; 3] {
        [
            VendorStatus::Active,
            VendorStatus::Invited,
            VendorStatus::Suspended,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub status: VendorStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
