use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationStatus {
    Active,
    Suspended,
    Pending,
}

impl OrganizationStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OrganizationStatus::Active => "active",
            OrganizationStatus::Suspended => "suspended",
            OrganizationStatus::Pending => "pending",
        }
    }

    pub fn all() -> [OrganizationStatus; 3] {
        [
            OrganizationStatus::Active,
            OrganizationStatus::Suspended,
            OrganizationStatus::Pending,
        ]
    }
}

/// Organization type: who the tenant is on the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    ShipOwner,
    ShipManager,
    Vendor,
    ServiceProvider,
}

impl OrganizationType {
    pub fn display_name(&self) -> &'static str {
        match self {
            OrganizationType::ShipOwner => "Ship owner",
            OrganizationType::ShipManager => "Ship manager",
            OrganizationType::Vendor => "Vendor",
            OrganizationType::ServiceProvider => "Service provider",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub org_type: OrganizationType,
    #[serde(default)]
    pub country: Option<String>,
    pub status: OrganizationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
