use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VesselStatus {
    Active,
    Inactive,
}

impl VesselStatus {
    pub fn code(&self) -> &'static str {
        match self {
            VesselStatus::Active => "active",
            VesselStatus::Inactive => "inactive",
        }
    }

    pub fn all() -> [VesselStatus; 2] {
        [VesselStatus::Active, VesselStatus::Inactive]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: String,
    pub name: String,
    /// IMO number, seven digits
    #[serde(default)]
    pub imo_number: Option<String>,
    #[serde(default)]
    pub vessel_type: Option<String>,
    /// Flag state
    #[serde(default)]
    pub flag: Option<String>,
    pub status: VesselStatus,
}
