use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::PortalType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStatus {
    Pending,
    Approved,
    Rejected,
}

impl OnboardingStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OnboardingStatus::Pending => "pending",
            OnboardingStatus::Approved => "approved",
            OnboardingStatus::Rejected => "rejected",
        }
    }

    pub fn all() -> [OnboardingStatus; 3] {
        [
            OnboardingStatus::Pending,
            OnboardingStatus::Approved,
            OnboardingStatus::Rejected,
        ]
    }
}

/// Company asking to join one of the portals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub id: String,
    pub company_name: String,
    pub contact_email: String,
    pub portal_type: PortalType,
    pub status: OnboardingStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Body of the approve/reject update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingDecisionDto {
    pub status: OnboardingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
