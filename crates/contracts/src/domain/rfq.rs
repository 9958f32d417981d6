use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RfqStatus {
    Draft,
    Open,
    Quoted,
    Closed,
}

impl RfqStatus {
    pub fn code(&self) -> &'static str {
        match self {
            RfqStatus::Draft => "draft",
            RfqStatus::Open => "open",
            RfqStatus::Quoted => "quoted",
            RfqStatus::Closed => "closed",
        }
    }

    pub fn all() -> [RfqStatus; 4] {
        [
            RfqStatus::Draft,
            RfqStatus::Open,
            RfqStatus::Quoted,
            RfqStatus::Closed,
        ]
    }
}

/// Request for quote on spare parts for a vessel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rfq {
    pub id: String,
    pub rfq_number: String,
    pub title: String,
    #[serde(default)]
    pub vessel_name: Option<String>,
    pub status: RfqStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
