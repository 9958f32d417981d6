use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::roles::RoleRef;
use crate::enums::PortalType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub fn code(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Pending => "pending",
        }
    }

    pub fn all() -> [UserStatus; 3] {
        [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending]
    }
}

/// Portal user. The role arrives either embedded (`role`) or as `roleId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<RoleRef>,
    #[serde(default)]
    pub role_id: Option<String>,
    pub status: UserStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            self.email.clone()
        } else {
            full
        }
    }

    /// Role reference, preferring the embedded object over the foreign id
    pub fn role_ref(&self) -> Option<RoleRef> {
        self.role
            .clone()
            .or_else(|| self.role_id.clone().map(RoleRef::Id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleDto {
    pub role_id: String,
    pub portal: PortalType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_role_ref_falls_back_to_role_id() {
        let user: User = serde_json::from_value(json!({
            "id": "u1", "email": "ops@fleet.example", "roleId": "r9", "status": "active"
        }))
        .unwrap();
        assert_eq!(user.role_ref(), Some(RoleRef::Id("r9".into())));
        assert_eq!(user.display_name(), "ops@fleet.example");
    }

    #[test]
    fn test_display_name_joins_parts() {
        let user: User = serde_json::from_value(json!({
            "id": "u2", "email": "a@b.c", "firstName": "Ines", "lastName": " Moreau ",
            "status": "pending", "createdAt": "2024-03-15T14:02:26Z"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "Ines Moreau");
        assert!(user.created_at.is_some());
    }
}
