use contracts::enums::PortalType;
use contracts::system::roles::Role;
use contracts::system::users::{AssignRoleDto, User, UserStatus};

use crate::shared::query::roles::role_option_id;
use crate::shared::query::{ApiError, MutationOp};

/// Role assignment form: both selections are required
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssignmentForm {
    pub user_id: String,
    pub role_id: String,
}

impl AssignmentForm {
    /// Prefill from a table row; the role is preselected only when it
    /// resolves to one of the portal's `roles`
    pub fn for_user(user: &User, roles: &[Role]) -> Self {
        Self {
            user_id: user.id.clone(),
            role_id: user
                .role_ref()
                .and_then(|r| role_option_id(roles, &r))
                .unwrap_or_default(),
        }
    }

    pub fn to_mutation(&self, portal: PortalType) -> Result<MutationOp, ApiError> {
        let user_id = self.user_id.trim();
        let role_id = self.role_id.trim();
        if user_id.is_empty() || role_id.is_empty() {
            return Err(ApiError::Validation("Select a user and a role".into()));
        }
        let payload = serde_json::to_value(AssignRoleDto {
            role_id: role_id.to_string(),
            portal,
        })
        .map_err(|e| ApiError::Validation(e.to_string()))?;
        Ok(MutationOp::Update {
            id: user_id.to_string(),
            payload,
        })
    }
}

pub fn status_options() -> Vec<&'static str> {
    UserStatus::all().iter().map(UserStatus::code).collect()
}

/// Dropdown label for a user: name with email when they differ
pub fn user_option_label(user: &User) -> String {
    let name = user.display_name();
    if name == user.email {
        name
    } else {
        format!("{} ({})", name, user.email)
    }
}
