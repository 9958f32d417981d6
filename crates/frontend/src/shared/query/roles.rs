//! Role references → roles → capability flags.

use contracts::enums::PortalType;
use contracts::system::roles::{PermissionAction, PermissionSet, Role, RoleRef};

use super::client::{QueryClient, Resource};
use super::error::ApiError;

/// Shown wherever a role cannot be resolved
pub const ROLE_PLACEHOLDER: &str = "—";

pub fn roles_resource(portal: PortalType) -> Resource {
    Resource::scoped("roles", portal)
}

/// Roles of a portal, cached under `["roles", portal, "all"]`
pub async fn fetch_roles(client: &QueryClient, portal: PortalType) -> Result<Vec<Role>, ApiError> {
    client.list_all::<Role>(&roles_resource(portal)).await
}

/// Match by id first, then by key
pub fn match_role(roles: &[Role], role_ref: &RoleRef) -> Option<Role> {
    if let Some(role) = role_ref.as_named_role() {
        return Some(role);
    }
    let by_id = role_ref
        .lookup_id()
        .and_then(|id| roles.iter().find(|r| r.id == id));
    let by_key = || {
        role_ref
            .lookup_key()
            .and_then(|key| roles.iter().find(|r| !r.key.is_empty() && r.key == key))
    };
    by_id.or_else(by_key).cloned()
}

/// Id of the loaded role a reference points at, for preselecting a role
/// dropdown whose option values are role ids.
pub fn role_option_id(roles: &[Role], role_ref: &RoleRef) -> Option<String> {
    let role = match_role(roles, role_ref)?;
    if roles.iter().any(|r| r.id == role.id) {
        return Some(role.id);
    }
    // named inline role without a known id
    roles
        .iter()
        .find(|r| (!role.key.is_empty() && r.key == role.key) || r.name == role.name)
        .map(|r| r.id.clone())
}

/// Resolve a reference to a full role.
///
/// Absence is a normal outcome. Fetch failures are logged and also
/// yield `None` so the enclosing view keeps rendering.
pub async fn resolve_role(
    client: &QueryClient,
    role_ref: &RoleRef,
    portal: PortalType,
) -> Option<Role> {
    if let Some(role) = role_ref.as_named_role() {
        return Some(role);
    }
    match fetch_roles(client, portal).await {
        Ok(roles) => match_role(&roles, role_ref),
        Err(err) => {
            log::warn!("Could not load {} roles to resolve {:?}: {}", portal, role_ref, err);
            None
        }
    }
}

pub fn role_display_name(role: Option<&Role>) -> String {
    role.map(|r| r.name.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| ROLE_PLACEHOLDER.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleOption {
    pub id: String,
    pub label: String,
}

/// Dropdown options, sorted by display name
pub fn role_options(roles: &[Role]) -> Vec<RoleOption> {
    let mut options: Vec<RoleOption> = roles
        .iter()
        .map(|r| RoleOption {
            id: r.id.clone(),
            label: if r.name.trim().is_empty() {
                r.key.clone()
            } else {
                r.name.clone()
            },
        })
        .collect();
    options.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    options
}

/// Per-resource action flags derived from the caller's permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            can_view: true,
            can_create: true,
            can_edit: true,
            can_delete: true,
        }
    }

    pub fn for_resource(permissions: &PermissionSet, resource: &str) -> Self {
        Self {
            can_view: permissions.allows(resource, PermissionAction::View),
            can_create: permissions.allows(resource, PermissionAction::Create),
            can_edit: permissions.allows(resource, PermissionAction::Edit),
            can_delete: permissions.allows(resource, PermissionAction::Delete),
        }
    }
}
