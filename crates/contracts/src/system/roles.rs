use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Role as returned by `GET /roles?portal=...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

impl Role {
    pub fn permission_set(&self) -> PermissionSet {
        PermissionSet::new(self.permissions.iter().cloned())
    }
}

/// Role embedded in another payload. Every field is optional because
/// the backend sometimes sends only `{ id }` or `{ key }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlineRole {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

/// Reference to a role: either the embedded object or a bare role id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Id(String),
    Inline(InlineRole),
}

impl RoleRef {
    /// Complete role when the reference already carries a name
    pub fn as_named_role(&self) -> Option<Role> {
        match self {
            RoleRef::Inline(InlineRole {
                id,
                name: Some(name),
                key,
                permissions,
            }) if !name.trim().is_empty() => Some(Role {
                id: id.clone().unwrap_or_default(),
                name: name.clone(),
                key: key.clone().unwrap_or_default(),
                permissions: permissions.clone(),
            }),
            _ => None,
        }
    }

    /// Identifier used for lookup against the role collection
    pub fn lookup_id(&self) -> Option<&str> {
        let candidate = match self {
            RoleRef::Id(id) => Some(id.as_str()),
            RoleRef::Inline(inline) => inline.id.as_deref().or(inline.key.as_deref()),
        };
        candidate.filter(|s| !s.trim().is_empty())
    }

    /// Key used as the second lookup attempt
    pub fn lookup_key(&self) -> Option<&str> {
        let candidate = match self {
            RoleRef::Id(id) => Some(id.as_str()),
            RoleRef::Inline(inline) => inline.key.as_deref().or(inline.id.as_deref()),
        };
        candidate.filter(|s| !s.trim().is_empty())
    }
}

/// Actions a permission string can grant on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionAction {
    View,
    Create,
    Edit,
    Delete,
}

impl PermissionAction {
    pub fn code(&self) -> &'static str {
        match self {
            PermissionAction::View => "view",
            PermissionAction::Create => "create",
            PermissionAction::Edit => "edit",
            PermissionAction::Delete => "delete",
        }
    }
}

/// Set of `"{resource}:{action}"` grants.
///
/// `"*"` grants everything, `"{resource}:*"` grants every action on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionSet {
    grants: BTreeSet<String>,
}

impl PermissionSet {
    pub fn new<I, S>(grants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            grants: grants
                .into_iter()
                .map(|g| g.into().trim().to_ascii_lowercase())
                .filter(|g| !g.is_empty())
                .collect(),
        }
    }

    pub fn allows(&self, resource: &str, action: PermissionAction) -> bool {
        let resource = resource.to_ascii_lowercase();
        self.grants.contains("*")
            || self.grants.contains(&format!("{}:*", resource))
            || self.grants.contains(&format!("{}:{}", resource, action.code()))
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
