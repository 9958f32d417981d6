use contracts::system::roles::RoleRef;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const REFRESH_TOKEN_KEY: &str = "auth_refresh_token";
const SESSION_ROLE_KEY: &str = "auth_session_role";

/// Source of the caller's credentials, injected into the transport
pub trait CredentialStore: Send + Sync {
    /// Bearer token for the `Authorization` header
    fn access_token(&self) -> Option<String>;

    /// Role of the signed-in user, used to derive capability flags
    fn session_role(&self) -> Option<RoleRef>;
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Reads the keys written by the login flow
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageCredentials;

impl CredentialStore for LocalStorageCredentials {
    fn access_token(&self) -> Option<String> {
        get_local_storage()?
            .get_item(ACCESS_TOKEN_KEY)
            .ok()?
            .filter(|t| !t.is_empty())
    }

    fn session_role(&self) -> Option<RoleRef> {
        let raw = get_local_storage()?.get_item(SESSION_ROLE_KEY).ok()??;
        parse_session_role(&raw)
    }
}

/// Sign-out: forget every credential the login flow stored
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        let _ = storage.remove_item(SESSION_ROLE_KEY);
    }
}

/// The stored role is either JSON (object or quoted id) or a bare id
fn parse_session_role(raw: &str) -> Option<RoleRef> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str::<RoleRef>(raw)
        .ok()
        .or_else(|| Some(RoleRef::Id(raw.to_string())))
}

/// Fixed credentials, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
    role: Option<RoleRef>,
}

impl StaticCredentials {
    pub fn new(token: Option<&str>, role: Option<RoleRef>) -> Self {
        Self {
            token: token.map(str::to_string),
            role,
        }
    }
}

impl CredentialStore for StaticCredentials {
    fn access_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn session_role(&self) -> Option<RoleRef> {
        self.role.clone()
    }
}
