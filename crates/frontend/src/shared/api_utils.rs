//! API utilities for frontend-backend communication

use super::config::ApiConfig;

/// Get the base URL for API requests
///
/// Uses `base_url` when configured, otherwise derives it from the current
/// window location and the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000/api"
/// - Just the prefix if window is not available
pub fn api_base(config: &ApiConfig) -> String {
    if let Some(base) = config.base_url.as_deref().filter(|b| !b.trim().is_empty()) {
        return join_base(base, &config.prefix);
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return config.prefix.clone(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    join_base(&format!("{}//{}:{}", protocol, hostname, config.port), &config.prefix)
}

fn join_base(origin: &str, prefix: &str) -> String {
    let origin = origin.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        origin.to_string()
    } else {
        format!("{}/{}", origin, prefix)
    }
}
