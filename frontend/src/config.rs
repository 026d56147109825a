use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const CONFIG_KEY: &str = "profile_config";
const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub success_banner_ms: u32,
    /// Pause between a successful account deletion and the forced logout.
    pub logout_delay_ms: u32,
    pub notice_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            success_banner_ms: 5000,
            logout_delay_ms: 2000,
            notice_limit: 4,
        }
    }
}

impl AppConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }

    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<AppConfig>(raw).ok()
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub fn load_config() -> AppConfig {
    local_storage()
        .and_then(|storage| storage.get_item(CONFIG_KEY).ok().flatten())
        .and_then(|raw| AppConfig::from_json(&raw))
        .unwrap_or_default()
}

pub fn save_config(config: &AppConfig) {
    if let Some(storage) = local_storage() {
        if let Ok(raw) = serde_json::to_string(config) {
            let _ = storage.set_item(CONFIG_KEY, &raw);
        }
    }
}

pub fn access_token() -> Option<String> {
    local_storage()
        .and_then(|storage| storage.get_item(ACCESS_TOKEN_KEY).ok().flatten())
        .filter(|token| !token.is_empty())
}

pub fn clear_access_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"api_base_url":"https://api.example.com/"}"#)
            .expect("valid config");
        assert_eq!(config.api_base_url, "https://api.example.com/");
        assert_eq!(config.success_banner_ms, 5000);
        assert_eq!(config.logout_delay_ms, 2000);
        assert_eq!(
            config.endpoint("/api/auth/profile"),
            "https://api.example.com/api/auth/profile"
        );
    }

    #[test]
    fn garbage_config_is_ignored() {
        assert!(AppConfig::from_json("not json").is_none());
    }
}
