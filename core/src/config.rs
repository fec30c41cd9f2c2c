//! Transport configuration fixed at session construction.

use serde::{Deserialize, Serialize};

/// Settings for the HTTP client owned by a `SessionManager`.
///
/// Deserializable so host applications can load it from their own config
/// files. Missing fields fall back to [`SessionConfig::default`], which
/// matches a plain `reqwest::Client::new()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Total time allowed for one request, in seconds. `None` disables it.
    pub timeout_secs: Option<u64>,
    /// Time allowed to establish a connection, in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// `User-Agent` sent with every request. `None` sends none.
    pub user_agent: Option<String>,
    /// Headers the client adds to every request unless the request sets them.
    pub default_headers: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert!(config.timeout_secs.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config: SessionConfig = serde_json::from_str(
            r#"{"timeout_secs":30,"default_headers":[["Accept","application/json"]]}"#,
        )
        .unwrap();
        assert_eq!(config.timeout_secs, Some(30));
        assert!(config.connect_timeout_secs.is_none());
        assert_eq!(
            config.default_headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
    }
}
