use log::warn;
use std::env;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

/// Node settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub difficulty: u32,
    pub node_id: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match get("PORT") {
            Some(v) => v.parse().unwrap_or_else(|_| {
                warn!("PORT={v:?} is not a valid port, using 5000");
                5000
            }),
            None => 5000,
        };
        let difficulty = match get("DIFFICULTY") {
            Some(v) => match v.parse::<u32>() {
                Ok(d) => d.clamp(1, MAX_DIFFICULTY),
                Err(_) => {
                    warn!("DIFFICULTY={v:?} is not a number, using {DEFAULT_DIFFICULTY}");
                    DEFAULT_DIFFICULTY
                }
            },
            None => DEFAULT_DIFFICULTY,
        };
        let node_id = get("NODE_ID")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Self {
            host,
            port,
            difficulty,
            node_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]);
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.port, 5000);
        assert_eq!(s.difficulty, 4);
        assert_eq!(s.node_id, None);
    }

    #[test]
    fn overrides_and_clamping() {
        let s = settings(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DIFFICULTY", "42"),
            ("NODE_ID", " node-A "),
        ]);
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 8080);
        assert_eq!(s.difficulty, 8);
        assert_eq!(s.node_id.as_deref(), Some("node-A"));

        assert_eq!(settings(&[("DIFFICULTY", "0")]).difficulty, 1);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let s = settings(&[("PORT", "http"), ("DIFFICULTY", "hard"), ("NODE_ID", "  ")]);
        assert_eq!(s.port, 5000);
        assert_eq!(s.difficulty, 4);
        assert_eq!(s.node_id, None);
    }
}
