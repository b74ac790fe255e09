use crate::revision::Revision;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FACTORY_RESET_SETTLE_MS: u64 = 5000;

/// Load environment variables from .env file with robust parsing.
/// Handles values with spaces without requiring quotes.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    if !env_path.exists() {
        return;
    }

    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Find the first '=' and split there
        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let mut value = line[eq_pos + 1..].trim();

            // Remove surrounding quotes if present
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = &value[1..value.len() - 1];
            }

            // Only set if not already set (env vars take precedence)
            if std::env::var(key).is_err() {
                // SAFETY: We're single-threaded at this point (called before any async runtime)
                unsafe { std::env::set_var(key, value) };
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub profile: ProfileConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub revision: Revision,
    /// Wait between `factory_reset` and the resync reads.
    pub factory_reset_settle_ms: u64,
    /// Hold a per-attribute lock across bitfield read-modify-write.
    pub serialize_bitfield_writes: bool,
}

impl ProfileConfig {
    pub fn factory_reset_settle(&self) -> Duration {
        Duration::from_millis(self.factory_reset_settle_ms)
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            revision: Revision::LATEST,
            factory_reset_settle_ms: DEFAULT_FACTORY_RESET_SETTLE_MS,
            serialize_bitfield_writes: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unparsable values keep the default.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(revision) = lookup("PRESENCE_REVISION") {
            match revision.parse() {
                Ok(r) => config.profile.revision = r,
                Err(_) => warn!("[Config] Ignoring unknown PRESENCE_REVISION={}", revision),
            }
        }
        if let Some(settle) = lookup("PRESENCE_FACTORY_RESET_SETTLE_MS")
            && let Ok(ms) = settle.parse()
        {
            config.profile.factory_reset_settle_ms = ms;
        }
        if let Some(serialize) = lookup("PRESENCE_SERIALIZE_BITFIELD_WRITES")
            && let Ok(s) = serialize.parse()
        {
            config.profile.serialize_bitfield_writes = s;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.profile.revision, Revision::R8);
        assert_eq!(config.profile.factory_reset_settle(), Duration::from_secs(5));
        assert!(config.profile.serialize_bitfield_writes);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PRESENCE_REVISION", "R3"),
            ("PRESENCE_FACTORY_RESET_SETTLE_MS", "0"),
            ("PRESENCE_SERIALIZE_BITFIELD_WRITES", "false"),
        ]));
        assert_eq!(config.profile.revision, Revision::R3);
        assert_eq!(config.profile.factory_reset_settle(), Duration::ZERO);
        assert!(!config.profile.serialize_bitfield_writes);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PRESENCE_REVISION", "r9"),
            ("PRESENCE_FACTORY_RESET_SETTLE_MS", "soon"),
            ("PRESENCE_SERIALIZE_BITFIELD_WRITES", "yes"),
        ]));
        assert_eq!(config.profile.revision, Revision::LATEST);
        assert_eq!(config.profile.factory_reset_settle_ms, 5000);
        assert!(config.profile.serialize_bitfield_writes);
    }
}
