use cosmic_config::{CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

pub const APP_ID: &str = "dev.docket.app";
pub const CONFIG_VERSION: u64 = 1;

pub const ENV_PROJECT: &str = "DOCKET_FIRESTORE_PROJECT";
pub const ENV_API_KEY: &str = "DOCKET_FIRESTORE_API_KEY";
pub const ENV_EMULATOR: &str = "FIRESTORE_EMULATOR_HOST";

fn default_database() -> String {
    "(default)".into()
}

/// Which document store backs the collections.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Firestore,
    Memory,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct FirestoreSettings {
    pub project_id: String,
    pub database: String,
    /// `host:port` of a local emulator; production Firestore when unset.
    pub emulator_host: Option<String>,
    /// Only ever set from the environment; the keyring holds the persistent copy.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for FirestoreSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            emulator_host: None,
            api_key: None,
        }
    }
}

/// Settings persisted under `~/.config/cosmic/dev.docket.app/v1/`, one file per field.
///
/// This is the on-disk view. Environment overrides are layered on a copy
/// with [`DocketConfig::effective`] so they never get written back.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct DocketConfig {
    pub backend: BackendKind,
    pub firestore: FirestoreSettings,
    pub debug_logging: bool,
}

impl DocketConfig {
    /// The config handle for this app.
    pub fn handler() -> Result<cosmic_config::Config, cosmic_config::Error> {
        cosmic_config::Config::new(APP_ID, CONFIG_VERSION)
    }

    /// Read every field, keeping defaults for the ones that are missing or unreadable.
    pub fn load(handler: &cosmic_config::Config) -> Self {
        Self::get_entry(handler).unwrap_or_else(|(errors, config)| {
            log::debug!("{} config keys fell back to defaults", errors.len());
            config
        })
    }

    /// This config with the process environment applied.
    pub fn effective(&self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `DOCKET_FIRESTORE_PROJECT`, `DOCKET_FIRESTORE_API_KEY` and
    /// `FIRESTORE_EMULATOR_HOST` to a copy. Empty values are ignored.
    pub fn with_overrides(&self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = self.clone();
        if let Some(project) = get(ENV_PROJECT) {
            config.firestore.project_id = project;
        }
        if let Some(key) = get(ENV_API_KEY) {
            config.firestore.api_key = Some(key);
        }
        if let Some(host) = get(ENV_EMULATOR) {
            config.firestore.emulator_host = Some(host);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn handler_in(dir: &tempfile::TempDir) -> cosmic_config::Config {
        cosmic_config::Config::with_custom_path(APP_ID, CONFIG_VERSION, dir.path().to_path_buf()).unwrap()
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_store_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocketConfig::load(&handler_in(&dir));
        assert_eq!(config, DocketConfig::default());
        assert_eq!(config.firestore.database, "(default)");
        assert_eq!(config.backend, BackendKind::Firestore);
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler_in(&dir);
        let config = DocketConfig {
            backend: BackendKind::Memory,
            debug_logging: true,
            firestore: FirestoreSettings {
                project_id: "acme-tracker".into(),
                emulator_host: Some("localhost:8080".into()),
                api_key: Some("never-written".into()),
                ..Default::default()
            },
        };
        config.write_entry(&handler).unwrap();

        let loaded = DocketConfig::load(&handler_in(&dir));
        assert_eq!(loaded.backend, BackendKind::Memory);
        assert!(loaded.debug_logging);
        assert_eq!(loaded.firestore.project_id, "acme-tracker");
        assert_eq!(loaded.firestore.emulator_host.as_deref(), Some("localhost:8080"));
        assert_eq!(loaded.firestore.api_key, None);
    }

    #[test]
    fn environment_overrides_a_copy() {
        let vars = env(&[(ENV_PROJECT, "from-env"), (ENV_API_KEY, "abc123"), (ENV_EMULATOR, "  ")]);

        let mut config = DocketConfig::default();
        config.firestore.project_id = "from-file".into();
        let effective = config.with_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(effective.firestore.project_id, "from-env");
        assert_eq!(effective.firestore.api_key.as_deref(), Some("abc123"));
        assert_eq!(effective.firestore.emulator_host, None);
        assert_eq!(config.firestore.project_id, "from-file");
    }

    #[test]
    fn saving_a_toggle_does_not_persist_environment_values() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler_in(&dir);
        DocketConfig::default().write_entry(&handler).unwrap();

        let mut stored = DocketConfig::load(&handler);
        let vars = env(&[(ENV_PROJECT, "scratch-env"), (ENV_EMULATOR, "localhost:8080")]);
        let effective = stored.with_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(effective.firestore.project_id, "scratch-env");

        stored.debug_logging = true;
        stored.write_entry(&handler).unwrap();

        let next_launch = DocketConfig::load(&handler_in(&dir));
        assert!(next_launch.debug_logging);
        assert_eq!(next_launch.firestore.project_id, "");
        assert_eq!(next_launch.firestore.emulator_host, None);
    }
}
