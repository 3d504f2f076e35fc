//! This module contains the data structures for loading the optional host
//! configuration file. Every field has a default, and a missing or broken
//! file must never keep the engine's entrypoint from starting.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

#[cfg(target_os = "android")]
use crate::android::util::ActivityContext;
use crate::common::DEFAULT_LOG_LEVEL;
use crate::engine::{EntrypointDescriptor, DEFAULT_ENTRYPOINT};

pub const CONFIG_FILE_NAME: &str = "host.toml";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConfigHost {
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,
    #[serde(default)]
    pub entrypoint_library: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ConfigHost {
    pub fn deserialize(data: &str) -> Result<ConfigHost, String> {
        toml::from_str::<ConfigHost>(data)
            .map_err(|e| format!("Could not create ConfigHost from {data}: {e}"))
    }

    /// Loads `host.toml` from the given directory. A missing file yields the
    /// defaults silently; an unreadable or malformed file yields the
    /// defaults with a warning.
    pub fn load_or_default(conf_dir: &Path) -> ConfigHost {
        let path = conf_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return ConfigHost::default();
        }

        let config = fs::read_to_string(&path)
            .map_err(|e| format!("Could not read {path:?}: {e}"))
            .and_then(|data| ConfigHost::deserialize(&data));

        match config {
            Ok(config) => config,
            Err(e) => {
                warn!("Falling back to the default host configuration: {e}");
                ConfigHost::default()
            }
        }
    }

    /// The descriptor the execution bridge will be asked to run.
    pub fn entrypoint_descriptor(&self) -> EntrypointDescriptor {
        EntrypointDescriptor::create(&self.entrypoint, self.entrypoint_library.as_deref())
    }
}

impl Default for ConfigHost {
    fn default() -> ConfigHost {
        ConfigHost {
            entrypoint: default_entrypoint(),
            entrypoint_library: None,
            log_level: default_log_level(),
        }
    }
}

fn default_entrypoint() -> String {
    DEFAULT_ENTRYPOINT.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Platform directory that holds `host.toml`.
pub fn get_conf_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    return get_conf_dir_android();
    #[cfg(not(target_os = "android"))]
    return get_conf_dir_desktop();
}

#[cfg(target_os = "android")]
fn get_conf_dir_android() -> PathBuf {
    match ActivityContext::create().and_then(|ctx| ctx.files_dir()) {
        Ok(files_dir) => files_dir,
        Err(e) => {
            warn!("Could not resolve the app files dir: {e}");
            PathBuf::from(".")
        }
    }
}

#[cfg(not(target_os = "android"))]
fn get_conf_dir_desktop() -> PathBuf {
    match (std::env::var("HOME"), std::env::current_dir()) {
        (Ok(home_dir), _) => PathBuf::from(home_dir).join(".config").join("brightside"),
        (_, Ok(current_dir)) => current_dir,
        (_, _) => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use crate::config_host::{default_entrypoint, default_log_level, ConfigHost};
    use crate::engine::EntrypointDescriptor;

    #[test]
    fn test_deserialize_empty_yields_defaults() {
        assert_eq!(
            ConfigHost::deserialize("").unwrap(),
            ConfigHost {
                entrypoint: default_entrypoint(),
                entrypoint_library: None,
                log_level: default_log_level(),
            }
        );
    }

    #[test]
    fn test_deserialize_overrides() {
        let config = ConfigHost::deserialize(
            "entrypoint = \"devMenu\"\nentrypoint_library = \"package:brightside/dev\"",
        )
        .unwrap();

        assert_eq!(config.entrypoint, "devMenu");
        assert_eq!(config.entrypoint_library, Some("package:brightside/dev".to_string()));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn test_deserialize_invalid() {
        let result = ConfigHost::deserialize("entrypoint = ");

        assert!(result.is_err());
        assert!(result.err().unwrap().contains("Could not create ConfigHost from"));
    }

    #[test]
    fn test_default_entrypoint_descriptor() {
        assert_eq!(
            ConfigHost::default().entrypoint_descriptor(),
            EntrypointDescriptor::create_default()
        );
    }

    #[test]
    fn test_configured_entrypoint_descriptor() {
        let config = ConfigHost {
            entrypoint: "devMenu".to_string(),
            entrypoint_library: Some("package:brightside/dev".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.entrypoint_descriptor(),
            EntrypointDescriptor::create("devMenu", Some("package:brightside/dev"))
        );
    }
}
