use chrono::Locale;
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const APP_ID: &str = "dev.agenda.app";
pub const CONFIG_VERSION: u64 = 1;

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("agenda")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct AgendaConfig {
    pub storage_directory: PathBuf,
    pub dark_mode: bool,
    pub debug_logging: bool,
    /// Locale used for task date text, e.g. `es_ES`. Empty means the environment's.
    pub display_locale: String,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            storage_directory: default_storage_dir(),
            dark_mode: false,
            debug_logging: false,
            display_locale: String::new(),
        }
    }
}

impl AgendaConfig {
    /// Ensure the storage directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.storage_directory)
    }

    pub fn locale(&self) -> Locale {
        if !self.display_locale.trim().is_empty() {
            if let Some(locale) = parse_locale(&self.display_locale) {
                return locale;
            }
            log::warn!("Unknown display locale {:?}, using environment", self.display_locale);
        }
        environment_locale()
    }
}

/// Locale from `LC_ALL`, `LC_TIME` or `LANG`, in that order.
pub fn environment_locale() -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| parse_locale(&value))
        .unwrap_or(Locale::POSIX)
}

/// Parse a POSIX locale name like `es_ES.UTF-8` or `de_DE@euro`.
pub fn parse_locale(value: &str) -> Option<Locale> {
    let name = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" => None,
        "C" | "POSIX" => Some(Locale::POSIX),
        _ => Locale::try_from(name).ok(),
    }
}
