use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use gymsched_core::projector::ProjectorConfig;
use gymsched_core::validator::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "gymsched.toml";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub validator: ValidatorSettings,
    #[serde(default)]
    pub projector: ProjectorSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
}

/// Rule validation behaviour
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ValidatorSettings {
    /// Reject rules ending on a date before their start
    pub enforce_end_after_start: bool,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            enforce_end_after_start: true,
        }
    }
}

/// Occurrence expansion limits
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ProjectorSettings {
    /// Length of each hourly/daily occurrence in minutes
    pub default_duration_minutes: u32,
    /// Maximum occurrences returned by one preview
    pub max_occurrences: usize,
}

impl Default for ProjectorSettings {
    fn default() -> Self {
        Self {
            default_duration_minutes: 60,
            max_occurrences: 1000,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PreviewSettings {
    /// Days covered by `preview` when `--days` is not given
    pub days: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self { days: 28 }
    }
}

impl Config {
    /// Loads defaults, then the TOML file, then `GYMSCHED_` environment
    /// variables (nested keys separated by `__`).
    pub fn load(path: &Path) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("GYMSCHED_").split("__"))
            .extract()
    }

    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            enforce_end_after_start: self.validator.enforce_end_after_start,
        }
    }

    pub fn projector_config(&self) -> ProjectorConfig {
        ProjectorConfig {
            default_duration_minutes: self.projector.default_duration_minutes,
            max_occurrences: self.projector.max_occurrences,
        }
    }
}
