//! Form configuration loaded with Figment.
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. `settingsform.toml`, `settingsform.yaml` / `.yml`, `settingsform.json` in the config directory
//! 3. Environment variables prefixed `SETTINGSFORM_`

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use settingsform_fields::UnknownFieldPolicy;
use tracing::debug;

use crate::error::Result;

/// Base name of configuration files.
pub const CONFIG_FILE_STEM: &str = "settingsform";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "SETTINGSFORM_";

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// What happens to fields of an unrecognised type.
    pub unknown_field_policy: UnknownFieldPolicy,
    /// Action URL of the outer form.
    pub form_action: String,
    /// Label of the submit control.
    pub submit_label: String,
    /// Label of the "no page" option in page dropdowns.
    pub page_none_label: String,
    /// Value of the "no page" option in page dropdowns.
    pub page_none_value: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            unknown_field_policy: UnknownFieldPolicy::Warn,
            form_action: "options.php".into(),
            submit_label: "Save Changes".into(),
            page_none_label: "Choose a page".into(),
            page_none_value: "-1".into(),
        }
    }
}

impl FormConfig {
    /// Load configuration, reading files from `dir` when given.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let config: FormConfig = Self::figment(dir).extract()?;
        debug!(?config, "form configuration loaded");
        Ok(config)
    }

    /// The provider chain behind [`FormConfig::load`].
    pub fn figment(dir: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FormConfig::default()));

        if let Some(dir) = dir {
            figment = figment
                .merge(Toml::file(dir.join(format!("{CONFIG_FILE_STEM}.toml"))))
                .merge(Yaml::file(dir.join(format!("{CONFIG_FILE_STEM}.yaml"))))
                .merge(Yaml::file(dir.join(format!("{CONFIG_FILE_STEM}.yml"))))
                .merge(Json::file(dir.join(format!("{CONFIG_FILE_STEM}.json"))));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }
}
