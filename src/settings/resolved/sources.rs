use std::env;
use std::fmt;

use super::super::sources::env_var_for;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
    CliFlag(&'static str),
    Environment(String),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::Environment(var) => write!(f, "environment variable `{var}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

pub(crate) const INVENTORY_FACET: &str = "summary.inventory_facet";
pub(crate) const RESALE_LABELS: &str = "summary.resale_labels";
pub(crate) const PRICE_FACET: &str = "summary.price_facet";
pub(crate) const SECTION_FACET: &str = "summary.section_facet";
pub(crate) const OUTPUT: &str = "export.output";
pub(crate) const TARGET_URL: &str = "event.target_url";
pub(crate) const LOG_FILTER: &str = "logging.filter";

/// Where each validated setting came from, when it did not come from a file.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
    pub(crate) inventory_facet: Option<SettingSource>,
    pub(crate) resale_labels: Option<SettingSource>,
    pub(crate) price_facet: Option<SettingSource>,
    pub(crate) section_facet: Option<SettingSource>,
    pub(crate) output: Option<SettingSource>,
    pub(crate) target_url: Option<SettingSource>,
    pub(crate) log_filter: Option<SettingSource>,
}

impl ConfigSources {
    /// Note every validated key that is overridden by an environment variable.
    pub(crate) fn from_environment() -> Self {
        let from_env = |key: &str| {
            let var = env_var_for(key);
            env::var_os(&var).map(|_| SettingSource::Environment(var))
        };

        Self {
            inventory_facet: from_env(INVENTORY_FACET),
            resale_labels: from_env(RESALE_LABELS),
            price_facet: from_env(PRICE_FACET),
            section_facet: from_env(SECTION_FACET),
            output: from_env(OUTPUT),
            target_url: from_env(TARGET_URL),
            log_filter: from_env(LOG_FILTER),
        }
    }

    /// Resolve the origin of `key`, defaulting to the configuration file.
    pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
        let recorded = match key {
            INVENTORY_FACET => &self.inventory_facet,
            RESALE_LABELS => &self.resale_labels,
            PRICE_FACET => &self.price_facet,
            SECTION_FACET => &self.section_facet,
            OUTPUT => &self.output,
            TARGET_URL => &self.target_url,
            LOG_FILTER => &self.log_filter,
            _ => &None,
        };
        recorded.clone().unwrap_or(SettingSource::ConfigKey(key))
    }
}
