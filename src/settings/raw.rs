use std::path::PathBuf;

use serde::Deserialize;
use ticket_facets::{DEFAULT_URL_FILTER, SummaryRules};

use crate::cli::{CliArgs, Command};

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingSource, validate};

pub(super) const DEFAULT_INVENTORY_FACET: &str = "inventoryType";
pub(super) const DEFAULT_RESALE_LABEL: &str = "resale";
pub(super) const DEFAULT_PRICE_FACET: &str = "totalPrice";
pub(super) const DEFAULT_SECTION_FACET: &str = "section";
pub(super) const DEFAULT_OUTPUT: &str = "scraped_results.csv";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    pub(super) summary: SummarySection,
    pub(super) export: ExportSection,
    pub(super) event: EventSection,
    pub(super) logging: LoggingSection,
}

/// Facet names used when deriving the summary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SummarySection {
    pub(super) inventory_facet: Option<String>,
    pub(super) resale_labels: Option<Vec<String>>,
    pub(super) price_facet: Option<String>,
    pub(super) section_facet: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ExportSection {
    pub(super) output: Option<PathBuf>,
    pub(super) url_filter: Option<String>,
}

/// The event page the captures were taken from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct EventSection {
    pub(super) target_url: Option<String>,
    pub(super) name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LoggingSection {
    pub(super) filter: Option<String>,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(filter) = cli.log_filter.clone() {
            self.logging.filter = Some(filter);
        }

        match &cli.command {
            Command::Summary(args) => {
                if let Some(name) = args.inventory_facet.clone() {
                    self.summary.inventory_facet = Some(name);
                }
                if let Some(labels) = args.resale_labels.clone() {
                    self.summary.resale_labels = Some(labels);
                }
                if let Some(name) = args.price_facet.clone() {
                    self.summary.price_facet = Some(name);
                }
                if let Some(name) = args.section_facet.clone() {
                    self.summary.section_facet = Some(name);
                }
            }
            Command::Export(args) => {
                if let Some(output) = args.output.clone() {
                    self.export.output = Some(output);
                }
                if let Some(filter) = args.url_filter.clone() {
                    self.export.url_filter = Some(filter);
                }
                if let Some(url) = args.event_url.clone() {
                    self.event.target_url = Some(url);
                }
                if let Some(name) = args.event_name.clone() {
                    self.event.name = Some(name);
                }
            }
            Command::Facets(_) | Command::Locate(_) => {}
        }
    }

    /// Fill in defaults and validate the configuration.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig, ConfigError> {
        let sources = ConfigSources::detect(cli);
        let Self {
            summary,
            export,
            event,
            logging,
        } = self;

        let rules = SummaryRules {
            inventory_facet: Some(
                summary
                    .inventory_facet
                    .unwrap_or_else(|| DEFAULT_INVENTORY_FACET.to_string()),
            ),
            resale_labels: summary
                .resale_labels
                .unwrap_or_else(|| vec![DEFAULT_RESALE_LABEL.to_string()]),
            price_facet: Some(
                summary
                    .price_facet
                    .unwrap_or_else(|| DEFAULT_PRICE_FACET.to_string()),
            ),
            section_facet: Some(
                summary
                    .section_facet
                    .unwrap_or_else(|| DEFAULT_SECTION_FACET.to_string()),
            ),
        };

        let config = ResolvedConfig {
            rules,
            output: export
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            url_filter: export
                .url_filter
                .unwrap_or_else(|| DEFAULT_URL_FILTER.to_string()),
            event_url: event.target_url.filter(|url| !url.trim().is_empty()),
            event_name: event.name,
            log_filter: logging.filter.filter(|filter| !filter.trim().is_empty()),
        };

        validate(&config, &sources)?;
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

impl ConfigSources {
    /// Record which flags were passed on the command line so validation
    /// errors can point at them.
    fn detect(cli: &CliArgs) -> Self {
        let mut sources = Self::from_environment();
        if cli.log_filter.is_some() {
            sources.log_filter = Some(SettingSource::CliFlag("--log-filter"));
        }
        match &cli.command {
            Command::Summary(args) => {
                if args.inventory_facet.is_some() {
                    sources.inventory_facet = Some(SettingSource::CliFlag("--inventory-facet"));
                }
                if args.resale_labels.is_some() {
                    sources.resale_labels = Some(SettingSource::CliFlag("--resale-label"));
                }
                if args.price_facet.is_some() {
                    sources.price_facet = Some(SettingSource::CliFlag("--price-facet"));
                }
                if args.section_facet.is_some() {
                    sources.section_facet = Some(SettingSource::CliFlag("--section-facet"));
                }
            }
            Command::Export(args) => {
                if args.output.is_some() {
                    sources.output = Some(SettingSource::CliFlag("--output"));
                }
                if args.event_url.is_some() {
                    sources.target_url = Some(SettingSource::CliFlag("--event-url"));
                }
            }
            Command::Facets(_) | Command::Locate(_) => {}
        }
        sources
    }
}
