mod errors;
mod sources;
mod validation;

use std::io::{self, Write};
use std::path::PathBuf;

use ticket_facets::SummaryRules;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};
pub(crate) use validation::validate;

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub(crate) rules: SummaryRules,
    pub(crate) output: PathBuf,
    pub(crate) url_filter: String,
    pub(crate) event_url: Option<String>,
    pub(crate) event_name: Option<String>,
    pub(crate) log_filter: Option<String>,
}

impl ResolvedConfig {
    /// Write a human readable summary of the effective configuration.
    pub fn write_summary(&self, mut out: impl Write) -> io::Result<()> {
        out.write_all(self.summary_text().as_bytes())
    }

    fn summary_text(&self) -> String {
        let rules = &self.rules;
        let mut lines = vec![
            "Effective configuration:".to_string(),
            format!("  Inventory facet: {}", or_unset(rules.inventory_facet.as_deref())),
            format!("  Resale labels: {}", rules.resale_labels.join(", ")),
            format!("  Price facet: {}", or_unset(rules.price_facet.as_deref())),
            format!("  Section facet: {}", or_unset(rules.section_facet.as_deref())),
            format!("  Export output: {}", self.output.display()),
            format!("  URL filter: {}", display_filter(&self.url_filter)),
            format!("  Event URL: {}", or_unset(self.event_url.as_deref())),
            format!("  Event name: {}", or_unset(self.event_name.as_deref())),
        ];
        if let Some(filter) = &self.log_filter {
            lines.push(format!("  Log filter: {filter}"));
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

fn or_unset(value: Option<&str>) -> &str {
    value.unwrap_or("(unset)")
}

fn display_filter(filter: &str) -> &str {
    if filter.is_empty() { "(match all)" } else { filter }
}
