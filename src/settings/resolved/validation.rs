use ticket_facets::logging;
use url::Url;

use super::sources::{
    INVENTORY_FACET, LOG_FILTER, OUTPUT, PRICE_FACET, RESALE_LABELS, SECTION_FACET, TARGET_URL,
};
use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(crate) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
    let rules = &config.rules;
    for (key, value) in [
        (INVENTORY_FACET, rules.inventory_facet.as_deref()),
        (PRICE_FACET, rules.price_facet.as_deref()),
        (SECTION_FACET, rules.section_facet.as_deref()),
    ] {
        let value = value.unwrap_or_default();
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(
                key,
                value,
                sources.source_for(key),
                "facet name must not be empty",
            ));
        }
    }

    if rules.resale_labels.is_empty() {
        return Err(ConfigError::invalid(
            RESALE_LABELS,
            "[]",
            sources.source_for(RESALE_LABELS),
            "at least one resale label is required",
        ));
    }
    if let Some(label) = rules
        .resale_labels
        .iter()
        .find(|label| label.trim().is_empty())
    {
        return Err(ConfigError::invalid(
            RESALE_LABELS,
            label.as_str(),
            sources.source_for(RESALE_LABELS),
            "resale labels must not be empty",
        ));
    }

    if config.output.as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            OUTPUT,
            "",
            sources.source_for(OUTPUT),
            "output path must not be empty",
        ));
    }

    if let Some(url) = &config.event_url
        && let Err(err) = Url::parse(url)
    {
        return Err(ConfigError::invalid(
            TARGET_URL,
            url.as_str(),
            sources.source_for(TARGET_URL),
            format!("not a valid URL ({err})"),
        ));
    }

    if let Some(filter) = &config.log_filter
        && let Err(err) = logging::parse_directive(filter)
    {
        return Err(ConfigError::invalid(
            LOG_FILTER,
            filter.as_str(),
            sources.source_for(LOG_FILTER),
            format!("not a valid log filter ({err})"),
        ));
    }

    Ok(())
}
