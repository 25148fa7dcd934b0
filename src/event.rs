use std::sync::LazyLock;

use regex::Regex;

const UNKNOWN: &str = "Unknown";

static EVENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)event/([a-z0-9]+)").expect("event id pattern is valid"));

/// Identifies the event that exported rows belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub id: String,
    pub name: String,
}

impl Default for EventContext {
    fn default() -> Self {
        Self {
            id: UNKNOWN.to_string(),
            name: UNKNOWN.to_string(),
        }
    }
}

impl EventContext {
    /// Build the context from the page URL and its title.
    ///
    /// Missing pieces fall back to `Unknown`. Commas and double quotes are
    /// stripped from the name so it stays a single clean CSV cell.
    #[must_use]
    pub fn new(target_url: Option<&str>, name: Option<&str>) -> Self {
        let id = target_url
            .and_then(event_id_from_url)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let name = name
            .map(sanitize_event_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());
        Self { id, name }
    }
}

/// Extract the event identifier from an `.../event/<ID>` URL.
#[must_use]
pub fn event_id_from_url(url: &str) -> Option<String> {
    EVENT_ID
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}

fn sanitize_event_name(name: &str) -> String {
    name.chars()
        .filter(|ch| !matches!(ch, ',' | '"'))
        .collect::<String>()
        .trim()
        .to_string()
}
