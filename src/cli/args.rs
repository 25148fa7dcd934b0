use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use ticket_facets::app_dirs;

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("ticket-facets {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    let mut matches = CliArgs::command().get_matches();
    CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

/// Output formats supported by every subcommand.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "ticket-facets",
    version,
    long_version = long_version(),
    about = "Inspect ticket-marketplace facet payloads and export embedded offers",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `ticket-facets` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "TICKET_FACETS_CONFIG",
        action = ArgAction::Append,
        global = true,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        global = true,
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long = "print-config",
        global = true,
        help = "Print the effective configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        global = true,
        help = "Choose how results are printed"
    )]
    pub(crate) format: OutputFormat,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase log verbosity, repeat for more detail (default: warnings only)"
    )]
    pub(crate) verbose: u8,
    #[arg(
        long = "log-filter",
        value_name = "DIRECTIVE",
        global = true,
        help = "tracing filter directive, ignored when RUST_LOG is set (default: none)"
    )]
    pub(crate) log_filter: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// List the facets and values of a facets document.
    Facets(InputArgs),
    /// Fold a facets document into resale count, minimum price and sections.
    Summary(SummaryArgs),
    /// Append embedded offers from a capture log to a CSV file.
    Export(ExportArgs),
    /// Print the JSON paths of offer-like objects in a document.
    Locate(InputArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct InputArgs {
    #[arg(
        value_name = "INPUT",
        default_value = "-",
        help = "JSON document to read, `-` for stdin"
    )]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SummaryArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    #[arg(
        long = "inventory-facet",
        value_name = "NAME",
        help = "Facet that classifies inventory (default: inventoryType)"
    )]
    pub(crate) inventory_facet: Option<String>,
    #[arg(
        long = "resale-label",
        value_name = "LABEL",
        value_delimiter = ',',
        help = "Inventory labels counted as resale (default: resale)"
    )]
    pub(crate) resale_labels: Option<Vec<String>>,
    #[arg(
        long = "price-facet",
        value_name = "NAME",
        help = "Facet whose values are prices (default: totalPrice)"
    )]
    pub(crate) price_facet: Option<String>,
    #[arg(
        long = "section-facet",
        value_name = "NAME",
        help = "Facet whose values are sections (default: section)"
    )]
    pub(crate) section_facet: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ExportArgs {
    #[arg(
        value_name = "CAPTURE",
        default_value = "-",
        help = "JSON Lines capture log to read, `-` for stdin"
    )]
    pub(crate) capture: PathBuf,
    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "CSV file to append to, `-` for stdout (default: scraped_results.csv)"
    )]
    pub(crate) output: Option<PathBuf>,
    #[arg(
        long = "event-url",
        value_name = "URL",
        help = "Event page URL used to derive the event id (default: none)"
    )]
    pub(crate) event_url: Option<String>,
    #[arg(
        long = "event-name",
        value_name = "NAME",
        help = "Event name written to every row (default: Unknown)"
    )]
    pub(crate) event_name: Option<String>,
    #[arg(
        long = "url-filter",
        value_name = "TEXT",
        help = "Only export captures whose URL contains this text (default: /api/)"
    )]
    pub(crate) url_filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = CliArgs::parse_from([
            "ticket-facets",
            "summary",
            "facets.json",
            "--format",
            "json",
            "-vv",
            "--resale-label",
            "resale,Resale Verified",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Summary(args) => {
                assert_eq!(args.input.input, PathBuf::from("facets.json"));
                assert_eq!(
                    args.resale_labels,
                    Some(vec!["resale".to_string(), "Resale Verified".to_string()])
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn input_defaults_to_stdin() {
        let cli = CliArgs::parse_from(["ticket-facets", "locate"]);
        match cli.command {
            Command::Locate(args) => assert_eq!(args.input, PathBuf::from("-")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn export_flags_are_captured() {
        let cli = CliArgs::parse_from([
            "ticket-facets",
            "--no-config",
            "export",
            "capture.jsonl",
            "-o",
            "out.csv",
            "--event-url",
            "https://example.com/event/ABC",
        ]);
        assert!(cli.no_config);
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.output, Some(PathBuf::from("out.csv")));
                assert_eq!(args.event_url.as_deref(), Some("https://example.com/event/ABC"));
                assert_eq!(args.url_filter, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
