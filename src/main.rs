mod cli;
mod settings;
mod workflow;

use std::io::{self, Write};

use anyhow::Result;
use cli::{OutputFormat, parse_cli, render};
use ticket_facets::logging;

fn main() -> Result<()> {
    let cli = parse_cli();

    let resolved = settings::load(&cli)?;
    logging::initialize(resolved.log_filter.as_deref(), cli.verbose)?;

    // Keep stdout machine-readable when it carries CSV rows or JSON.
    let rows_on_stdout = workflow::writes_rows_to_stdout(&cli.command, &resolved);
    let machine_stdout = rows_on_stdout || cli.format == OutputFormat::Json;

    if cli.print_config {
        if machine_stdout {
            resolved.write_summary(io::stderr().lock())?;
        } else {
            resolved.write_summary(io::stdout().lock())?;
        }
    }

    let report = workflow::run(&cli.command, &resolved)?;
    let text = render(&report, cli.format)?;
    if rows_on_stdout {
        io::stderr().lock().write_all(text.as_bytes())?;
    } else {
        io::stdout().lock().write_all(text.as_bytes())?;
    }

    Ok(())
}
