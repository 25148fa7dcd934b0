mod args;
mod output;

pub(crate) use args::{CliArgs, Command, OutputFormat, parse_cli};
#[cfg(test)]
pub(crate) use args::{InputArgs, SummaryArgs};
pub(crate) use output::render;
