use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};
use ticket_facets::app_dirs;

use crate::cli::CliArgs;

pub(super) const ENV_PREFIX: &str = "TICKET_FACETS";
pub(super) const ENV_SEPARATOR: &str = "__";

/// Build a [`Config`] instance by combining default locations with CLI overrides.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("summary.resale_labels"),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

/// Discover the default configuration file locations that should be consulted.
pub(super) fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".ticket-facets.toml"));
        files.push(current_dir.join("ticket-facets.toml"));
    }

    files
}

/// Name of the environment variable that overrides `section.key`.
pub(super) fn env_var_for(key: &str) -> String {
    format!(
        "{ENV_PREFIX}{ENV_SEPARATOR}{}",
        key.replace('.', ENV_SEPARATOR).to_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn default_files_include_current_directory_variants() {
        let files = default_config_files();
        assert!(files.iter().any(|path| path.ends_with(".ticket-facets.toml")));
        assert!(files.iter().any(|path| path.ends_with("ticket-facets.toml")));
    }

    #[test]
    fn env_var_names_follow_the_separator() {
        assert_eq!(
            env_var_for("summary.price_facet"),
            "TICKET_FACETS__SUMMARY__PRICE_FACET"
        );
    }

    #[test]
    fn explicit_config_files_are_merged() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[summary]\nprice_facet = \"listPrice\"\n").expect("write");

        let cli = CliArgs::parse_from([
            "ticket-facets",
            "--no-config",
            "--config",
            path.to_str().expect("utf8 path"),
            "locate",
        ]);
        let config = build_config(&cli).expect("build");
        assert_eq!(
            config.get_string("summary.price_facet").expect("key"),
            "listPrice"
        );
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        let cli = CliArgs::parse_from([
            "ticket-facets",
            "--no-config",
            "--config",
            path.to_str().expect("utf8 path"),
            "locate",
        ]);
        assert!(build_config(&cli).is_err());
    }
}
