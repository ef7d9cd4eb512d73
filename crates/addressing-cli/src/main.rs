//! addressing: command-line interface for addressing-core
//!
//! Checks postal codes and subdivision codes against country address
//! metadata, and builds snapshot files for the embedded provider.
//!
//! Usage examples
//! --------------
//!
//! - Check a postal code (exit status 1 when invalid)
//!   $ addressing postal US 94043
//!   $ addressing postal NG ABC123
//!
//! - List or check subdivisions
//!   $ addressing subdivisions CA
//!   $ addressing subdivision us ca
//!
//! - Use a snapshot directory or the live dataset instead of the bundled data
//!   $ addressing --data-dir ./data postal GB "SW1A 1AA"
//!   $ addressing --remote postal BR 01310-100
//!
//! - Refresh snapshot files
//!   $ addressing import --out ./data --only US,NG,GB --overwrite
mod args;

use crate::args::{CliArgs, Commands};
use addressing_core::{AddressMetadataProvider, CountryRecord, EmbeddedProvider};
use anyhow::Context;
use clap::Parser;
#[cfg(feature = "remote")]
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "remote")]
use addressing_core::{HttpDataSource, RemoteConfig, RemoteProvider};

/// Whichever provider the global flags selected.
enum Source {
    Embedded(EmbeddedProvider),
    #[cfg(feature = "remote")]
    Remote(RemoteProvider<HttpDataSource>),
}

impl Source {
    fn open(args: &CliArgs) -> anyhow::Result<Self> {
        #[cfg(feature = "remote")]
        if args.remote {
            let remote = RemoteProvider::new().context("failed to build HTTP client")?;
            tracing::debug!(base_url = %remote.source().config().base_url, "using remote dataset");
            return Ok(Source::Remote(remote));
        }
        match &args.data_dir {
            Some(dir) => {
                let provider = EmbeddedProvider::from_dir(dir)
                    .with_context(|| format!("failed to load snapshot from {}", dir.display()))?;
                Ok(Source::Embedded(provider))
            }
            None => {
                tracing::debug!("using bundled snapshot");
                Ok(Source::Embedded(EmbeddedProvider::bundled()))
            }
        }
    }

    fn provider(&self) -> &dyn AddressMetadataProvider {
        match self {
            Source::Embedded(p) => p,
            #[cfg(feature = "remote")]
            Source::Remote(p) => p,
        }
    }

    fn country(&self, code: &str) -> Option<CountryRecord> {
        match self {
            Source::Embedded(p) => p.country(code).cloned(),
            #[cfg(feature = "remote")]
            Source::Remote(p) => p.country(code),
        }
    }
}

/// Log level used when `RUST_LOG` is unset.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn verdict(ok: bool) -> ExitCode {
    if ok {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("invalid");
        ExitCode::FAILURE
    }
}

#[cfg(feature = "remote")]
fn import(
    out: &Path,
    only: &[String],
    overwrite: bool,
    compress: bool,
) -> anyhow::Result<ExitCode> {
    use addressing_core::import::{run_import, ImportOptions, IMPORT_TIMEOUT};

    let config = RemoteConfig::from_env().with_timeout(IMPORT_TIMEOUT);
    let source = HttpDataSource::new(config).context("failed to build HTTP client")?;
    let mut options = ImportOptions::new(out).with_only(only);
    options.overwrite = overwrite;
    options.compress = compress;

    let report = run_import(&source, &options)?;
    println!(
        "Done. ok={} skip={} err={}. Output => {}",
        report.ok,
        report.skipped,
        report.failed,
        out.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Import talks to the dataset directly; every other command needs a provider.
    #[cfg(feature = "remote")]
    if let Commands::Import {
        out,
        only,
        overwrite,
        #[cfg(feature = "compact")]
        compress,
    } = &args.command
    {
        #[cfg(not(feature = "compact"))]
        let compress = &false;
        return import(out, only, *overwrite, *compress);
    }

    let source = Source::open(&args)?;
    let provider = source.provider();

    match &args.command {
        Commands::Postal { country, value } => {
            return Ok(verdict(provider.is_valid_postal(country, value)));
        }

        Commands::Subdivision { country, code } => {
            return Ok(verdict(provider.is_valid_subdivision(country, code)));
        }

        Commands::Subdivisions { country } => {
            let names = provider.subdivision_names(country);
            if names.is_empty() {
                println!("No subdivisions for: {country}");
            }
            for (code, name) in names.iter() {
                println!("{code}\t{name}");
            }
        }

        Commands::Country { country } => match source.country(country) {
            Some(c) => {
                println!("Country: {}", c.name());
                println!("Code: {}", c.code);
                println!("Postal pattern: {}", c.postal_pattern.as_deref().unwrap_or("-"));
                println!("Subdivisions: {}", provider.subdivision_keys(country).len());
            }
            None => eprintln!("No metadata for: {country}"),
        },

        Commands::Audit => {
            let problems = match &source {
                Source::Embedded(p) => p.pattern_diagnostics(),
                #[cfg(feature = "remote")]
                Source::Remote(_) => anyhow::bail!("audit needs a snapshot; drop --remote"),
            };
            if problems.is_empty() {
                println!("All postal patterns compile.");
            } else {
                for problem in &problems {
                    println!("{problem}");
                }
                return Ok(ExitCode::FAILURE);
            }
        }

        #[cfg(feature = "remote")]
        Commands::Import { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_default_level() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(5), "debug");
    }

    #[test]
    fn global_flags_parse() {
        let args = CliArgs::try_parse_from(["addressing", "-vv", "postal", "US", "94043"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Commands::Postal { ref country, .. } if country == "US"));
    }
}
