use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use errata_check::config::{
    Config, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILE, parse_release_date,
};
use errata_check::errata::{ErrataClient, HttpTransport, ResolutionEngine, check_packages};
use errata_check::logging::LogContext;
use errata_check::parser::InstalledPackages;
use errata_check::report::Report;

#[derive(Parser)]
#[command(name = "errata-check")]
#[command(
    version,
    about = "Check that packages installed on an image are covered by the right errata"
)]
struct Cli {
    /// Path of the image (or of its mounted directory)
    #[arg(value_name = "IMAGE_PATH")]
    images: Vec<PathBuf>,

    /// Expected release date, overrides the one in the config file
    #[arg(
        short,
        long,
        value_name = "YYYY-MM-DD",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    release_date: Option<String>,

    /// Config file listing the packages to check
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Run log written next to the console output
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (logging, log_error) = match LogContext::new(&cli.log_file, cli.verbose) {
        Ok(logging) => (logging, None),
        Err(e) => (LogContext::console(cli.verbose), Some(e)),
    };
    let _entered = logging.enter();

    if let Some(e) = log_error {
        warn!(
            "Cannot write run log {}: {}; logging to console only",
            cli.log_file.display(),
            e
        );
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let release_date_override = match cli.release_date.as_deref() {
        None | Some("") => None,
        Some(value) => Some(parse_release_date(value)?),
    };

    let Some(image) = single_image(cli.images)? else {
        warn!("Missing `IMAGE_PATH` argument (try --help)");
        return Ok(ExitCode::SUCCESS);
    };

    let config = Config::load(&cli.config)?;
    let release_date = release_date_override.or(config.release_date);

    let names: Vec<&str> = config.packages.iter().map(|p| p.package()).collect();
    let installed = InstalledPackages::load(&config.manifest_for_image(&image), &names)?;

    let transport = HttpTransport::new(config.service.concurrency())
        .context("Failed to create HTTP client")?;
    let client = ErrataClient::from_config(Arc::new(transport), &config.service);
    let engine = ResolutionEngine::new(client, config.service.concurrency());

    let packages = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(check_packages(&engine, &installed, &config.packages))?;

    info!("Checked {} packages", packages.len());

    let report = Report {
        release_date,
        packages,
    };

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(ExitCode::SUCCESS)
}

/// Exactly one image path is accepted; none is reported by the caller
fn single_image(mut images: Vec<PathBuf>) -> anyhow::Result<Option<PathBuf>> {
    match images.len() {
        0 | 1 => Ok(images.pop()),
        n => anyhow::bail!("Expected one `IMAGE_PATH` argument, got {}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_extra_positionals_for_run_to_reject() {
        let cli = Cli::try_parse_from(["errata-check", "a.iso", "b.iso"]).unwrap();

        assert_eq!(cli.images.len(), 2);
        assert!(single_image(cli.images).is_err());
    }

    #[test]
    fn single_image_returns_the_only_path() {
        assert_eq!(
            single_image(vec![PathBuf::from("rhevh.iso")]).unwrap(),
            Some(PathBuf::from("rhevh.iso"))
        );
        assert_eq!(single_image(vec![]).unwrap(), None);
    }

    #[test]
    fn release_date_flag_value_is_optional() {
        let bare = Cli::try_parse_from(["errata-check", "-r", "rhevh.iso"]).unwrap();
        assert_eq!(bare.release_date.as_deref(), Some("rhevh.iso"));

        let valued = Cli::try_parse_from(["errata-check", "rhevh.iso", "-r"]).unwrap();
        assert_eq!(valued.release_date.as_deref(), Some(""));
        assert_eq!(valued.images, vec![PathBuf::from("rhevh.iso")]);
    }
}
