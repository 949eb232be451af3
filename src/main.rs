use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use fmriprep_version::advisory::collect_advisories;
use fmriprep_version::config::CheckConfig;
use fmriprep_version::logging;
use fmriprep_version::version::cache::FileCache;
use fmriprep_version::version::checker::LatestVersionChecker;
use fmriprep_version::version::flagged::{FlagStatus, FlaggedVersionChecker};
use fmriprep_version::version::registries::PypiRegistry;
use fmriprep_version::version::registry::Registry;

#[derive(Parser)]
#[command(name = "fmriprep-version")]
#[command(version, about = "Check for newer or flagged fMRIPrep releases")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Version to check against the index
    #[arg(
        long,
        env = "FMRIPREP_VERSION",
        default_value = env!("CARGO_PKG_VERSION"),
        global = true
    )]
    current_version: String,

    /// Package index base URL (overrides the configuration file)
    #[arg(long, value_name = "URL", global = true)]
    index_url: Option<String>,

    /// Document holding the flagged-versions map (overrides the configuration file)
    #[arg(long, value_name = "URL", global = true)]
    flagged_url: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Print the latest stable release
    Latest,
    /// Report whether the current version is flagged
    Flagged,
    /// Print upgrade and flagged-version advisories (default)
    Check,
}

impl Cli {
    /// Subcommand to run; `check` when none was given
    fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::Check)
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<CheckConfig> {
    let mut config = match &cli.config {
        Some(path) => CheckConfig::from_file(path)?,
        None => CheckConfig::default(),
    };

    if let Some(index_url) = &cli.index_url {
        config.index_url = index_url.clone();
    }
    if let Some(flagged_url) = &cli.flagged_url {
        config.flagged_url = Some(flagged_url.clone());
    }

    Ok(config)
}

async fn run(cli: Cli, config: CheckConfig) -> anyhow::Result<()> {
    let registry: Arc<dyn Registry> = Arc::new(PypiRegistry::from_config(&config)?);
    let latest_checker = LatestVersionChecker::new(
        registry.clone(),
        FileCache::new(config.cache_path()),
        config.release_expiry_days,
    );
    let flagged_checker = FlaggedVersionChecker::new(registry);

    match cli.selected_command() {
        Command::Latest => {
            if let Some(latest) = latest_checker.check_latest().await {
                println!("{latest}");
            }
        }
        Command::Flagged => match flagged_checker.is_flagged(&cli.current_version).await {
            FlagStatus::Flagged { reason } => {
                println!("flagged: {}", reason.as_deref().unwrap_or("unknown"));
            }
            FlagStatus::NotFlagged => println!("not flagged"),
        },
        Command::Check => {
            let advisories = collect_advisories(
                "fMRIPrep",
                &cli.current_version,
                &latest_checker,
                &flagged_checker,
            )
            .await;
            for advisory in advisories {
                eprintln!("{advisory}");
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref())?;
    let config = load_config(&cli)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli, config))
}
