use anyhow::{Result, bail};
use bymr_patcher::config::Config;
use bymr_patcher::download::HttpDownloader;
use bymr_patcher::http::HttpClient;
use bymr_patcher::release::GitHubReleases;
use bymr_patcher::runtime::RealRuntime;
use bymr_patcher::sync::{AssetOutcome, Patcher, SyncReport};
use bymr_patcher::version::VersionStore;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// bymr-patcher - Backyard Monsters Refitted build updater
///
/// Checks the latest published release and downloads its builds into the
/// build directory when the local version marker is out of date.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Build directory holding version.txt and the downloaded builds
    #[arg(long = "dir", short = 'd', env = "BYMR_DIR", value_name = "PATH")]
    pub build_dir: Option<PathBuf>,

    /// Latest-release endpoint (defaults to the GitHub API)
    #[arg(long = "api-url", env = "BYMR_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", env = "BYMR_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = Config::new(cli.build_dir, cli.api_url, cli.timeout.map(Duration::from_secs))?;
    let http = HttpClient::new(config.client.clone());
    let runtime = RealRuntime;

    let patcher = Patcher::new(
        GitHubReleases::new(http.clone(), Some(config.endpoint.clone())),
        HttpDownloader::new(RealRuntime, http, &config.build_dir),
        VersionStore::new(&runtime, &config.build_dir),
    );

    let report = tokio::select! {
        report = patcher.sync() => report?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted, the next run will resume from the stored version.");
            bail!("Sync cancelled");
        }
    };

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &SyncReport) {
    if report.up_to_date {
        return;
    }

    for outcome in report.failed_assets() {
        if let AssetOutcome::Failed { name, error, .. } = outcome {
            eprintln!("Error downloading build {}: {}", name, error);
        }
    }

    if !report.marker_updated {
        eprintln!("failed to update version.txt; builds will be downloaded again next run");
    }

    println!("     updated {} -> {}", report.previous_version, report.release.id);
}
