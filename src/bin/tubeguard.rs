//! Tubeguard Binary - Local playback-state maintenance
//!
//! Wires the JSON-file stores and the filesystem probe into the services,
//! runs the watched-history migration (unless disabled) and then executes one
//! command.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tubeguard::adapters::local::{
    FsAdapter, JsonDownloadStatusStore, JsonDownloadedVideoStore, JsonWatchHistoryStore,
    SnapshotCatalog,
};
use tubeguard::application::{DownloadReconciler, LegacyMigrator, PlaybackRouter};
use tubeguard::config::LocalConfig;
use tubeguard::domain::identifier;
use tubeguard::domain::records::{PlaybackDecision, PlaybackSource};

#[derive(Parser)]
#[command(name = "tubeguard", about = "Video identity and playback-state tool")]
struct Cli {
    /// Skip the startup history migration
    #[arg(long)]
    skip_migration: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve any stored identifier to a playback source
    Route { identifier: String },
    /// Decide between the downloaded copy and the network for a catalog id
    Decide { catalog_id: String },
    /// Drop every record of a download
    Remove { catalog_id: String },
    /// Drop downloads whose file is gone
    Sweep,
    /// Run the watched-history migration now
    Migrate,
    /// Show how an identifier is classified
    Parse { identifier: String },
}

type LocalRouter = PlaybackRouter<JsonDownloadStatusStore, JsonDownloadedVideoStore, FsAdapter>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = LocalConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubeguard=info".into()),
        )
        .init();

    // 1. Adapters (Local implementations)
    let fs_adapter = FsAdapter::new();
    let catalog = match &config.catalog_snapshot_file {
        Some(path) => match SnapshotCatalog::from_file(path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Catalog snapshot unreadable, using an empty one");
                SnapshotCatalog::empty()
            }
        },
        None => SnapshotCatalog::empty(),
    };

    // 2. Application Services
    let migrator = LegacyMigrator::new(
        JsonWatchHistoryStore::new(&config.watch_history_file),
        fs_adapter,
    );
    let router: LocalRouter = PlaybackRouter::new(DownloadReconciler::new(
        JsonDownloadStatusStore::new(&config.download_status_file),
        JsonDownloadedVideoStore::new(&config.downloaded_videos_file),
        fs_adapter,
    ));

    // 3. Startup migration
    let explicit_migration = matches!(cli.command, Command::Migrate);
    if explicit_migration || (config.run_migration && !cli.skip_migration) {
        match migrator.migrate(&catalog).await {
            Ok(report) => {
                if explicit_migration {
                    println!(
                        "total={} migrated={} skipped={} errors={} written={}",
                        report.total, report.migrated, report.skipped, report.errors, report.written
                    );
                    if let Some(path) = report.backup_path {
                        println!("backup={}", path);
                    }
                    if let Some(warning) = report.backup_warning {
                        println!("warning={}", warning);
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "History migration failed");
                if explicit_migration {
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    // 4. Command
    match run(cli.command, &router).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, router: &LocalRouter) -> tubeguard::Result<()> {
    match command {
        Command::Route { identifier } => match router.route(&identifier).await? {
            PlaybackSource::LocalCopy(metadata) => println!("local-copy {}", metadata.file_path),
            PlaybackSource::Network { catalog_id } => println!("network {}", catalog_id),
            PlaybackSource::LocalFile { path } => println!("local-file {}", path),
            PlaybackSource::NetworkDevice { url } => println!("network-device {}", url),
        },
        Command::Decide { catalog_id } => match router.try_decide(&catalog_id).await? {
            PlaybackDecision::Local(metadata) => {
                let view = router.materialize_local_view::<()>(metadata, None).await?;
                println!("local {} ({})", view.playback_url, view.title);
            }
            PlaybackDecision::Network => println!("network"),
        },
        Command::Remove { catalog_id } => {
            let report = router.reconciler().remove(&catalog_id).await?;
            info!(catalog_id = %catalog_id, "Download records removed");
            println!(
                "status_existed={} metadata_existed={}",
                report.status_existed, report.metadata_existed
            );
        }
        Command::Sweep => {
            let report = router.reconciler().reconcile_missing_files().await?;
            println!(
                "checked={} removed={} failed={}",
                report.checked,
                report.removed.len(),
                report.failed.len()
            );
            for catalog_id in report.removed {
                println!("removed {}", catalog_id);
            }
            for catalog_id in report.failed {
                println!("failed {}", catalog_id);
            }
        }
        // handled before dispatch
        Command::Migrate => {}
        Command::Parse { identifier: raw } => {
            let parsed = identifier::parse(&raw)?;
            println!("origin={:?}", parsed.origin());
            if let Some(path) = parsed.path() {
                println!("path={}", path);
            }
            if parsed.is_legacy() {
                match identifier::decode_legacy(&raw) {
                    Some(path) => println!("migrates-to={}", identifier::create_local(&path)),
                    None => println!("migrates-to=<undecodable>"),
                }
            }
        }
    }
    Ok(())
}
