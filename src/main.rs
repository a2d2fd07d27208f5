use chrono::{DateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use classroomsync::{ClassroomClient, ClassroomSync, Config, SyncConfig};

#[derive(Parser, Debug)]
#[command(name = "classroomsync")]
#[command(version = "0.1.0")]
#[command(about = "Collect GitHub Classroom repository data for an organization")]
struct Args {
    /// GitHub organization (defaults to GITHUB_ORG)
    #[arg(long)]
    org: Option<String>,

    /// Assignment prefix; only repositories named `<assignment>-<student>` are collected
    #[arg(short, long)]
    assignment: Option<String>,

    /// Only include commits after this RFC 3339 timestamp
    #[arg(long)]
    since: Option<DateTime<Utc>>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum repositories processed at once (defaults to CONCURRENCY_LIMIT)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Also fetch the jobs of each repository's latest CI run
    #[arg(long)]
    with_jobs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("classroomsync=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(org) = args.org {
        config.org = Some(org);
    }
    let org = config.require_org()?.to_string();

    let mut sync_config = SyncConfig::from(&config);
    sync_config.assignment = args.assignment;
    sync_config.since = args.since;
    sync_config.with_jobs = args.with_jobs;
    if let Some(limit) = args.concurrency {
        sync_config.concurrency_limit = limit.max(1);
    }

    let client = ClassroomClient::connect(&config, &org).await?;
    let sync = ClassroomSync::new(client, sync_config);

    tracing::info!("Starting classroom sync for organization: {}", org);
    let report = sync.run().await;
    tracing::info!(
        "Collected {} repositories with {} API requests",
        report.repositories.len(),
        report.request_count
    );

    let output = serde_json::to_string_pretty(&report)?;
    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}
