use std::{path::PathBuf, str::FromStr};

use apalis::{layers::sentry::SentryLayer, prelude::*};
use apalis_cron::{CronStream, Tick};
use clap::{Parser, Subcommand};
use cron::Schedule;
use stamp_datastore::JsonFileStore;
use stamp_pulse::{
    auth::{consent::LoopbackConsent, store::FileCredentialStore, Authorizer},
    openai::OpenAIClient,
    tracing::init_tracing_subscriber,
    yt::{data_api::YouTubeDataClient, scraper::Scraper, transcripts::YtTranscriptFetcher},
    PublishStatus, RunOutcome, TimestampProcessorBuilder,
};

#[derive(Parser)]
#[command(
    name = "stamp-pulse",
    about = "Posts topic timestamps on Gameranx's latest Top X video"
)]
struct Cli {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    openai_key: String,

    /// OAuth client registration downloaded from the Google Cloud Console
    #[arg(long, env = "YOUTUBE_CLIENT_SECRETS", default_value = "client_secrets.json")]
    client_secrets: PathBuf,

    /// Where YouTube OAuth credentials are persisted
    #[arg(long, env = "YOUTUBE_TOKEN_FILE", default_value = "token.json")]
    token_file: PathBuf,

    /// Directory the JSON snapshots are written to
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    /// Run every step but do not post the comment
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline once and exit
    Run,
    /// Start the cron scheduler
    Cron {
        /// Cron schedule expression
        #[arg(long, env = "CRON_SCHEDULE", default_value = "0 0 */6 * * *")]
        schedule: String,
    },
}

#[derive(Clone)]
struct Config {
    openai_key: String,
    client_secrets: PathBuf,
    token_file: PathBuf,
    workdir: PathBuf,
    dry_run: bool,
}

async fn run_pipeline(config: &Config) -> anyhow::Result<()> {
    let http = reqwest::Client::new();
    let authorizer = Authorizer::from_secrets_file(
        &config.client_secrets,
        FileCredentialStore::new(&config.token_file),
        LoopbackConsent::new(http.clone()),
    )
    .with_http_client(http);
    let youtube = YouTubeDataClient::new(authorizer);

    let processor = TimestampProcessorBuilder::new()
        .store(JsonFileStore::init(&config.workdir).await?)
        .channel_scraper(Scraper::default())
        .transcripts(YtTranscriptFetcher::new()?)
        .metadata(youtube.clone())
        .segmenter(OpenAIClient::new(&config.openai_key))
        .publisher(youtube)
        .dry_run(config.dry_run)
        .build();

    match processor.run().await? {
        RunOutcome::Commented(report) => {
            if let PublishStatus::Failed(reason) = &report.publish {
                tracing::warn!(%reason, video_id = %report.analysis.video_id, "Comment was not posted");
            }
            println!("{}", report.comment);
        }
        outcome => tracing::info!(?outcome, "Run finished early"),
    }

    Ok(())
}

async fn handle_tick(_tick: Tick, config: Data<Config>) -> anyhow::Result<()> {
    tracing::info!(dry_run = config.dry_run, "Running scheduled pipeline...");
    run_pipeline(&config).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = Config {
        openai_key: cli.openai_key,
        client_secrets: cli.client_secrets,
        token_file: cli.token_file,
        workdir: cli.workdir,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Command::Run => {
            tracing::info!(dry_run = config.dry_run, "Running pipeline once...");
            run_pipeline(&config).await?;
        }
        Command::Cron { schedule } => {
            tracing::info!(%schedule, "Starting cron scheduler...");
            let schedule = Schedule::from_str(&schedule)?;

            let worker = WorkerBuilder::new("stamp-pulse-cron")
                .backend(CronStream::new(schedule))
                .layer(SentryLayer::new())
                .data(config)
                .build(handle_tick);

            worker.run().await?;
        }
    }

    Ok(())
}
