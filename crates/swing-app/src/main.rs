#![warn(missing_docs)]
//! # swing-app binary
//!
//! Command-line entry point for the swing analyzer.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use swing_app::{
    AnalysisOutcome, AppError, analyze_with_fallback, app_version, apply_outcome,
    fallback_for_config_error, is_https_endpoint, load_upload, probe_video_file, render_report,
};
use swing_core::DEFAULT_SPEED_UNIT;
use swing_demo::generate_fallback;
use swing_ui::UiState;
use swing_upload::{AnalysisClient, BackendConfig, CancelHandle, redacted_endpoint};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status for a cancelled attempt (128 + SIGINT).
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "swing-analyzer", version = app_version(), about = "Analyze tennis swing videos")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Unit shown next to speed values
    #[arg(long, global = true, default_value = DEFAULT_SPEED_UNIT)]
    speed_unit: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a video for analysis, falling back to demo analysis on failure
    Analyze {
        /// MP4 or MOV file
        path: PathBuf,

        /// Override the MIME type inferred from the file extension
        #[arg(long)]
        content_type: Option<String>,

        /// Skip the backend even when one is configured
        #[arg(long)]
        demo: bool,
    },

    /// Print the deterministic demo result for a file name
    Demo {
        /// File name used as the seed
        name: String,
    },

    /// Show which backend, if any, is configured
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            error!(%error, "swing-analyzer failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Fails only when a subscriber is already installed.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    match cli.command {
        Command::Analyze {
            path,
            content_type,
            demo,
        } => analyze(path, content_type, demo, cli.json, cli.speed_unit).await,
        Command::Demo { name } => {
            let result = generate_fallback(&name);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let mut state = UiState::new(app_version(), false);
                state.speed_unit = cli.speed_unit;
                state.apply_result(result, None);
                println!("{}", render_report(&state));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            let config = BackendConfig::from_env()?;
            let state = UiState::new(app_version(), config.is_some());
            println!("swing-analyzer {}", app_version());
            if let Some(config) = &config {
                println!("endpoint: {}", redacted_endpoint(config.analyze_url()));
            }
            println!("{}", state.backend_note());
            println!("{}", state.mode.note());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn analyze(
    path: PathBuf,
    content_type: Option<String>,
    force_demo: bool,
    json: bool,
    speed_unit: String,
) -> Result<ExitCode, AppError> {
    let (config, config_error) = if force_demo {
        (None, None)
    } else {
        match BackendConfig::from_env() {
            Ok(config) => (config, None),
            Err(error) => (None, Some(error)),
        }
    };
    if let Some(config) = &config
        && !is_https_endpoint(config.analyze_url().as_str())
    {
        warn!(
            endpoint = %redacted_endpoint(config.analyze_url()),
            "backend endpoint is not using https"
        );
    }

    let client = AnalysisClient::with_reqwest(config);
    let mut state = UiState::new(
        app_version(),
        client.is_configured() || config_error.is_some(),
    );
    state.speed_unit = speed_unit;

    let file = probe_video_file(&path, content_type.clone()).await?;
    state.select_file(file)?;
    let upload = load_upload(&path, content_type).await?;

    if !state.begin_analysis() {
        return Ok(ExitCode::FAILURE);
    }
    info!(mode = state.mode.label(), file = %upload.file.name, "starting analysis");

    let cancel = CancelHandle::new();
    let token = cancel.token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let outcome = match &config_error {
        Some(error) => fallback_for_config_error(&upload, error, Some(&token)),
        None => analyze_with_fallback(&client, &upload, Some(&token)).await,
    };
    interrupt.abort();
    apply_outcome(&mut state, &outcome);

    match &outcome {
        AnalysisOutcome::Completed { result, advisory } if json => {
            let report = serde_json::json!({ "result": result, "advisory": advisory });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        AnalysisOutcome::Cancelled { message } if json => {
            let report = serde_json::json!({ "cancelled": true, "message": message });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => println!("{}", render_report(&state)),
    }

    Ok(match outcome {
        AnalysisOutcome::Completed { .. } => ExitCode::SUCCESS,
        AnalysisOutcome::Cancelled { .. } => ExitCode::from(EXIT_CANCELLED),
    })
}
