//! Server binary for board2brief.
//!
//! A thin shim over the library: maps CLI flags to [`AnalysisConfig`],
//! reads provider credentials from the environment once, and serves the
//! capture UI plus the `/analyze` and `/health` endpoints.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use board2brief::server::{run_server, AppState};
use board2brief::{AnalysisConfig, PipelineMode, ProviderCredentials};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "board2brief", version, about = "Whiteboard capture → strategic brief")]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0", env = "BOARD2BRIEF_HOST")]
    host: String,

    /// Port to bind.
    #[arg(long, default_value_t = 5000, env = "BOARD2BRIEF_PORT")]
    port: u16,

    /// Pipeline variant.
    #[arg(long, value_enum, default_value_t = ModeArg::TwoStage, env = "BOARD2BRIEF_MODE")]
    mode: ModeArg,

    /// Vision model for extraction (and single-stage analysis).
    #[arg(long, env = "BOARD2BRIEF_EXTRACTION_MODEL")]
    extraction_model: Option<String>,

    /// Language model for the two-stage analysis.
    #[arg(long, env = "BOARD2BRIEF_ANALYSIS_MODEL")]
    analysis_model: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    TwoStage,
    SingleStage,
}

impl From<ModeArg> for PipelineMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::TwoStage => PipelineMode::TwoStage,
            ModeArg::SingleStage => PipelineMode::SingleStage,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("board2brief=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let credentials = ProviderCredentials::from_env();
    credentials.log_missing();

    let mut builder = AnalysisConfig::builder().mode(args.mode.into());
    if let Some(model) = args.extraction_model {
        builder = builder.extraction_model(model);
    }
    if let Some(model) = args.analysis_model {
        builder = builder.analysis_model(model);
    }
    let config = builder.build()?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid listen address")?;

    run_server(addr, AppState::new(config, credentials))
        .await
        .context("server error")?;
    Ok(())
}
