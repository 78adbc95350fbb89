//! `portal`: admin console for the volunteer portal backend.
//!
//! Every subcommand prints its result as pretty JSON on stdout. Failures
//! print `error: <detail>` on stderr and exit with status 1.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal_api::PortalApi;
use portal_client::{ClientConfig, FileTokenStore, HttpClient, Session};
use portal_core::ApiError;
use portal_models::report::{ExportFormat, ExportKind};

#[derive(Debug, Parser)]
#[command(name = "portal", about = "Admin console for the volunteer portal API", version)]
struct Cli {
    /// Backend base URL. Overrides `PORTAL_API_URL` / `NEXT_PUBLIC_API_URL`.
    #[arg(long, global = true, value_name = "url")]
    api_url: Option<String>,

    /// Where login tokens are kept between runs. Overrides
    /// `PORTAL_TOKEN_FILE`; defaults to `~/.portal/tokens.json`.
    #[arg(long, global = true, value_name = "path")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and store the token pair.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored tokens.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Show one volunteer profile.
    Volunteer { id: i64 },
    /// List time logs awaiting review.
    PendingHours,
    /// Approve a pending time log.
    ApproveHours { log_id: i64 },
    /// Reject a pending time log.
    RejectHours { log_id: i64 },
    /// Search projects, tasks, volunteers and posts.
    Search {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Download a dataset export.
    Export {
        kind: KindArg,
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        /// Output file. Defaults to the name suggested by the backend.
        #[arg(long, value_name = "path")]
        out: Option<PathBuf>,
    },
    /// Upload a file.
    Upload {
        path: PathBuf,
        #[arg(long)]
        folder: Option<String>,
    },
    /// Print notifications as they arrive until Ctrl-C.
    Watch,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Volunteers,
    Projects,
    Tasks,
    Hours,
}

impl From<KindArg> for ExportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Volunteers => ExportKind::Volunteers,
            KindArg::Projects => ExportKind::Projects,
            KindArg::Tasks => ExportKind::Tasks,
            KindArg::Hours => ExportKind::Hours,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal=info,portal_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", describe(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(path) = cli.token_file {
        config = config.with_token_file(path);
    }

    let session = open_session(&config)?;
    tracing::debug!(base_url = %config.base_url, "Loaded client configuration");

    let api = PortalApi::new(HttpClient::new(&config, session));
    commands::execute(&api, cli.command).await
}

/// File-backed session when a token file is configured or a home directory
/// is known, otherwise memory only.
fn open_session(config: &ClientConfig) -> anyhow::Result<Session> {
    let path = config.token_file.clone().or_else(default_token_file);
    let Some(path) = path else {
        tracing::warn!("No token file available; login will not persist");
        return Ok(Session::in_memory());
    };

    let store = FileTokenStore::open(&path)
        .with_context(|| format!("opening token file {}", path.display()))?;
    Ok(Session::new(Arc::new(store)))
}

fn default_token_file() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".portal").join("tokens.json"))
}

/// Backend errors print only their detail; everything else prints its
/// context chain.
fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ApiError>() {
        Some(api_error) => api_error.detail().to_string(),
        None => format!("{error:#}"),
    }
}
