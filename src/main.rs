use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, error, info};

use switching_checklist::adapters::{
    LocalFileExporter, MarkdownChecklistRenderer, PandocPdfExporter, SystemClock,
};
use switching_checklist::application::{
    ExportChecklistCommand, ExportChecklistError, ExportChecklistHandler,
};
use switching_checklist::config::{AppConfig, ConfigError, ExportConfig};
use switching_checklist::domain::catalog::StepCatalog;
use switching_checklist::domain::progress::ProgressReport;
use switching_checklist::domain::verification::{
    ChecklistSession, SessionDocument, VerificationError,
};
use switching_checklist::ports::{ChecklistRenderer, ExportFormat, SnapshotExporter};
use switching_checklist::telemetry;

#[derive(Parser)]
#[command(name = "switching-checklist")]
#[command(about = "Dual technician verification checklist for HV switching")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a fresh session as JSON, ready to be filled in
    New,

    /// Render a session (or the blank form) as markdown on stdout
    Render {
        /// Session JSON file; omit for the blank form
        #[arg(short, long)]
        session: Option<PathBuf>,
    },

    /// Show completion progress of a session
    Progress {
        #[arg(short, long)]
        session: PathBuf,
    },

    /// Export a fully verified and signed session
    Export {
        #[arg(short, long)]
        session: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read session {}: {source}", .path.display())]
    ReadSession {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid session {}: {source}", .path.display())]
    ParseSession {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Session {} does not match the checklist: {source}", .path.display())]
    RestoreSession {
        path: PathBuf,
        source: VerificationError,
    },

    #[error("Failed to encode session: {0}")]
    EncodeSession(#[from] serde_json::Error),

    #[error(transparent)]
    Export(#[from] ExportChecklistError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = telemetry::init_tracing(&config.logging) {
        eprintln!("Warning: tracing not initialized: {}", err);
    }

    match run(cli.command.unwrap_or(Commands::Render { session: None }), &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &AppConfig) -> Result<(), CliError> {
    let catalog = Arc::new(StepCatalog::css092_hv_switching());
    let renderer = renderer_for(&config.export);
    let clock = Arc::new(SystemClock);

    match command {
        Commands::New => {
            let session = ChecklistSession::initialize(&catalog, clock.as_ref());
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        Commands::Render { session } => {
            let session = match session {
                Some(path) => load_session(&catalog, &path).await?,
                None => ChecklistSession::initialize(&catalog, clock.as_ref()),
            };
            print!("{}", renderer.render(&catalog, &session).markdown);
        }
        Commands::Progress { session } => {
            let session = load_session(&catalog, &session).await?;
            let report = ProgressReport::evaluate(&catalog, session.store());
            println!(
                "Overall: {} ({} of {} steps verified)",
                report.overall(),
                report.verified_steps(),
                report.total_steps()
            );
            for sequence in report.sequences() {
                println!("  {}: {}", sequence.sequence.label(), sequence.percentage());
            }
            if let Some(next) = report.first_unverified() {
                println!("Next unverified step: {}", next);
            }
            let missing = session.metadata().missing_signatures();
            if !missing.is_empty() {
                let actors: Vec<String> = missing.iter().map(|a| a.label().to_string()).collect();
                println!("Missing signatures: {}", actors.join(", "));
            }
        }
        Commands::Export { session } => {
            let session = load_session(&catalog, &session).await?;
            let handler = ExportChecklistHandler::new(
                catalog.clone(),
                Arc::new(renderer),
                exporter_for(&config.export),
                config.export.filename_convention(),
                clock,
            );
            let result = handler.handle(ExportChecklistCommand { session }).await?;
            info!(location = %result.receipt.location, "export complete");
            println!("{}", result.receipt.location);
        }
    }
    Ok(())
}

async fn load_session(catalog: &StepCatalog, path: &Path) -> Result<ChecklistSession, CliError> {
    debug!(path = %path.display(), "loading session");
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::ReadSession {
            path: path.to_path_buf(),
            source,
        })?;
    let document: SessionDocument =
        serde_json::from_str(&json).map_err(|source| CliError::ParseSession {
            path: path.to_path_buf(),
            source,
        })?;
    ChecklistSession::restore(catalog, document).map_err(|source| CliError::RestoreSession {
        path: path.to_path_buf(),
        source,
    })
}

fn renderer_for(config: &ExportConfig) -> MarkdownChecklistRenderer {
    MarkdownChecklistRenderer::new()
        .with_title(format!(
            "High Voltage Switching – Technician Verification – {}",
            config.site_code
        ))
        .with_footer(format!(
            "HV Switching • {} • Dual Technician Verification",
            config.site_code
        ))
}

fn exporter_for(config: &ExportConfig) -> Arc<dyn SnapshotExporter> {
    match config.format {
        ExportFormat::Markdown => Arc::new(LocalFileExporter::new(&config.output_dir)),
        ExportFormat::Pdf => {
            let mut exporter = PandocPdfExporter::new(&config.output_dir)
                .with_pdf_timeout(config.pdf_timeout_secs);
            if let Some(path) = &config.pandoc_path {
                exporter = exporter.with_pandoc_path(path);
            }
            Arc::new(exporter)
        }
    }
}
