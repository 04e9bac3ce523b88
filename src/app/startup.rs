//! Application startup and scan orchestration

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tokio::sync::broadcast;

use super::cli::args::Args;
use super::cli::config::{load_config, Settings};
use super::output::MatchWriter;
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::{flush_logging, init_logging};
use crate::core::shutdown::ShutdownCoordinator;
use crate::core::version;
use crate::scanner::api::{ScanError, ScanMessage, ScanRequest, ScanStats, Scanner};

/// Errors that end a CLI run
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Writing results failed: {0}")]
    Output(#[from] io::Error),
}

impl ContextualError for RunError {
    fn is_user_actionable(&self) -> bool {
        match self {
            RunError::Scan(e) => e.is_user_actionable(),
            RunError::Output(_) => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            RunError::Scan(e) => e.user_message(),
            RunError::Output(_) => None,
        }
    }
}

/// Run the command line application
pub async fn startup() -> ExitCode {
    let code = run().await;
    flush_logging();
    code
}

async fn run() -> ExitCode {
    let args = Args::parse_styled(terminal_color());

    // Logging settings may come from the config file, so it is read first and its
    // errors are reported once the logger exists
    let loaded = load_config(args.config_file.as_deref()).await;
    let config = loaded.as_ref().ok().and_then(|c| c.as_ref()).map(|(_, c)| c);
    let settings = Settings::resolve(&args, config);

    let use_color = settings.color.unwrap_or_else(terminal_color);
    colored::control::set_override(use_color);

    if let Err(e) = init_logging(
        settings.log_level.as_deref(),
        settings.log_format,
        settings.log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: cannot initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    log::debug!(
        "{} {} (commit {}, built {})",
        version::PACKAGE_NAME,
        version::version(),
        version::git_hash(),
        version::build_time()
    );

    match loaded {
        Ok(Some((path, _))) => log::debug!("Loaded configuration from {}", path.display()),
        Ok(None) => log::debug!("No configuration file"),
        Err(e) => {
            log_error_with_context(&e, "Loading configuration");
            return ExitCode::FAILURE;
        }
    }
    log::debug!("Effective settings: {:?}", settings);

    let scanner = Scanner::with_config(settings.scanner.clone());
    let request = ScanRequest::new(settings.root.clone());
    let writer = MatchWriter::new(io::stdout(), settings.output_format, use_color);

    let result = ShutdownCoordinator::guard(|shutdown_rx| {
        run_scan(scanner, request, writer, shutdown_rx)
    })
    .await;

    match result {
        Ok(stats) => {
            log_summary(&stats);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error_with_context(&e, "Scanning");
            ExitCode::FAILURE
        }
    }
}

/// Stream one scan to `writer`; the first shutdown signal cancels it
async fn run_scan<W: io::Write>(
    scanner: Scanner,
    request: ScanRequest,
    mut writer: MatchWriter<W>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<ScanStats, RunError> {
    let mut handle = scanner.scan(request)?;
    let mut interrupted = false;

    loop {
        tokio::select! {
            message = handle.recv() => match message {
                Some(ScanMessage::Match(event)) => {
                    if let Err(e) = writer.write_match(&event) {
                        handle.cancel();
                        if e.kind() == io::ErrorKind::BrokenPipe {
                            log::debug!("Output closed; stopping scan");
                            break;
                        }
                        let _ = handle.join().await;
                        return Err(e.into());
                    }
                }
                Some(ScanMessage::FileSkipped { path, reason }) => {
                    log::info!("Skipped {}: {}", path.display(), reason);
                }
                Some(ScanMessage::Completed) | Some(ScanMessage::Cancelled) | None => break,
            },
            signal = shutdown_rx.recv(), if !interrupted => {
                interrupted = true;
                // A closed channel means no signal handlers, not a signal
                if !matches!(signal, Err(broadcast::error::RecvError::Closed)) {
                    handle.cancel();
                }
            }
        }
    }

    if let Err(e) = writer.flush() {
        if e.kind() != io::ErrorKind::BrokenPipe {
            return Err(e.into());
        }
    }
    Ok(handle.join().await?)
}

fn log_summary(stats: &ScanStats) {
    if stats.cancelled {
        log::info!("Scan was cancelled; results are incomplete");
    }
    log::info!(
        "Scanned {} files ({} lines, {} skipped, {} with invalid UTF-8): {} matches in {:.3}s",
        stats.files_scanned,
        stats.lines_scanned,
        stats.files_skipped,
        stats.files_lossy,
        stats.matches,
        stats.scan_duration.as_secs_f64()
    );
}

// Colour unless stdout is redirected or NO_COLOR is set
fn terminal_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
