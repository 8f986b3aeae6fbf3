use clap::Parser;
use limitless_standings::app::{run_formats, run_tours};
use limitless_standings::cli::{Args, Mode};
use limitless_standings::config::Config;
use limitless_standings::error::AppError;
use limitless_standings::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The credential check happens here, before any request is built
    let loaded = Config::load().await;

    let (log_file_path, _guard) =
        setup_logging(loaded.as_ref().ok(), args.log_file.as_deref(), args.debug).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    let mut config = loaded.inspect_err(|e| tracing::error!("Startup aborted: {e}"))?;

    config.apply_cli_overrides(args.max_concurrency, args.timeout);
    config
        .validate()
        .inspect_err(|e| tracing::error!("Startup aborted: {e}"))?;

    match args.mode {
        Mode::Tours { format } => {
            let report = run_tours(&config, &format).await?;
            if args.fail_on_error && report.has_failures() {
                return Err(AppError::IncompleteResults {
                    failed: report.aggregate.summary().failed,
                    total: report.aggregate.len(),
                });
            }
        }
        Mode::Formats { game } => run_formats(&config, game.as_deref()).await?,
        Mode::Config => config.display(),
    }

    Ok(())
}
