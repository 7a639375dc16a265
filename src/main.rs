use dock_core::{DockConfig, DockManager, DockService};
use std::error::Error;
use std::sync::Arc;

fn log_error_fallback(message: &str) {
    if tracing::dispatcher::has_been_set() {
        tracing::error!(event = "bootstrap_error", message = message);
        return;
    }

    eprintln!("{message}");
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = DockConfig::resolve()?;
    let logging_guard = dock_logging::init_logging(&config.data_dir)?;
    tracing::info!(
        event = "logging_initialized",
        level = logging_guard.level(),
        log_dir = %logging_guard.log_dir().to_string_lossy()
    );
    tracing::info!(
        event = "dock_config_resolved",
        scratch_dir = %config.scratch_dir.display(),
        docked_store = %config.docked_store_path.display(),
        application_dirs = config.application_dirs().len()
    );

    let service = DockService::new(Arc::new(DockManager::with_defaults(&config)));
    match service.restore_docked_apps().await {
        Ok(restored) => tracing::info!(
            event = "dock_session_restored",
            restored,
            docked = service.manager().docked_apps().len()
        ),
        Err(error) => tracing::warn!(
            event = "dock_session_restore_failed",
            error_code = error.code.as_str(),
            error = error.to_string()
        ),
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!(event = "dock_shutdown_requested");
    service.save_docked_apps().await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        log_error_fallback(&format!("dockd failed: {error}"));
        std::process::exit(1);
    }
}
