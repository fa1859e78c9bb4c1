use std::process::ExitCode;

use dotenvy::dotenv;
use tokio::runtime::Runtime;
use tracing::{error, info};
use uuid::Uuid;

const APP: &str = "service_market";

/// Worker count from `[server].worker_threads`, else `TOKIO_WORKER_THREADS`.
fn worker_threads() -> Option<usize> {
    let configured = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok()),
    };
    configured.filter(|n| *n > 0)
}

fn build_runtime(threads: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = threads {
        builder.worker_threads(n);
    }
    builder.build()
}

fn main() -> ExitCode {
    // .env before logging so RUST_LOG and LOG_FORMAT apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(app = APP, event = "panic", %instance, message = %info, "unhandled panic");
    }));

    let threads = worker_threads();
    let rt = match build_runtime(threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(app = APP, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        app = APP,
        event = "start",
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = threads.unwrap_or_default(),
        "catalog server starting"
    );

    match rt.block_on(server::run()) {
        Ok(()) => {
            info!(app = APP, event = "stop", %instance, "catalog server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(app = APP, event = "run_failed", error = %e, "catalog server exited with error");
            ExitCode::FAILURE
        }
    }
}
