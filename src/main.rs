use std::process::ExitCode;
use std::sync::Arc;

use butterfly_api::{logging, ButterflyService, Config, FileBackend};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!("Environment misconfigured: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(path = %config.db_path.display(), "Opening database");
    let service = match ButterflyService::open(FileBackend::new(&config.db_path)) {
        Ok(service) => Arc::new(service),
        Err(err) => {
            error!("Failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("Butterfly API started at http://localhost:{}", config.port);
    if let Err(err) = butterfly_api::serve(service, &config.bind_address()).await {
        error!("Server error: {err}");
        return ExitCode::FAILURE;
    }

    info!("Server shut down");
    ExitCode::SUCCESS
}
