//! Reset the database at `DB_PATH` to the fixture data.

use std::process::ExitCode;

use butterfly_api::{logging, seed, Config};
use tracing::error;

fn main() -> ExitCode {
    logging::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!("Environment misconfigured: {err}");
            return ExitCode::FAILURE;
        }
    };

    match seed::reset_database(&config.db_path) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Failed to initialize database: {err}");
            ExitCode::FAILURE
        }
    }
}
