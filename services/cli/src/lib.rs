mod cli;
mod commands;

use uptrack::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
