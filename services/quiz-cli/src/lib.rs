mod cli;
mod commands;
mod infra;

use kedge_quiz::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
