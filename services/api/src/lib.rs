mod check;
mod cli;
mod infra;
mod routes;
mod server;

use placement_policy::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
