mod cli;
mod infra;
mod routes;
mod server;

use property_listings::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
