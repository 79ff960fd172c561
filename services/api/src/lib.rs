mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use tutorlink::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
