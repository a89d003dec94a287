mod cli;
mod demo;
mod render;

use internship_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
