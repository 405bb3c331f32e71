use crate::cli::utils::{connect, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = connect(config()).await?;
    DatabaseManager::migrate(&pool).await?;
    output_success(&output_format, "Migrations applied", None)
}
