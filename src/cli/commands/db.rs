use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use serde_json::{json, Value};
use sqlx::Executor;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::manager::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Apply the schema file to DATABASE_URL")]
    Init {
        #[arg(long, default_value = "sql/schema.sql", help = "Path to the schema file")]
        schema: PathBuf,
    },

    #[command(about = "Check a running server's /health endpoint")]
    Health {
        #[arg(help = "Server base URL (defaults to the configured local port)")]
        url: Option<String>,
    },
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Init { schema } => {
            let sql = std::fs::read_to_string(&schema)
                .with_context(|| format!("failed to read {}", schema.display()))?;

            let pool = DatabaseManager::pool().await?;
            // Plain-text execution; the schema file holds multiple statements.
            pool.execute(sql.as_str())
                .await
                .context("failed to apply schema")?;

            output_success(
                &output_format,
                &format!("Applied {}", schema.display()),
                None,
            )
        }
        DbCommands::Health { url } => {
            let base = url
                .unwrap_or_else(|| format!("http://localhost:{}", config::config().server.port));
            let health_url = format!("{}/health", base.trim_end_matches('/'));

            let response = reqwest::get(&health_url)
                .await
                .with_context(|| format!("failed to reach {}", health_url))?;
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);

            if status.is_success() {
                output_success(
                    &output_format,
                    &format!("{} is healthy", base),
                    Some(json!({ "status": status.as_u16(), "body": body })),
                )
            } else {
                output_error(&output_format, &format!("{} reported {}", base, status))?;
                anyhow::bail!("health check failed")
            }
        }
    }
}
