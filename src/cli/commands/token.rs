use clap::Subcommand;
use serde_json::json;

use crate::auth;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint an identity token signed with the provider secret")]
    Issue {
        #[arg(help = "Email address for the identity claims")]
        email: String,

        #[arg(long, help = "Display name")]
        name: Option<String>,

        #[arg(long, default_value_t = 24, help = "Token validity in hours")]
        hours: i64,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { email, name, hours } => {
            let token = auth::mint_identity_token(email.clone(), name, hours)?;

            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    &format!("Identity token for {}", email),
                    Some(json!({ "token": token })),
                ),
                // Bare token on stdout so it pipes straight into curl
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
    }
}
