pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "mentorbridge-admin")]
#[command(about = "MentorBridge operator commands")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "Create an administrator account")]
    CreateAdmin(commands::accounts::CreateAdminArgs),

    #[command(about = "Approve a registered mentor by email")]
    ApproveMentor(commands::accounts::ApproveMentorArgs),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::CreateAdmin(args) => commands::accounts::create_admin(args, output_format).await,
        Commands::ApproveMentor(args) => commands::accounts::approve_mentor(args, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_admin() {
        let cli = Cli::try_parse_from([
            "mentorbridge-admin",
            "create-admin",
            "--email",
            "root@example.com",
            "--name",
            "Root",
            "--password",
            "correct horse",
            "--json",
        ])
        .unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::CreateAdmin(args) => assert_eq!(args.email, "root@example.com"),
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn approve_mentor_requires_email() {
        assert!(Cli::try_parse_from(["mentorbridge-admin", "approve-mentor"]).is_err());
        assert!(Cli::try_parse_from(["mentorbridge-admin", "approve-mentor", "--email", "m@example.com"]).is_ok());
    }
}
