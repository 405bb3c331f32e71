use anyhow::{bail, Context};
use clap::Args;
use serde_json::json;

use crate::auth::hash_password_blocking;
use crate::cli::utils::{connect, output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::services::user_service::{is_plausible_email, normalize_email};
use crate::services::{NewUser, ServiceError, UserService};
use crate::types::Role;

#[derive(Debug, Args)]
pub struct CreateAdminArgs {
    #[arg(long, help = "Login email for the new administrator")]
    pub email: String,

    #[arg(long, help = "Display name")]
    pub name: String,

    #[arg(long, help = "Initial password (at least 8 characters)")]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct ApproveMentorArgs {
    #[arg(long, help = "Email the mentor registered with")]
    pub email: String,
}

pub async fn create_admin(args: CreateAdminArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let email = normalize_email(&args.email);
    if !is_plausible_email(&email) {
        bail!("'{}' is not a valid email address", args.email);
    }
    if args.password.chars().count() < 8 {
        bail!("password must be at least 8 characters");
    }
    if args.name.trim().is_empty() {
        bail!("name must not be empty");
    }

    let pool = connect(config()).await?;
    let password_hash = hash_password_blocking(args.password)
        .await
        .context("failed to hash password")?;

    let created = UserService::new(pool)
        .create(NewUser {
            email,
            password_hash,
            name: args.name.trim().to_string(),
            role: Role::Admin,
            is_approved: true,
        })
        .await;

    match created {
        Ok(user) => output_success(
            &output_format,
            &format!("Administrator {} created", user.email),
            Some(json!({ "user": user })),
        ),
        Err(ServiceError::Conflict(message)) => {
            output_error(&output_format, &message, Some("CONFLICT"))?;
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn approve_mentor(args: ApproveMentorArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = connect(config()).await?;
    let email = normalize_email(&args.email);

    match UserService::new(pool).approve_by_email(&email).await {
        Ok(user) => output_success(
            &output_format,
            &format!("Mentor {} approved", user.email),
            Some(json!({ "user": user })),
        ),
        Err(ServiceError::NotFound(message)) => {
            output_error(&output_format, &message, Some("NOT_FOUND"))?;
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
