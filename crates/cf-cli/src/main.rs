//! cofound - Cofound session CLI
//!
//! Drives the device-local session core against the platform API:
//! registering, logging in, switching between linked accounts, and
//! inspecting session state.
//!
//! # Examples
//!
//! ```bash
//! # Log in and make the account active on this device
//! cofound login --email founder@startup.io --password hunter22
//!
//! # See every account linked on this device
//! cofound accounts --pretty
//!
//! # Switch to another linked account
//! cofound switch 7f0c1a9e-account-id
//! ```

mod cli;
mod commands;
mod error;
mod logger;
mod output;

use crate::cli::Cli;
use crate::commands::Commands;
use crate::error::{CliError, Result as CliResult};

use cf_api::{HttpApiClient, ProfileUpdate};
use cf_channel::NullChannel;
use cf_config::ClientConfig;
use cf_core::{AccountRole, UserId};
use cf_session::SessionManager;
use cf_store::{FileStore, KeyValueStore, MemoryStore};

use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let pretty = cli.pretty;

    match run(cli).await {
        Ok(value) => {
            let rendered = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };
            match rendered {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: failed to render output: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<Value> {
    let mut config = ClientConfig::load()?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.logging.file.clone().map(Into::into),
        config.logging.colored,
    )?;
    config.log_summary();

    let store: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(config.data_dir()?)?)
    };

    let api = Arc::new(HttpApiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?);
    let channel = Arc::new(NullChannel::new());

    let manager = SessionManager::new(api.clone(), api, store, channel);
    manager.initialize().await;

    let result = dispatch(&manager, cli.command).await;

    manager.dispose().await;
    result
}

async fn dispatch(manager: &Arc<SessionManager>, command: Commands) -> CliResult<Value> {
    match command {
        Commands::Register {
            email,
            password,
            role,
        } => {
            let role = AccountRole::from_str(&role)?;
            let outcome = manager.register(&email, &password, role).await?;
            let session = manager.snapshot();
            Ok(json!({
                "session": output::session_value(&session),
                "verificationRequired": outcome.verification_required,
            }))
        }

        Commands::Login { email, password } => {
            manager.login(&email, &password).await?;
            Ok(output::session_value(&manager.snapshot()))
        }

        Commands::Logout { everywhere } => {
            if everywhere {
                manager.sign_out_everywhere().await;
            } else {
                manager.sign_out().await;
            }
            Ok(output::session_value(&manager.snapshot()))
        }

        Commands::Accounts => Ok(output::accounts_value(&manager.snapshot())),

        Commands::Switch { account_id } => {
            manager.switch_to(&UserId::from(account_id.as_str())).await?;
            Ok(output::session_value(&manager.snapshot()))
        }

        Commands::Whoami => {
            let session = manager.snapshot();
            match session.active_user {
                Some(ref user) => Ok(output::user_value(user)),
                None => Err(CliError::Session {
                    message: "You are not signed in.".to_string(),
                }),
            }
        }

        Commands::Unlink { account_id } => {
            manager
                .remove_linked_account(&UserId::from(account_id.as_str()))
                .await?;
            Ok(output::accounts_value(&manager.snapshot()))
        }

        Commands::UpdateProfile {
            display_name,
            bio,
            location,
            company_name,
            firm_name,
            website,
            skills,
        } => {
            let update = ProfileUpdate {
                display_name,
                bio,
                location,
                company_name,
                firm_name,
                website,
                skills: skills.map(|s| s.split(',').map(|v| v.trim().to_string()).collect()),
                onboarding_complete: None,
            };
            let user = manager.update_active_user(&update).await?;
            Ok(output::user_value(&user))
        }

        Commands::SwitchRole { role } => {
            let role = AccountRole::from_str(&role)?;
            let outcome = manager.switch_role(role).await?;
            let session = manager.snapshot();
            Ok(json!({
                "session": output::session_value(&session),
                "verificationRequired": outcome.verification_required,
            }))
        }
    }
}
