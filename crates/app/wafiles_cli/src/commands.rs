//! Command execution.

use std::sync::Arc;

use wafiles_core::ApiClient;
use wafiles_core::config::{ClientConfig, sibling_session_path};
use wafiles_core::credentials::FileCredentialStore;
use wafiles_core::models::auth::RegisterData;
use wafiles_core::models::file::{FileCreateData, FileRecord};
use wafiles_core::transport::SIGN_IN_LOCATION;

use crate::Result;
use crate::cli::{Cli, Commands, FilesCommand, SessionCommand};
use crate::held_session;
use crate::navigator::TerminalNavigator;

/// View each command stands in for.
fn location(command: &Commands) -> &'static str {
    match command {
        Commands::Login { .. } | Commands::Register { .. } => SIGN_IN_LOCATION,
        Commands::Session { .. } | Commands::Download => "/whatsapp",
        _ => "/files",
    }
}

fn build_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.api_url = wafiles_core::config::normalize_base_url(url);
    }
    if let Some(path) = &cli.credential_path {
        config.credential_path = path.clone();
        config.session_path = sibling_session_path(path);
    }
    if let Some(path) = &cli.session_path {
        config.session_path = path.clone();
    }
    config
}

/// Client seeded with the session id held by an earlier invocation.
fn build_client(cli: &Cli, config: &ClientConfig) -> ApiClient {
    log::debug!("backend {}", config.api_url);

    let credentials = Arc::new(FileCredentialStore::new(&config.credential_path));
    let navigator = Arc::new(TerminalNavigator::at(location(&cli.command)));
    let api = ApiClient::new(config, credentials, navigator);
    api.sessions
        .set_current_session_id(held_session::load(&config.session_path));
    api
}

pub async fn run(cli: Cli) -> Result<()> {
    if let Commands::Version = cli.command {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = build_config(&cli);
    let api = build_client(&cli, &config);

    match cli.command {
        Commands::Version => {}
        Commands::Login { email, password } => {
            api.auth.sign_in(&email, &password).await?;
            log::info!("Signed in as {email}");
        }
        Commands::Logout => {
            api.auth.sign_out()?;
            log::info!("Signed out");
        }
        Commands::Register {
            email,
            username,
            password,
        } => {
            let user = api
                .auth
                .register(&RegisterData {
                    email,
                    username,
                    password,
                })
                .await?;
            log::info!("Registered {} ({})", user.username, user.id);
        }
        Commands::Whoami => {
            let user = api.auth.me().await?;
            println!("{} <{}>", user.username, user.email);
        }
        Commands::Ping => {
            if api.sessions.check_availability().await {
                println!("available");
            } else {
                println!("unavailable");
            }
        }
        Commands::Files { command } => run_files(&api, command).await?,
        Commands::Session { command } => {
            run_session(&api, command).await?;
            held_session::save(
                &config.session_path,
                api.sessions.current_session_id().as_deref(),
            )?;
        }
        Commands::Download => {
            let files = api.sessions.download_files().await?;
            if files.is_empty() {
                log::info!("Nothing to download");
            }
            for file in &files {
                println!(
                    "{}\t{}\t{}",
                    file.filename.as_deref().unwrap_or("-"),
                    file.phone_number.as_deref().unwrap_or("-"),
                    file.media_type.as_deref().unwrap_or("-"),
                );
            }
        }
        Commands::Upload { file_id } => {
            let outcome = api.storage.upload(&file_id).await?;
            if outcome.success {
                println!("{}", outcome.storage_path.unwrap_or_default());
            } else {
                return Err(crate::Error::Custom(format!(
                    "upload failed: {}",
                    outcome.error.unwrap_or_else(|| "unknown error".into())
                )));
            }
        }
    }

    Ok(())
}

async fn run_files(api: &ApiClient, command: FilesCommand) -> Result<()> {
    let store = api.files_store();
    match command {
        FilesCommand::List { phone } => {
            store.fetch(phone.as_deref()).await?;
            print_files(&store.snapshot().files);
        }
        FilesCommand::Create {
            filename,
            phone,
            size,
            mime_type,
        } => {
            let record = store
                .create(&FileCreateData {
                    filename,
                    phone_number: phone,
                    size,
                    mime_type,
                })
                .await?;
            print_files(std::slice::from_ref(&record));
        }
        FilesCommand::Sync => {
            let result = store.sync().await?;
            log::info!(
                "{} ({} synced, {} missing)",
                result.message,
                result.files_synced,
                result.total_missing
            );
            store.fetch(None).await?;
            print_files(&store.snapshot().files);
        }
    }
    Ok(())
}

async fn run_session(api: &ApiClient, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Create => {
            let session = api.sessions.create_session().await?;
            println!("{}\t{}", session.id, session.status);
            if let Some(qr) = session.qr_data {
                println!("{qr}");
            }
        }
        SessionCommand::Status { id } => {
            let report = api.sessions.get_status(id.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        SessionCommand::Close { id } => {
            let ack = api.sessions.close_session(id.as_deref()).await?;
            log::info!("{}", ack.message);
        }
    }
    Ok(())
}

fn print_files(files: &[FileRecord]) {
    for file in files {
        println!(
            "{}\t{}\t{}\t{}",
            file.id,
            file.phone_number,
            file.filename,
            if file.uploaded { "uploaded" } else { "pending" }
        );
    }
}
