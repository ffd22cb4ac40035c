use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage WhatsApp-originated file attachments.
#[derive(Parser, Debug)]
#[command(name = "wafiles", version, about)]
pub struct Cli {
    /// Backend API URL.
    #[arg(long, env = "API_URL", global = true)]
    pub api_url: Option<String>,

    /// File holding the bearer credential.
    #[arg(long, env = "WAFILES_CREDENTIAL_PATH", global = true)]
    pub credential_path: Option<PathBuf>,

    /// File remembering the held session id. Defaults to `session` next to
    /// the credential.
    #[arg(long, env = "WAFILES_SESSION_PATH", global = true)]
    pub session_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version information.
    Version,

    /// Sign in and store the issued credential.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "WAFILES_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored credential.
    Logout,

    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "WAFILES_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the signed-in account.
    Whoami,

    /// Check whether the backend is reachable.
    Ping,

    /// File records.
    Files {
        #[command(subcommand)]
        command: FilesCommand,
    },

    /// WhatsApp session lifecycle.
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Ask the backend to download new WhatsApp attachments.
    Download,

    /// Push a recorded file to object storage.
    Upload {
        /// Id of the file record.
        file_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// List file records.
    List {
        /// Only files for this phone number.
        #[arg(long)]
        phone: Option<String>,
    },

    /// Create a file record.
    Create {
        #[arg(long)]
        filename: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        size: Option<i64>,
        #[arg(long)]
        mime_type: Option<String>,
    },

    /// Reconcile missing uploads, then list the refreshed records.
    Sync,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Start a session and print its pairing QR payload.
    Create,

    /// Poll a session's status.
    Status { id: Option<String> },

    /// Close a session.
    Close { id: Option<String> },
}
