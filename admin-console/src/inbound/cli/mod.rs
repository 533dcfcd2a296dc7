//! Terminal shell for the admin console.
//!
//! Each invocation runs one gesture against a fresh manager: load, mutate,
//! print. Parsing lives here; [`run`] maps commands onto manager calls and
//! [`render`] formats the resulting state.

use clap::{Args, Parser, Subcommand};

mod dispatch;
pub mod render;

pub use dispatch::{CliError, run};

/// `admin-console` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "admin-console",
    about = "Manage users and roles held by the admin REST backend",
    version
)]
pub struct Cli {
    /// Backend base URL. Overrides `ADMIN_CONSOLE_API_URL`.
    #[arg(long = "api-url", value_name = "url", global = true)]
    pub api_url: Option<String>,
    /// Emit logs as JSON lines on stderr.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level entity selector.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Work with user accounts.
    #[command(subcommand)]
    Users(UserCommand),
    /// Work with roles.
    #[command(subcommand)]
    Roles(RoleCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// List users sorted by name.
    List {
        /// Keep users whose name, email, or role contains this text.
        #[arg(long, value_name = "query")]
        search: Option<String>,
    },
    /// Create a user.
    Add(NewUserArgs),
    /// Replace fields of an existing user. Omitted flags keep their value.
    Update {
        /// Identifier of the user to edit.
        id: String,
        #[command(flatten)]
        changes: UserChanges,
    },
    /// Delete a user.
    Delete {
        /// Identifier of the user to delete.
        id: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct NewUserArgs {
    #[arg(long, value_name = "name")]
    pub name: String,
    #[arg(long, value_name = "email")]
    pub email: String,
    /// Name of an existing role.
    #[arg(long, value_name = "role")]
    pub role: String,
    /// `Active` or `Inactive`.
    #[arg(long, value_name = "status", default_value = "Active")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct UserChanges {
    #[arg(long, value_name = "name")]
    pub name: Option<String>,
    #[arg(long, value_name = "email")]
    pub email: Option<String>,
    #[arg(long, value_name = "role")]
    pub role: Option<String>,
    #[arg(long, value_name = "status")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RoleCommand {
    /// List roles in server order.
    List,
    /// Create a role.
    Add {
        #[arg(long, value_name = "name")]
        name: String,
        /// Comma-separated permissions, e.g. `read, write`.
        #[arg(long, value_name = "text")]
        permissions: String,
    },
    /// Rename a role or replace its permissions.
    Update {
        /// Identifier of the role to edit.
        id: String,
        #[arg(long, value_name = "name")]
        name: Option<String>,
        /// Comma-separated permissions replacing the current list.
        #[arg(long, value_name = "text")]
        permissions: String,
    },
    /// Delete a role. Users referencing it keep the name.
    Delete {
        /// Identifier of the role to delete.
        id: String,
    },
}
