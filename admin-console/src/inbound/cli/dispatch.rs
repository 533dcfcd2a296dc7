//! Map parsed commands onto entity manager operations.

use std::io::{self, Write};
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use super::render;
use super::{Command, NewUserArgs, RoleCommand, UserChanges, UserCommand};
use crate::domain::ports::{RoleGateway, UserGateway};
use crate::domain::{ConsoleError, EntityId, RoleManager, UserDraft, UserManager};

/// Failure of a shell command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("no user with id {id}")]
    UnknownUser { id: EntityId },
    #[error("no role with id {id}")]
    UnknownRole { id: EntityId },
}

/// Execute `command`, writing human-readable results to `out`.
///
/// # Errors
///
/// Returns [`CliError::Console`] when a manager operation fails. Field
/// validation messages are written to `out` before the error is returned.
pub async fn run<U, R, W>(
    command: Command,
    users_api: Arc<U>,
    roles_api: Arc<R>,
    out: &mut W,
) -> Result<(), CliError>
where
    U: UserGateway,
    R: RoleGateway,
    W: Write,
{
    match command {
        Command::Users(command) => {
            let mut manager = UserManager::new(users_api, roles_api);
            run_users(command, &mut manager, out).await
        }
        Command::Roles(command) => {
            let mut manager = RoleManager::new(roles_api);
            run_roles(command, &mut manager, out).await
        }
    }
}

async fn run_users<U, R, W>(
    command: UserCommand,
    manager: &mut UserManager<U, R>,
    out: &mut W,
) -> Result<(), CliError>
where
    U: UserGateway,
    R: RoleGateway,
    W: Write,
{
    match command {
        UserCommand::List { search } => {
            manager.load().await?;
            let matches = manager.search(search.as_deref().unwrap_or_default());
            render::users_table(out, &matches)?;
        }
        UserCommand::Add(args) => {
            manager.load().await?;
            fill_new_user(manager.new_user_mut(), args);
            warn_unknown_role(manager, manager.new_user());
            let result = manager.add().await;
            let created = report_field_errors(result, out)?;
            writeln!(out, "created user {}: {}", created.id, created.name)?;
        }
        UserCommand::Update { id, changes } => {
            let id = EntityId::parse(&id);
            manager.load().await?;
            let Some(user) = manager.users().iter().find(|user| user.id == id).cloned() else {
                return Err(CliError::UnknownUser { id });
            };
            manager.open_edit(&user);
            if let Some(draft) = manager.edit_user_mut() {
                apply_user_changes(draft, changes);
            }
            if let Some(draft) = manager.edit_user() {
                warn_unknown_role(manager, draft);
            }
            let result = manager.save().await;
            report_field_errors(result, out)?;
            writeln!(out, "updated user {id}")?;
        }
        UserCommand::Delete { id } => {
            let id = EntityId::parse(&id);
            manager.delete(&id).await?;
            writeln!(out, "deleted user {id}")?;
        }
    }
    Ok(())
}

async fn run_roles<R, W>(
    command: RoleCommand,
    manager: &mut RoleManager<R>,
    out: &mut W,
) -> Result<(), CliError>
where
    R: RoleGateway,
    W: Write,
{
    match command {
        RoleCommand::List => {
            manager.load().await?;
            render::roles_table(out, manager.roles())?;
        }
        RoleCommand::Add { name, permissions } => {
            let draft = manager.new_role_mut();
            draft.name = name;
            draft.permissions = permissions;
            let created = manager.add().await?;
            writeln!(out, "created role {}: {}", created.id, created.name)?;
        }
        RoleCommand::Update {
            id,
            name,
            permissions,
        } => {
            let id = EntityId::parse(&id);
            manager.load().await?;
            let Some(role) = manager.roles().iter().find(|role| role.id == id).cloned() else {
                return Err(CliError::UnknownRole { id });
            };
            manager.open_edit(&role);
            if let Some(draft) = manager.edit_role_mut() {
                if let Some(name) = name {
                    draft.name = name;
                }
                draft.permissions = permissions;
            }
            manager.save().await?;
            writeln!(out, "updated role {id}")?;
        }
        RoleCommand::Delete { id } => {
            let id = EntityId::parse(&id);
            manager.delete(&id).await?;
            writeln!(out, "deleted role {id}")?;
        }
    }
    Ok(())
}

// Names are assigned whole rather than through the keystroke filter so that
// submit-time validation reports the offending characters.
fn fill_new_user(draft: &mut UserDraft, args: NewUserArgs) {
    draft.name = args.name;
    draft.email = args.email;
    draft.role = args.role;
    draft.status = args.status;
}

fn apply_user_changes(draft: &mut UserDraft, changes: UserChanges) {
    let UserChanges {
        name,
        email,
        role,
        status,
    } = changes;
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(email) = email {
        draft.email = email;
    }
    if let Some(role) = role {
        draft.role = role;
    }
    if let Some(status) = status {
        draft.status = status;
    }
}

fn warn_unknown_role<U, R>(manager: &UserManager<U, R>, draft: &UserDraft) {
    let role = draft.role.trim();
    if !role.is_empty() && !manager.is_known_role(role) {
        warn!(role, "user references a role that is not defined");
    }
}

fn report_field_errors<T, W: Write>(
    result: Result<T, ConsoleError>,
    out: &mut W,
) -> Result<T, CliError> {
    match result {
        Ok(value) => Ok(value),
        Err(ConsoleError::InvalidUser(errors)) => {
            render::field_errors(out, &errors)?;
            Err(CliError::Console(ConsoleError::InvalidUser(errors)))
        }
        Err(other) => Err(other.into()),
    }
}
