//! Errors returned by entity manager operations.
//!
//! Validation failures never reach the remote collaborator; remote failures
//! leave local state untouched. Managers record both in their own state for
//! display and also hand them back to the caller.

use thiserror::Error;

use super::ports::RemoteError;
use super::{FieldErrors, RoleFormError};

/// Failure of a user or role manager operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// The user draft failed field validation.
    #[error("user draft is invalid: {}", describe_fields(.0))]
    InvalidUser(FieldErrors),
    /// The role draft failed form validation.
    #[error("{0}")]
    InvalidRole(#[from] RoleFormError),
    /// Save was requested without an open edit draft.
    #[error("no entity is open for editing")]
    NothingToSave,
    /// The remote collaborator rejected or failed the call.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

fn describe_fields(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
