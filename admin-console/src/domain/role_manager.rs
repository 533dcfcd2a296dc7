//! Role entity manager.
//!
//! Unlike the user manager, rejections land in one shared error slot paired
//! with a dismissible notification rather than per-field messages. A
//! `touched` flag drives the inline "required" hints and a `submitting`
//! flag covers the span of each remote call.
//!
//! State policy matches the user manager: add appends the backend's record,
//! save re-fetches, delete splices after confirmation, and remote failures
//! leave the list untouched.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{RemoteError, RoleGateway};
use crate::domain::{ConsoleError, EntityId, Notification, Role, RoleDraft, RoleFormError};

/// Hint shown under a blank role name once the form is touched.
pub const NAME_HINT: &str = "Role Name is required.";
/// Hint shown under blank permissions once the form is touched.
pub const PERMISSIONS_HINT: &str = "Permissions are required.";

/// State owner for the role screen.
pub struct RoleManager<R> {
    api: Arc<R>,
    roles: Vec<Role>,
    new_role: RoleDraft,
    edit_role: Option<RoleDraft>,
    error: Option<String>,
    notification: Option<Notification>,
    touched: bool,
    submitting: bool,
}

impl<R> RoleManager<R> {
    /// Create an empty manager backed by `api`.
    pub fn new(api: Arc<R>) -> Self {
        Self {
            api,
            roles: Vec::new(),
            new_role: RoleDraft::default(),
            edit_role: None,
            error: None,
            notification: None,
            touched: false,
            submitting: false,
        }
    }

    /// Roles in server order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn new_role(&self) -> &RoleDraft {
        &self.new_role
    }

    pub fn new_role_mut(&mut self) -> &mut RoleDraft {
        &mut self.new_role
    }

    /// Edit draft, present while the edit surface is open.
    pub fn edit_role(&self) -> Option<&RoleDraft> {
        self.edit_role.as_ref()
    }

    pub fn edit_role_mut(&mut self) -> Option<&mut RoleDraft> {
        self.edit_role.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_role.is_some()
    }

    /// Last rejection or remote failure message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Hide the notification. The error text stays available.
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Whether a submit has been attempted since the last success.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Whether a submit is awaiting the backend.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Inline hint for the creation draft's name field.
    pub fn name_hint(&self) -> Option<&'static str> {
        (self.touched && self.new_role.name.trim().is_empty()).then_some(NAME_HINT)
    }

    /// Inline hint for the creation draft's permissions field.
    pub fn permissions_hint(&self) -> Option<&'static str> {
        (self.touched && self.new_role.permissions.trim().is_empty()).then_some(PERMISSIONS_HINT)
    }

    /// Inline hint for the edit draft's permissions field.
    pub fn edit_permissions_hint(&self) -> Option<&'static str> {
        let blank = self
            .edit_role
            .as_ref()
            .is_some_and(|draft| draft.permissions.trim().is_empty());
        (self.touched && blank).then_some(PERMISSIONS_HINT)
    }

    /// Copy `role` into the edit draft and open the edit surface.
    pub fn open_edit(&mut self, role: &Role) {
        self.edit_role = Some(RoleDraft::from_role(role));
    }

    /// Close the edit surface, discarding the draft.
    pub fn cancel_edit(&mut self) {
        self.edit_role = None;
    }

    fn begin_submit(&mut self) {
        self.touched = true;
        self.submitting = true;
    }

    fn finish_submit(&mut self) {
        self.touched = false;
        self.submitting = false;
    }

    fn reject(&mut self, error: RoleFormError) -> ConsoleError {
        self.raise(error.to_string());
        ConsoleError::InvalidRole(error)
    }

    fn remote_failure(&mut self, operation: &'static str, error: RemoteError) -> ConsoleError {
        warn!(operation, kind = error.kind(), error = %error, "remote call failed");
        self.raise(format!("{operation} failed: {error}"));
        ConsoleError::Remote(error)
    }

    fn raise(&mut self, message: String) {
        self.notification = Some(Notification::error(message.clone()));
        self.error = Some(message);
        self.submitting = false;
    }
}

impl<R: RoleGateway> RoleManager<R> {
    /// Fetch roles, replacing local state.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Remote`] when the fetch fails.
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.roles = self.api.list_roles().await?;
        Ok(())
    }

    /// Submit the creation draft.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidRole`] without calling the backend when
    /// the draft is rejected, or [`ConsoleError::Remote`] when creation fails.
    pub async fn add(&mut self) -> Result<Role, ConsoleError> {
        self.begin_submit();
        let payload = match self.new_role.to_new_role() {
            Ok(payload) => payload,
            Err(error) => return Err(self.reject(error)),
        };

        let result = self.api.create_role(&payload).await;
        let created = match result {
            Ok(created) => created,
            Err(error) => return Err(self.remote_failure("create role", error)),
        };
        info!(id = %created.id, name = %created.name, "role created");

        self.roles.push(created.clone());
        self.new_role = RoleDraft::default();
        self.finish_submit();
        Ok(created)
    }

    /// Submit the edit draft as a full replacement record.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NothingToSave`] when no edit is open,
    /// [`ConsoleError::InvalidRole`] without calling the backend when the draft
    /// is rejected, or [`ConsoleError::Remote`] when the update or the
    /// follow-up fetch fails.
    pub async fn save(&mut self) -> Result<(), ConsoleError> {
        let Some(draft) = self.edit_role.as_ref() else {
            return Err(ConsoleError::NothingToSave);
        };
        let outcome = draft.to_role();
        self.begin_submit();
        let record = match outcome {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.submitting = false;
                return Err(ConsoleError::NothingToSave);
            }
            Err(error) => return Err(self.reject(error)),
        };

        let result = self.api.update_role(&record.id, &record).await;
        if let Err(error) = result {
            return Err(self.remote_failure("update role", error));
        }
        info!(id = %record.id, "role updated");

        self.edit_role = None;
        let reloaded = self.load().await;
        match reloaded {
            Ok(()) => {
                self.finish_submit();
                Ok(())
            }
            Err(ConsoleError::Remote(error)) => {
                self.touched = false;
                Err(self.remote_failure("reload roles", error))
            }
            Err(other) => Err(other),
        }
    }

    /// Delete the role stored under `id`.
    ///
    /// Users naming this role keep their reference.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Remote`] when the backend call fails.
    pub async fn delete(&mut self, id: &EntityId) -> Result<(), ConsoleError> {
        let result = self.api.delete_role(id).await;
        if let Err(error) = result {
            return Err(self.remote_failure("delete role", error));
        }
        info!(%id, "role deleted");
        if let Some(position) = self.roles.iter().position(|role| &role.id == id) {
            self.roles.remove(position);
        }
        Ok(())
    }
}
