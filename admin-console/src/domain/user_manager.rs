//! User entity manager.
//!
//! Owns the local user list, the role list offered for selection, the
//! creation and edit drafts, and per-field validation messages.
//!
//! State policy per operation:
//! - load replaces both lists with the backend's and sorts users by name;
//! - add appends the created record returned by the backend, then re-sorts;
//! - save re-fetches after the update instead of splicing locally;
//! - delete splices the local list once the backend confirms.
//!
//! A remote failure on any mutation records a notification and leaves the
//! lists as they were.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{RemoteError, RoleGateway, UserGateway};
use crate::domain::{
    ConsoleError, EntityId, FieldErrors, Notification, Role, User, UserDraft, compare_names,
};

/// State owner for the user screen.
pub struct UserManager<U, R> {
    users_api: Arc<U>,
    roles_api: Arc<R>,
    users: Vec<User>,
    roles: Vec<Role>,
    new_user: UserDraft,
    edit_user: Option<UserDraft>,
    errors: FieldErrors,
    notification: Option<Notification>,
}

impl<U, R> UserManager<U, R> {
    /// Create an empty manager backed by the given gateways.
    pub fn new(users_api: Arc<U>, roles_api: Arc<R>) -> Self {
        Self {
            users_api,
            roles_api,
            users: Vec::new(),
            roles: Vec::new(),
            new_user: UserDraft::default(),
            edit_user: None,
            errors: FieldErrors::new(),
            notification: None,
        }
    }

    /// Users in display order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Roles as last loaded from the backend.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Role names offered by the role picker, in server order.
    pub fn role_options(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|role| role.name.as_str())
    }

    /// Whether `name` matches a loaded role.
    pub fn is_known_role(&self, name: &str) -> bool {
        self.role_options().any(|option| option == name)
    }

    /// Creation draft.
    pub fn new_user(&self) -> &UserDraft {
        &self.new_user
    }

    /// Mutable creation draft for field edits.
    pub fn new_user_mut(&mut self) -> &mut UserDraft {
        &mut self.new_user
    }

    /// Apply a keystroke to the creation draft's name; see
    /// [`UserDraft::set_name`].
    pub fn set_new_name(&mut self, value: &str) -> bool {
        self.new_user.set_name(value)
    }

    /// Edit draft, present while the edit surface is open.
    pub fn edit_user(&self) -> Option<&UserDraft> {
        self.edit_user.as_ref()
    }

    /// Mutable edit draft for field edits.
    pub fn edit_user_mut(&mut self) -> Option<&mut UserDraft> {
        self.edit_user.as_mut()
    }

    /// Apply a keystroke to the edit draft's name. Returns `false` when the
    /// input is dropped or no edit is open.
    pub fn set_edit_name(&mut self, value: &str) -> bool {
        self.edit_user
            .as_mut()
            .is_some_and(|draft| draft.set_name(value))
    }

    /// Whether the edit surface is open.
    pub fn is_editing(&self) -> bool {
        self.edit_user.is_some()
    }

    /// Field messages from the most recent rejected submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Pending remote-failure notice.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Hide the pending notice.
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Copy `user` into the edit draft and open the edit surface.
    pub fn open_edit(&mut self, user: &User) {
        self.edit_user = Some(UserDraft::from_user(user));
    }

    /// Close the edit surface, discarding the draft.
    pub fn cancel_edit(&mut self) {
        self.edit_user = None;
    }

    /// Users whose name, email, or role contains `query`, ignoring case.
    ///
    /// An empty query returns every user. The local list is not modified.
    pub fn search(&self, query: &str) -> Vec<&User> {
        let needle = query.to_lowercase();
        self.users
            .iter()
            .filter(|user| {
                [&user.name, &user.email, &user.role]
                    .into_iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    fn sort_users(&mut self) {
        self.users
            .sort_by(|left, right| compare_names(&left.name, &right.name));
    }

    fn remote_failure(&mut self, operation: &'static str, error: RemoteError) -> ConsoleError {
        warn!(operation, kind = error.kind(), error = %error, "remote call failed");
        self.notification = Some(Notification::error(format!("{operation} failed: {error}")));
        ConsoleError::Remote(error)
    }
}

impl<U, R> UserManager<U, R>
where
    U: UserGateway,
    R: RoleGateway,
{
    /// Fetch users and roles, replacing local state.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Remote`] when either fetch fails; local state is
    /// left as it was.
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        let users = self.users_api.list_users().await?;
        let roles = self.roles_api.list_roles().await?;
        self.users = users;
        self.roles = roles;
        self.sort_users();
        Ok(())
    }

    /// Submit the creation draft.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidUser`] without calling the backend when
    /// validation fails, or [`ConsoleError::Remote`] when creation fails.
    pub async fn add(&mut self) -> Result<User, ConsoleError> {
        let payload = match self.new_user.to_new_user() {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(ConsoleError::InvalidUser(errors));
            }
        };

        let result = self.users_api.create_user(&payload).await;
        let created = match result {
            Ok(created) => created,
            Err(error) => return Err(self.remote_failure("create user", error)),
        };
        info!(id = %created.id, name = %created.name, "user created");

        self.users.push(created.clone());
        self.sort_users();
        self.new_user = UserDraft::default();
        self.errors.clear();
        Ok(created)
    }

    /// Submit the edit draft as a full replacement record.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NothingToSave`] when no edit is open,
    /// [`ConsoleError::InvalidUser`] without calling the backend when
    /// validation fails, or [`ConsoleError::Remote`] when the update or the
    /// follow-up fetch fails.
    pub async fn save(&mut self) -> Result<(), ConsoleError> {
        let Some(draft) = self.edit_user.as_ref() else {
            return Err(ConsoleError::NothingToSave);
        };
        let record = match draft.to_user() {
            Ok(Some(record)) => record,
            Ok(None) => return Err(ConsoleError::NothingToSave),
            Err(errors) => {
                self.errors = errors.clone();
                return Err(ConsoleError::InvalidUser(errors));
            }
        };

        let result = self.users_api.update_user(&record.id, &record).await;
        if let Err(error) = result {
            return Err(self.remote_failure("update user", error));
        }
        info!(id = %record.id, "user updated");

        self.edit_user = None;
        self.errors.clear();
        let reloaded = self.load().await;
        match reloaded {
            Ok(()) => Ok(()),
            Err(ConsoleError::Remote(error)) => Err(self.remote_failure("reload users", error)),
            Err(other) => Err(other),
        }
    }

    /// Delete the user stored under `id`.
    ///
    /// Exactly one remote delete is issued; on success the matching local
    /// entry is removed without a re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Remote`] when the backend call fails.
    pub async fn delete(&mut self, id: &EntityId) -> Result<(), ConsoleError> {
        let result = self.users_api.delete_user(id).await;
        if let Err(error) = result {
            return Err(self.remote_failure("delete user", error));
        }
        info!(%id, "user deleted");
        if let Some(position) = self.users.iter().position(|user| &user.id == id) {
            self.users.remove(position);
        }
        Ok(())
    }
}
