//! Port for the `/users` collection of the remote collaborator.

use async_trait::async_trait;

use super::RemoteError;
use crate::domain::{EntityId, NewUser, User};

/// Remote persistence of users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Fetch every user.
    async fn list_users(&self) -> Result<Vec<User>, RemoteError>;

    /// Create a user; the backend assigns the identifier.
    async fn create_user(&self, user: &NewUser) -> Result<User, RemoteError>;

    /// Replace the user stored under `id` with the full record.
    async fn update_user(&self, id: &EntityId, user: &User) -> Result<User, RemoteError>;

    /// Remove the user stored under `id`.
    async fn delete_user(&self, id: &EntityId) -> Result<(), RemoteError>;
}
