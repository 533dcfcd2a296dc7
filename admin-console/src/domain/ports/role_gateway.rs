//! Port for the `/roles` collection of the remote collaborator.

use async_trait::async_trait;

use super::RemoteError;
use crate::domain::{EntityId, NewRole, Role};

/// Remote persistence of roles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleGateway: Send + Sync {
    /// Fetch every role in server order.
    async fn list_roles(&self) -> Result<Vec<Role>, RemoteError>;

    /// Create a role; the backend assigns the identifier.
    async fn create_role(&self, role: &NewRole) -> Result<Role, RemoteError>;

    /// Replace the role stored under `id` with the full record.
    async fn update_role(&self, id: &EntityId, role: &Role) -> Result<Role, RemoteError>;

    /// Remove the role stored under `id`.
    async fn delete_role(&self, id: &EntityId) -> Result<(), RemoteError>;
}
