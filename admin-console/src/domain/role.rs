//! Role data model, form draft, and permission text encoding.
//!
//! Permissions travel as a JSON array. Only the form layer encodes them as
//! comma-joined text: [`join_permissions`] renders a list for editing and
//! [`split_permissions`] reads edited text back.

use serde::{Deserialize, Deserializer, Serialize};

use super::EntityId;

/// Separator used when rendering permissions as editable text.
pub const PERMISSION_SEPARATOR: &str = ", ";

/// Split comma-joined permission text, trimming each segment.
///
/// Empty segments are kept so callers can reject them.
///
/// # Examples
/// ```
/// use admin_console::domain::split_permissions;
///
/// assert_eq!(split_permissions("read, ,write"), vec!["read", "", "write"]);
/// ```
pub fn split_permissions(text: &str) -> Vec<String> {
    text.split(',').map(|segment| segment.trim().to_owned()).collect()
}

/// Render permissions as editable text.
pub fn join_permissions(permissions: &[String]) -> String {
    permissions.join(PERMISSION_SEPARATOR)
}

/// Form-level rejection of a role draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoleFormError {
    /// Name or permissions text is blank.
    #[error("Both Role Name and Permissions are required.")]
    MissingFields,
    /// A comma-separated segment is blank after trimming.
    #[error("Permissions must not contain empty values.")]
    EmptyPermission,
}

/// Role record as stored by the remote collaborator.
///
/// ## Invariants
/// - `id` is assigned by the backend.
/// - Decoding accepts `permissions` as an array or as comma-joined text; text
///   is split and blank segments are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_permissions")]
    pub permissions: Vec<String>,
}

/// Creation payload for `POST /roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRole {
    pub name: String,
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PermissionsWire {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_permissions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PermissionsWire::deserialize(deserializer)? {
        PermissionsWire::List(permissions) => permissions,
        PermissionsWire::Joined(text) => split_permissions(&text)
            .into_iter()
            .filter(|permission| !permission.is_empty())
            .collect(),
    })
}

/// In-progress role form state with permissions held as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    /// Set when the draft edits an existing role.
    pub id: Option<EntityId>,
    pub name: String,
    pub permissions: String,
}

impl RoleDraft {
    /// Copy a stored role into an edit draft, joining its permissions.
    pub fn from_role(role: &Role) -> Self {
        Self {
            id: Some(role.id.clone()),
            name: role.name.clone(),
            permissions: join_permissions(&role.permissions),
        }
    }

    /// Validate the draft and return its normalised permissions.
    ///
    /// # Errors
    ///
    /// Returns [`RoleFormError::MissingFields`] when the name or permissions
    /// text is blank, and [`RoleFormError::EmptyPermission`] when any
    /// comma-separated segment is blank.
    pub fn parse_permissions(&self) -> Result<Vec<String>, RoleFormError> {
        if self.name.trim().is_empty() || self.permissions.trim().is_empty() {
            return Err(RoleFormError::MissingFields);
        }
        let permissions = split_permissions(&self.permissions);
        if permissions.iter().any(String::is_empty) {
            return Err(RoleFormError::EmptyPermission);
        }
        Ok(permissions)
    }

    /// Validate and convert into a creation payload.
    ///
    /// # Errors
    ///
    /// See [`RoleDraft::parse_permissions`].
    pub fn to_new_role(&self) -> Result<NewRole, RoleFormError> {
        let permissions = self.parse_permissions()?;
        Ok(NewRole {
            name: self.name.clone(),
            permissions,
        })
    }

    /// Validate and convert into the full record sent on update.
    ///
    /// Returns `Ok(None)` when the draft has no identifier.
    ///
    /// # Errors
    ///
    /// See [`RoleDraft::parse_permissions`].
    pub fn to_role(&self) -> Result<Option<Role>, RoleFormError> {
        let permissions = self.parse_permissions()?;
        Ok(self.id.clone().map(|id| Role {
            id,
            name: self.name.clone(),
            permissions,
        }))
    }
}
