//! Domain primitives, drafts, and entity managers.
//!
//! Purpose: define the user and role entities exchanged with the remote
//! collaborator, the form drafts edited locally, and the managers that keep
//! the two in step.
//!
//! Public surface:
//! - User, NewUser, UserDraft, UserStatus: user entity and form state.
//! - Role, NewRole, RoleDraft: role entity and form state.
//! - UserManager, RoleManager: state owners for each entity.
//! - ConsoleError: error returned by manager operations.

pub mod error;
pub mod id;
pub mod notification;
pub mod ports;
pub mod role;
pub mod role_manager;
pub mod user;
pub mod user_manager;

pub use self::error::ConsoleError;
pub use self::id::EntityId;
pub use self::notification::Notification;
pub use self::role::{NewRole, Role, RoleDraft, RoleFormError, join_permissions, split_permissions};
pub use self::role_manager::RoleManager;
pub use self::user::{
    FieldErrors, NewUser, User, UserDraft, UserField, UserStatus, accepts_name_input,
    compare_names, validate_user,
};
pub use self::user_manager::UserManager;
