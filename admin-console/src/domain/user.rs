//! User data model, form draft, and field validation.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::EntityId;

/// Message shown when the name field is blank.
pub const NAME_REQUIRED: &str = "Name is required.";
/// Message shown when the name contains anything but letters and spaces.
pub const NAME_INVALID_CHARACTERS: &str = "Name can only contain letters and spaces.";
/// Message shown when the email is blank or malformed.
pub const EMAIL_INVALID: &str = "Valid email is required.";
/// Message shown when no role is selected.
pub const ROLE_REQUIRED: &str = "Role is required.";
/// Message shown when the status is not one of [`UserStatus`].
pub const STATUS_INVALID: &str = "Valid status is required.";

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static NAME_INPUT_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("user regex {pattern} failed to compile: {error}"))
    })
}

fn name_regex() -> &'static Regex {
    compile(&NAME_RE, r"^[A-Za-z\s]+$")
}

fn name_input_regex() -> &'static Regex {
    compile(&NAME_INPUT_RE, r"^[A-Za-z\s]*$")
}

fn email_regex() -> &'static Regex {
    // Unanchored: any `x@y.z` run inside the value satisfies the shape check.
    compile(&EMAIL_RE, r"\S+@\S+\.\S+")
}

/// Whether a name field may take `value` as its next text.
///
/// Shells call this on every keystroke and drop input that fails it. The
/// empty string passes so the field can be cleared.
///
/// # Examples
/// ```
/// use admin_console::domain::accepts_name_input;
///
/// assert!(accepts_name_input("Ann Lee"));
/// assert!(accepts_name_input(""));
/// assert!(!accepts_name_input("Ann1"));
/// ```
pub fn accepts_name_input(value: &str) -> bool {
    name_input_regex().is_match(value)
}

/// Account status of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    /// The account is in use.
    #[default]
    Active,
    /// The account is disabled.
    Inactive,
}

impl UserStatus {
    /// Wire and display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text is not a [`UserStatus`] label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user status: {0}")]
pub struct UnknownStatus(String);

impl FromStr for UserStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// User record as stored by the remote collaborator.
///
/// ## Invariants
/// - `id` is assigned by the backend; the console never invents one.
/// - `role` names a role by its `name`, not its identifier. Nothing checks
///   that the role still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
}

/// Creation payload for `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
}

/// Form fields that carry their own validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    Email,
    Role,
    Status,
}

impl UserField {
    /// Lower-case field key as rendered next to the input.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation messages keyed by the failing field. Empty means valid.
pub type FieldErrors = BTreeMap<UserField, String>;

/// In-progress user form state.
///
/// Every field is free text, so a draft can hold values the typed
/// [`User`] cannot, such as an unknown status. [`validate_user`] decides
/// whether the draft may be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// Set when the draft edits an existing user.
    pub id: Option<EntityId>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            role: String::new(),
            status: UserStatus::default().as_str().to_owned(),
        }
    }
}

impl UserDraft {
    /// Copy a stored user into an edit draft.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id.clone()),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            status: user.status.as_str().to_owned(),
        }
    }

    /// Replace the name if the new text passes [`accepts_name_input`].
    ///
    /// Returns `false`, leaving the name untouched, when the input is
    /// dropped.
    pub fn set_name(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if !accepts_name_input(&value) {
            return false;
        }
        self.name = value;
        true
    }

    /// Validate and convert into a creation payload.
    ///
    /// # Errors
    ///
    /// Returns the field messages from [`validate_user`] when any rule fails.
    pub fn to_new_user(&self) -> Result<NewUser, FieldErrors> {
        let status = self.checked_status()?;
        Ok(NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            status,
        })
    }

    /// Validate and convert into the full record sent on update.
    ///
    /// Returns `Ok(None)` when the draft has no identifier.
    ///
    /// # Errors
    ///
    /// Returns the field messages from [`validate_user`] when any rule fails.
    pub fn to_user(&self) -> Result<Option<User>, FieldErrors> {
        let status = self.checked_status()?;
        Ok(self.id.clone().map(|id| User {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            status,
        }))
    }

    fn checked_status(&self) -> Result<UserStatus, FieldErrors> {
        let errors = validate_user(self);
        match self.status.parse() {
            Ok(status) if errors.is_empty() => Ok(status),
            _ => Err(errors),
        }
    }
}

/// Order two user names the way a locale collator at tertiary strength does.
///
/// Letters compare case-insensitively first. Names differing only in case
/// put the lower-case letter first at the first differing position, so
/// `"bob"` sorts between `"Amy"` and `"Zed"`, and `"ann"` before `"Ann"`.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use admin_console::domain::compare_names;
///
/// assert_eq!(compare_names("bob", "Zed"), Ordering::Less);
/// assert_eq!(compare_names("ann", "Ann"), Ordering::Less);
/// ```
pub fn compare_names(left: &str, right: &str) -> Ordering {
    let folded = |name: &str| name.chars().flat_map(char::to_lowercase).collect::<String>();
    folded(left)
        .cmp(&folded(right))
        .then_with(|| {
            left.chars()
                .map(char::is_uppercase)
                .cmp(right.chars().map(char::is_uppercase))
        })
        .then_with(|| left.cmp(right))
}

/// Check every field of `draft`, returning one message per failing field.
///
/// # Examples
/// ```
/// use admin_console::domain::{UserDraft, UserField, validate_user};
///
/// let draft = UserDraft {
///     name: "Ann Lee".to_owned(),
///     email: "not-an-email".to_owned(),
///     role: "Admin".to_owned(),
///     ..UserDraft::default()
/// };
/// let errors = validate_user(&draft);
/// assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![UserField::Email]);
/// ```
pub fn validate_user(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.name.trim().is_empty() {
        errors.insert(UserField::Name, NAME_REQUIRED.to_owned());
    } else if !name_regex().is_match(&draft.name) {
        errors.insert(UserField::Name, NAME_INVALID_CHARACTERS.to_owned());
    }

    if draft.email.trim().is_empty() || !email_regex().is_match(&draft.email) {
        errors.insert(UserField::Email, EMAIL_INVALID.to_owned());
    }

    if draft.role.trim().is_empty() {
        errors.insert(UserField::Role, ROLE_REQUIRED.to_owned());
    }

    if draft.status.parse::<UserStatus>().is_err() {
        errors.insert(UserField::Status, STATUS_INVALID.to_owned());
    }

    errors
}
