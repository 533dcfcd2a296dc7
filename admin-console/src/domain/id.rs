//! Opaque server-assigned entity identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Identifier issued by the remote collaborator.
///
/// The backend may hand out numeric or string identifiers. The value keeps
/// the JSON shape it arrived in so updates echo it back unchanged.
///
/// ## Invariants
/// - Equality and hashing compare the rendered form, so `Number(7)` equals
///   `Text("7")`. Identifiers typed at a prompt then match either shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Integer identifier, as issued by json-server style backends.
    Number(i64),
    /// Any other identifier.
    Text(String),
}

impl EntityId {
    /// Parse user-supplied text, preferring the numeric shape.
    ///
    /// Text becomes a number only when it renders back unchanged, so `007`
    /// and `+5` stay textual and address the record they name.
    ///
    /// # Examples
    /// ```
    /// use admin_console::domain::EntityId;
    ///
    /// assert_eq!(EntityId::parse("42"), EntityId::Number(42));
    /// assert_eq!(EntityId::parse("a1"), EntityId::Text("a1".to_owned()));
    /// assert_eq!(EntityId::parse("007"), EntityId::Text("007".to_owned()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(number) if number.to_string() == trimmed => Self::Number(number),
            _ => Self::Text(trimmed.to_owned()),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}
