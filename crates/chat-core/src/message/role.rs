use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The party a message is attributed to.
///
/// Roles are carried as strings on the wire. Anything other than the three
/// well-known names is kept verbatim in [`Role::Custom`] rather than
/// rejected, so conversations built for other chat APIs survive a round
/// trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// The entity managing the conversation, typically used for prompts.
    System,
    /// The human interacting with the assistant.
    User,
    /// The chatbot.
    Assistant,
    Custom(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Custom(name) => name,
        }
    }

    /// True for the zero value, an empty custom role.
    pub fn is_unset(&self) -> bool {
        matches!(self, Role::Custom(name) if name.is_empty())
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Custom(String::new())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            other => Role::Custom(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "system" | "user" | "assistant" => Role::from(s.as_str()),
            _ => Role::Custom(s),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Role::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_parse() {
        assert_eq!(Role::from("system"), Role::System);
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::from("assistant".to_string()), Role::Assistant);
    }

    #[test]
    fn test_unknown_role_passes_through() {
        let role = Role::from("narrator");
        assert_eq!(role, Role::Custom("narrator".into()));
        assert_eq!(role.as_str(), "narrator");
        assert!(!role.is_unset());
    }

    #[test]
    fn test_default_role_is_unset() {
        assert!(Role::default().is_unset());
        assert_eq!(Role::default().as_str(), "");
    }

    #[test]
    fn test_role_serializes_as_string() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"tool\"").unwrap();
        assert_eq!(role, Role::Custom("tool".into()));
    }
}
