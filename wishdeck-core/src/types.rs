use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cover::Cover;

/// Prefix reserved for locally generated placeholder identifiers.
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Opaque record identifier, shared by stacks and cards.
///
/// Authoritative identifiers are assigned by the remote service;
/// temporary identifiers carry the reserved `temp-` prefix and only
/// ever exist in the optimistic window between a local mutation and
/// its remote confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create a new authoritative identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a new temporary identifier.
    pub fn temp() -> Self {
        Self(format!("{}{}", TEMP_ID_PREFIX, Uuid::new_v4()))
    }

    /// Create from an existing string.
    pub fn from_str(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn is_temp(&self) -> bool {
        self.0.starts_with(TEMP_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current time as milliseconds since the epoch.
///
/// Creation timestamps are insertion markers: ordering only relies on
/// them being non-decreasing, not on wall-clock accuracy.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A named collection of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub id: RecordId,
    pub name: String,
    /// Required by the data model; a stack without a cover is
    /// unrepresentable, one is synthesized at creation if not given.
    pub cover: Cover,
    pub created_at: i64,
}

impl Stack {
    /// Build an optimistic stack with a fresh temporary identifier.
    pub fn optimistic(name: impl Into<String>, cover: Cover) -> Self {
        Self {
            id: RecordId::temp(),
            name: name.into(),
            cover,
            created_at: now_millis(),
        }
    }
}

/// A single entry belonging to exactly one stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: RecordId,
    pub cover: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stack_id: RecordId,
    pub created_at: i64,
}

impl Card {
    /// Build an optimistic card with a fresh temporary identifier.
    pub fn optimistic(
        cover: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        stack_id: RecordId,
    ) -> Self {
        Self {
            id: RecordId::temp(),
            cover: cover.into(),
            name: name.into(),
            description,
            stack_id,
            created_at: now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_uniqueness() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_temp_id_prefix() {
        let temp = RecordId::temp();
        assert!(temp.is_temp());
        assert!(temp.as_str().starts_with("temp-"));

        let real = RecordId::generate();
        assert!(!real.is_temp());
    }

    #[test]
    fn test_optimistic_stack() {
        let stack = Stack::optimistic("Books", Cover::random_gradient());
        assert!(stack.id.is_temp());
        assert_eq!(stack.name, "Books");
    }

    #[test]
    fn test_optimistic_card() {
        let stack_id = RecordId::generate();
        let card = Card::optimistic("img.png", "Foo", None, stack_id.clone());
        assert!(card.id.is_temp());
        assert_eq!(card.stack_id, stack_id);
        assert!(card.description.is_none());
    }

    #[test]
    fn test_card_json_round_trip() {
        let card = Card::optimistic("img.png", "Foo", Some("bar".into()), RecordId::generate());
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
