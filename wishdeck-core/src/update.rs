/// Typed partial updates for stacks and cards.
///
/// Mutation entry points take one of these structured records instead
/// of a loose field map, so an update can only name fields that exist
/// and can never clear a field the model requires.
use crate::cover::Cover;
use crate::types::{Card, RecordId, Stack};

/// Partial update for a stack. Unset fields are left untouched.
///
/// There is no way to clear the cover: omitting it retains the
/// existing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackUpdate {
    pub name: Option<String>,
    pub cover: Option<Cover>,
}

impl StackUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cover(mut self, cover: Cover) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cover.is_none()
    }

    /// Apply the set fields to a stack in place.
    pub fn apply_to(&self, stack: &mut Stack) {
        if let Some(name) = &self.name {
            stack.name = name.clone();
        }
        if let Some(cover) = &self.cover {
            stack.cover = cover.clone();
        }
    }
}

/// Partial update for a card. Unset fields are left untouched.
///
/// The description is the only clearable field; `clear_description`
/// distinguishes "set to nothing" from "not mentioned".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub cover: Option<String>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub stack_id: Option<RecordId>,
}

impl CardUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Move the card to another stack.
    pub fn with_stack(mut self, stack_id: RecordId) -> Self {
        self.stack_id = Some(stack_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cover.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.stack_id.is_none()
    }

    /// Apply the set fields to a card in place.
    pub fn apply_to(&self, card: &mut Card) {
        if let Some(cover) = &self.cover {
            card.cover = cover.clone();
        }
        if let Some(name) = &self.name {
            card.name = name.clone();
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        if let Some(stack_id) = &self.stack_id {
            card.stack_id = stack_id.clone();
        }
    }
}
