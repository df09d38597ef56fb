use std::fmt;

use crate::BacklinkError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityId {
    Item(String),
    Property(String),
    Lexeme(String),
    Other(String),
}

impl EntityId {
    /// Returns the ID of the entity.
    pub const fn id(&self) -> &String {
        match self {
            EntityId::Item(id) => id,
            EntityId::Property(id) => id,
            EntityId::Lexeme(id) => id,
            EntityId::Other(id) => id,
        }
    }

    /// Returns the entity type of the entity.
    pub const fn entity_type(&self) -> &str {
        match self {
            EntityId::Item(_) => "item",
            EntityId::Property(_) => "property",
            EntityId::Lexeme(_) => "lexeme",
            EntityId::Other(_) => "entity",
        }
    }

    /// Creates a new entity ID from a string, based on its leading letter.
    /// IDs from other entity types (e.g. "M" for media info) are kept as `Other`.
    /// # Errors
    /// Returns `EmptyEntityId` if the ID is empty.
    pub fn new<S: Into<String>>(id: S) -> Result<EntityId, BacklinkError> {
        let id = id.into();
        match id.chars().next() {
            Some('Q') => Ok(EntityId::Item(id)),
            Some('P') => Ok(EntityId::Property(id)),
            Some('L') => Ok(EntityId::Lexeme(id)),
            Some(_) => Ok(EntityId::Other(id)),
            None => Err(BacklinkError::EmptyEntityId),
        }
    }

    /// Returns a new entity ID for an item.
    pub fn item<S: Into<String>>(s: S) -> EntityId {
        EntityId::Item(s.into())
    }
}

impl From<EntityId> for String {
    fn from(val: EntityId) -> Self {
        match val {
            EntityId::Item(id)
            | EntityId::Property(id)
            | EntityId::Lexeme(id)
            | EntityId::Other(id) => id,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
