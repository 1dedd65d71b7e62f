use thiserror::Error;

use crate::domain::model::RelationKind;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Recipe not found: {id}")]
    RecipeNotFound { id: i32 },

    #[error("User not found: {id}")]
    UserNotFound { id: i32 },

    #[error("Tag not found: {id}")]
    TagNotFound { id: i32 },

    #[error("Ingredient not found: {id}")]
    IngredientNotFound { id: i32 },

    #[error("Unknown tag ids: {ids:?}")]
    UnknownTags { ids: Vec<i32> },

    #[error("Unknown ingredient ids: {ids:?}")]
    UnknownIngredients { ids: Vec<i32> },

    #[error("Field '{field}' must be a non-empty list")]
    EmptyList { field: &'static str },

    #[error("Tag {id} is listed more than once")]
    DuplicateTag { id: i32 },

    #[error("Ingredient {id} is listed more than once")]
    DuplicateIngredient { id: i32 },

    #[error("Invalid amount '{amount}' for ingredient {id}: expected an integer >= {min}")]
    InvalidAmount { id: i32, amount: String, min: i32 },

    #[error("Invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("Recipe {id} already in {kind}")]
    AlreadyLinked { kind: RelationKind, id: i32 },

    #[error("Recipe {id} is not in {kind}")]
    NotLinked { kind: RelationKind, id: i32 },

    #[error("Already subscribed to user {id}")]
    AlreadySubscribed { id: i32 },

    #[error("Not subscribed to user {id}")]
    NotSubscribed { id: i32 },

    #[error("Cannot subscribe to yourself")]
    SelfSubscription,

    #[error("Only the author may modify recipe {id}")]
    NotAuthor { id: i32 },

    #[error("Unknown acting user: {id}")]
    UnknownActor { id: i32 },

    #[error("{field} '{value}' is already taken")]
    AlreadyExists { field: &'static str, value: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn recipe_not_found(id: i32) -> Self {
        Self::RecipeNotFound { id }
    }

    pub fn user_not_found(id: i32) -> Self {
        Self::UserNotFound { id }
    }

    pub fn tag_not_found(id: i32) -> Self {
        Self::TagNotFound { id }
    }

    pub fn ingredient_not_found(id: i32) -> Self {
        Self::IngredientNotFound { id }
    }

    pub fn empty_list(field: &'static str) -> Self {
        Self::EmptyList { field }
    }

    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    pub fn already_exists(field: &'static str, value: impl Into<String>) -> Self {
        Self::AlreadyExists {
            field,
            value: value.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Duplicate relation pair.
    pub fn already_linked(kind: RelationKind, id: i32) -> Self {
        match kind {
            RelationKind::Subscription => Self::AlreadySubscribed { id },
            _ => Self::AlreadyLinked { kind, id },
        }
    }

    /// Removal of a pair that does not exist.
    pub fn not_linked(kind: RelationKind, id: i32) -> Self {
        match kind {
            RelationKind::Subscription => Self::NotSubscribed { id },
            _ => Self::NotLinked { kind, id },
        }
    }

    /// Missing relation target (a recipe, or a user for subscriptions).
    pub fn target_not_found(kind: RelationKind, id: i32) -> Self {
        match kind {
            RelationKind::Subscription => Self::UserNotFound { id },
            _ => Self::RecipeNotFound { id },
        }
    }
}
