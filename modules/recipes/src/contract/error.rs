use thiserror::Error;

/// Errors that are safe to expose to other crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipesError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Internal error")]
    Internal,
}

impl RecipesError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for RecipesError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        let message = domain_error.to_string();
        match domain_error {
            RecipeNotFound { .. }
            | UserNotFound { .. }
            | TagNotFound { .. }
            | IngredientNotFound { .. }
            | UnknownTags { .. }
            | UnknownIngredients { .. } => Self::not_found(message),
            DuplicateIngredient { .. }
            | AlreadyLinked { .. }
            | AlreadySubscribed { .. }
            | AlreadyExists { .. } => Self::conflict(message),
            EmptyList { .. }
            | DuplicateTag { .. }
            | InvalidAmount { .. }
            | InvalidImage { .. }
            | NotLinked { .. }
            | NotSubscribed { .. }
            | SelfSubscription
            | Validation { .. } => Self::invalid_request(message),
            NotAuthor { .. } => Self::forbidden(message),
            UnknownActor { .. } => Self::unauthorized(message),
            Database { .. } => Self::internal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::model::RelationKind;

    #[test]
    fn domain_errors_map_to_contract_taxonomy() {
        let cases = [
            (DomainError::recipe_not_found(1), "NotFound"),
            (DomainError::UnknownTags { ids: vec![9] }, "NotFound"),
            (DomainError::DuplicateIngredient { id: 2 }, "Conflict"),
            (DomainError::already_linked(RelationKind::Cart, 3), "Conflict"),
            (DomainError::already_linked(RelationKind::Subscription, 3), "Conflict"),
            (DomainError::not_linked(RelationKind::Favorite, 3), "InvalidRequest"),
            (DomainError::SelfSubscription, "InvalidRequest"),
            (DomainError::empty_list("tags"), "InvalidRequest"),
            (DomainError::NotAuthor { id: 1 }, "Forbidden"),
            (DomainError::UnknownActor { id: 1 }, "Unauthorized"),
            (DomainError::database("boom"), "Internal"),
        ];
        for (domain, expected) in cases {
            let mapped = RecipesError::from(domain);
            let kind = match mapped {
                RecipesError::NotFound { .. } => "NotFound",
                RecipesError::Conflict { .. } => "Conflict",
                RecipesError::InvalidRequest { .. } => "InvalidRequest",
                RecipesError::Forbidden { .. } => "Forbidden",
                RecipesError::Unauthorized { .. } => "Unauthorized",
                RecipesError::Internal => "Internal",
            };
            assert_eq!(kind, expected);
        }
    }

    #[test]
    fn database_details_are_not_exposed() {
        let mapped = RecipesError::from(DomainError::database("password=secret"));
        assert_eq!(mapped, RecipesError::Internal);
        assert!(!mapped.to_string().contains("secret"));
    }
}
