use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.foodgram.dev/{}", code))
        .with_code(code)
        .with_instance(instance);

    // Attach the current span id when a subscriber is recording spans
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    let detail = e.to_string();
    match e {
        DomainError::RecipeNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "RECIPES_NOT_FOUND",
            "Recipe not found",
            detail,
            instance,
        ),
        DomainError::UserNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "RECIPES_USER_NOT_FOUND",
            "User not found",
            detail,
            instance,
        ),
        DomainError::TagNotFound { .. } | DomainError::UnknownTags { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "RECIPES_TAG_NOT_FOUND",
            "Tag not found",
            detail,
            instance,
        ),
        DomainError::IngredientNotFound { .. } | DomainError::UnknownIngredients { .. } => {
            from_parts(
                StatusCode::NOT_FOUND,
                "RECIPES_INGREDIENT_NOT_FOUND",
                "Ingredient not found",
                detail,
                instance,
            )
        }
        DomainError::DuplicateIngredient { .. } => from_parts(
            StatusCode::CONFLICT,
            "RECIPES_DUPLICATE_INGREDIENT",
            "Duplicate ingredient",
            detail,
            instance,
        ),
        DomainError::AlreadyLinked { .. } | DomainError::AlreadySubscribed { .. } => from_parts(
            StatusCode::CONFLICT,
            "RECIPES_ALREADY_LINKED",
            "Already added",
            detail,
            instance,
        ),
        DomainError::AlreadyExists { .. } => from_parts(
            StatusCode::CONFLICT,
            "RECIPES_ALREADY_EXISTS",
            "Already exists",
            detail,
            instance,
        ),
        DomainError::NotLinked { .. }
        | DomainError::NotSubscribed { .. }
        | DomainError::SelfSubscription => from_parts(
            StatusCode::BAD_REQUEST,
            "RECIPES_INVALID_RELATION",
            "Invalid request",
            detail,
            instance,
        ),
        DomainError::EmptyList { .. }
        | DomainError::DuplicateTag { .. }
        | DomainError::InvalidAmount { .. }
        | DomainError::InvalidImage { .. }
        | DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "RECIPES_VALIDATION",
            "Validation error",
            detail,
            instance,
        ),
        DomainError::NotAuthor { .. } => from_parts(
            StatusCode::FORBIDDEN,
            "RECIPES_FORBIDDEN",
            "Forbidden",
            detail,
            instance,
        ),
        DomainError::UnknownActor { .. } => from_parts(
            StatusCode::UNAUTHORIZED,
            "RECIPES_UNAUTHORIZED",
            "Unauthorized",
            detail,
            instance,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}
