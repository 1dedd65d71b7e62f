use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Extension,
};
use tracing::{error, info};

use crate::api::rest::auth::{CurrentUser, Viewer};
use crate::api::rest::dto::{
    parse_recipe_query, IngredientDto, IngredientsQuery, PageDto, PageQuery, RecipeDto,
    RecipeListQuery, RecipeSummaryDto, RecipeWriteReq, RecipesLimitQuery, SubscriptionDto,
    SubscriptionsQuery, TagDto, UserDto,
};
use crate::api::rest::error::{from_parts, map_domain_error};
use crate::api::rest::extract::{JsonBody, QueryParams};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::contract::model::{PageRequest, ShoppingList};
use crate::domain::service::Service;

type Svc = Extension<Arc<Service>>;

// --- catalog ---

/// List all tags
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses((status = 200, body = [TagDto]))
)]
pub async fn list_tags(
    Extension(svc): Svc,
    uri: Uri,
) -> Result<Json<Vec<TagDto>>, ProblemResponse> {
    match svc.list_tags().await {
        Ok(tags) => Ok(Json(tags.into_iter().map(TagDto::from).collect())),
        Err(e) => {
            error!("Failed to list tags: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    tag = "tags",
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 200, body = TagDto),
        (status = 404, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_tag(
    Extension(svc): Svc,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<Json<TagDto>, ProblemResponse> {
    match svc.get_tag(id).await {
        Ok(tag) => Ok(Json(tag.into())),
        Err(e) => {
            error!("Failed to get tag {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List ingredients, optionally filtered by name prefix
#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(IngredientsQuery),
    responses((status = 200, body = [IngredientDto]))
)]
pub async fn list_ingredients(
    Extension(svc): Svc,
    QueryParams(query): QueryParams<IngredientsQuery>,
    uri: Uri,
) -> Result<Json<Vec<IngredientDto>>, ProblemResponse> {
    match svc.list_ingredients(query.name.as_deref()).await {
        Ok(items) => Ok(Json(items.into_iter().map(IngredientDto::from).collect())),
        Err(e) => {
            error!("Failed to list ingredients: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(("id" = i32, Path, description = "Ingredient id")),
    responses(
        (status = 200, body = IngredientDto),
        (status = 404, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_ingredient(
    Extension(svc): Svc,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<Json<IngredientDto>, ProblemResponse> {
    match svc.get_ingredient(id).await {
        Ok(item) => Ok(Json(item.into())),
        Err(e) => {
            error!("Failed to get ingredient {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

// --- recipes ---

/// List recipes, newest first
#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(RecipeListQuery),
    responses(
        (status = 200, body = PageDto<RecipeDto>),
        (status = 400, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_recipes(
    Extension(svc): Svc,
    Viewer(viewer): Viewer,
    RawQuery(raw): RawQuery,
    uri: Uri,
) -> Result<Json<PageDto<RecipeDto>>, ProblemResponse> {
    let (filter, page) = parse_recipe_query(raw.as_deref()).map_err(|detail| {
        from_parts(
            StatusCode::BAD_REQUEST,
            "RECIPES_VALIDATION",
            "Validation error",
            detail,
            uri.path(),
        )
    })?;

    match svc.list_recipes(viewer, filter, page).await {
        Ok(page) => Ok(Json(page.into())),
        Err(e) => {
            error!("Failed to list recipes: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Publish a recipe
#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeWriteReq,
    responses(
        (status = 201, body = RecipeDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 401, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json"),
        (status = 409, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_recipe(
    uri: Uri,
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    JsonBody(req_body): JsonBody<RecipeWriteReq>,
) -> Result<(StatusCode, Json<RecipeDto>), ProblemResponse> {
    info!("Creating recipe '{}' for user {}", req_body.name, user);

    match svc.create_recipe(user, req_body.into()).await {
        Ok(recipe) => Ok((StatusCode::CREATED, Json(recipe.into()))),
        Err(e) => {
            error!("Failed to create recipe: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses(
        (status = 200, body = RecipeDto),
        (status = 404, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_recipe(
    Extension(svc): Svc,
    Viewer(viewer): Viewer,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<Json<RecipeDto>, ProblemResponse> {
    match svc.get_recipe(viewer, id).await {
        Ok(recipe) => Ok(Json(recipe.into())),
        Err(e) => {
            error!("Failed to get recipe {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Replace a recipe's fields and composition; author only
#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    request_body = RecipeWriteReq,
    responses(
        (status = 200, body = RecipeDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 403, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json"),
        (status = 409, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn update_recipe(
    uri: Uri,
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    JsonBody(req_body): JsonBody<RecipeWriteReq>,
) -> Result<Json<RecipeDto>, ProblemResponse> {
    info!("Updating recipe {} by user {}", id, user);

    match svc.update_recipe(user, id, req_body.into()).await {
        Ok(recipe) => Ok(Json(recipe.into())),
        Err(e) => {
            error!("Failed to update recipe {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses(
        (status = 204),
        (status = 403, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_recipe(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting recipe {} by user {}", id, user);

    match svc.delete_recipe(user, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete recipe {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

// --- relationship sets ---

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses(
        (status = 201, body = RecipeSummaryDto),
        (status = 404, body = Problem, content_type = "application/problem+json"),
        (status = 409, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn add_favorite(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<(StatusCode, Json<RecipeSummaryDto>), ProblemResponse> {
    match svc.add_favorite(user, id).await {
        Ok(summary) => Ok((StatusCode::CREATED, Json(summary.into()))),
        Err(e) => {
            error!("Failed to add recipe {} to favorites: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn remove_favorite(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    match svc.remove_favorite(user, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to remove recipe {} from favorites: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses(
        (status = 201, body = RecipeSummaryDto),
        (status = 404, body = Problem, content_type = "application/problem+json"),
        (status = 409, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn add_to_cart(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<(StatusCode, Json<RecipeSummaryDto>), ProblemResponse> {
    match svc.add_to_cart(user, id).await {
        Ok(summary) => Ok((StatusCode::CREATED, Json(summary.into()))),
        Err(e) => {
            error!("Failed to add recipe {} to shopping cart: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn remove_from_cart(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    match svc.remove_from_cart(user, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to remove recipe {} from shopping cart: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Download the aggregated shopping list as `data.txt`
#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    tag = "recipes",
    responses(
        (status = 200, body = String, content_type = "text/plain"),
        (status = 401, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn download_shopping_cart(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    uri: Uri,
) -> Result<Response, ProblemResponse> {
    match svc.shopping_list(user).await {
        Ok(list) => {
            info!("Serving shopping list with {} lines", list.lines.len());
            Ok((
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", ShoppingList::FILE_NAME),
                    ),
                ],
                list.render(),
            )
                .into_response())
        }
        Err(e) => {
            error!("Failed to build shopping list: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

// --- users ---

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(PageQuery),
    responses((status = 200, body = PageDto<UserDto>))
)]
pub async fn list_users(
    Extension(svc): Svc,
    Viewer(viewer): Viewer,
    QueryParams(query): QueryParams<PageQuery>,
    uri: Uri,
) -> Result<Json<PageDto<UserDto>>, ProblemResponse> {
    match svc.list_users(viewer, query.into()).await {
        Ok(page) => Ok(Json(page.into())),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, body = UserDto),
        (status = 401, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_me(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    uri: Uri,
) -> Result<Json<UserDto>, ProblemResponse> {
    match svc.get_me(user).await {
        Ok(profile) => Ok(Json(profile.into())),
        Err(e) => {
            error!("Failed to get current user {}: {}", user, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, body = UserDto),
        (status = 404, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_user(
    Extension(svc): Svc,
    Viewer(viewer): Viewer,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<Json<UserDto>, ProblemResponse> {
    match svc.get_user_profile(viewer, id).await {
        Ok(profile) => Ok(Json(profile.into())),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Authors the caller follows, each with a recipe preview
#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "users",
    params(SubscriptionsQuery),
    responses(
        (status = 200, body = PageDto<SubscriptionDto>),
        (status = 401, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_subscriptions(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<SubscriptionsQuery>,
    uri: Uri,
) -> Result<Json<PageDto<SubscriptionDto>>, ProblemResponse> {
    let page = PageRequest {
        page: query.page,
        limit: query.limit,
    };
    match svc.list_subscriptions(user, page, query.recipes_limit).await {
        Ok(page) => Ok(Json(page.into())),
        Err(e) => {
            error!("Failed to list subscriptions of user {}: {}", user, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(("id" = i32, Path, description = "Author id"), RecipesLimitQuery),
    responses(
        (status = 201, body = SubscriptionDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json"),
        (status = 409, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn subscribe(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    QueryParams(query): QueryParams<RecipesLimitQuery>,
    uri: Uri,
) -> Result<(StatusCode, Json<SubscriptionDto>), ProblemResponse> {
    info!("User {} subscribing to {}", user, id);

    match svc.subscribe(user, id, query.recipes_limit).await {
        Ok(sub) => Ok((StatusCode::CREATED, Json(sub.into()))),
        Err(e) => {
            error!("Failed to subscribe to user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn unsubscribe(
    Extension(svc): Svc,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    match svc.unsubscribe(user, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to unsubscribe from user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
