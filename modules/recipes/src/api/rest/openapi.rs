//! OpenAPI document for the recipes REST surface.

use utoipa::OpenApi;

use crate::api::rest::dto::{
    IngredientAmountReq, IngredientDto, RecipeDto, RecipeIngredientDto, RecipeSummaryDto,
    RecipeWriteReq, SubscriptionDto, TagDto, UserDto,
};
use crate::api::rest::handlers;
use crate::api::rest::problem::Problem;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Foodgram API",
        description = "Recipes, favorites, shopping cart and subscriptions"
    ),
    paths(
        handlers::list_tags,
        handlers::get_tag,
        handlers::list_ingredients,
        handlers::get_ingredient,
        handlers::list_recipes,
        handlers::create_recipe,
        handlers::get_recipe,
        handlers::update_recipe,
        handlers::delete_recipe,
        handlers::add_favorite,
        handlers::remove_favorite,
        handlers::add_to_cart,
        handlers::remove_from_cart,
        handlers::download_shopping_cart,
        handlers::list_users,
        handlers::get_me,
        handlers::get_user,
        handlers::list_subscriptions,
        handlers::subscribe,
        handlers::unsubscribe,
    ),
    components(schemas(
        Problem,
        UserDto,
        TagDto,
        IngredientDto,
        RecipeDto,
        RecipeIngredientDto,
        RecipeSummaryDto,
        SubscriptionDto,
        RecipeWriteReq,
        IngredientAmountReq,
    )),
    tags(
        (name = "tags", description = "Recipe tags"),
        (name = "ingredients", description = "Ingredient catalog"),
        (name = "recipes", description = "Recipes, favorites and shopping cart"),
        (name = "users", description = "User profiles and subscriptions")
    )
)]
pub struct RecipesApiDoc;
