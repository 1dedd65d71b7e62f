use async_trait::async_trait;

use crate::contract::{
    error::RecipesError,
    model::{
        Ingredient, NewIngredient, NewTag, NewUser, Page, PageRequest, Recipe, RecipeDraft,
        RecipeFilter, RecipeSummary, ShoppingList, Subscription, Tag, User, UserProfile,
    },
};

/// Public API of the recipes module for in-process consumers (CLI, other modules).
///
/// `actor` arguments are ids asserted by the caller's identity provider.
#[async_trait]
pub trait RecipesApi: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, RecipesError>;
    async fn create_tag(&self, tag: NewTag) -> Result<Tag, RecipesError>;
    async fn list_ingredients(&self, name: Option<String>) -> Result<Vec<Ingredient>, RecipesError>;
    /// Bulk load; returns the number of rows written.
    async fn import_ingredients(&self, items: Vec<NewIngredient>) -> Result<u64, RecipesError>;
    /// Parse a `name,measurement_unit` CSV document and import it.
    async fn import_ingredients_csv(&self, csv: String) -> Result<u64, RecipesError>;

    async fn create_user(&self, user: NewUser) -> Result<User, RecipesError>;
    async fn get_user(&self, viewer: Option<i32>, id: i32) -> Result<UserProfile, RecipesError>;

    async fn create_recipe(&self, actor: i32, draft: RecipeDraft) -> Result<Recipe, RecipesError>;
    async fn update_recipe(
        &self,
        actor: i32,
        id: i32,
        draft: RecipeDraft,
    ) -> Result<Recipe, RecipesError>;
    async fn delete_recipe(&self, actor: i32, id: i32) -> Result<(), RecipesError>;
    async fn get_recipe(&self, viewer: Option<i32>, id: i32) -> Result<Recipe, RecipesError>;
    async fn list_recipes(
        &self,
        viewer: Option<i32>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesError>;

    async fn add_favorite(&self, actor: i32, recipe_id: i32) -> Result<RecipeSummary, RecipesError>;
    async fn remove_favorite(&self, actor: i32, recipe_id: i32) -> Result<(), RecipesError>;
    async fn add_to_cart(&self, actor: i32, recipe_id: i32) -> Result<RecipeSummary, RecipesError>;
    async fn remove_from_cart(&self, actor: i32, recipe_id: i32) -> Result<(), RecipesError>;
    async fn subscribe(
        &self,
        actor: i32,
        author_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, RecipesError>;
    async fn unsubscribe(&self, actor: i32, author_id: i32) -> Result<(), RecipesError>;
    async fn list_subscriptions(
        &self,
        actor: i32,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<Subscription>, RecipesError>;

    async fn shopping_list(&self, actor: i32) -> Result<ShoppingList, RecipesError>;
}
