use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::RecipesApi,
    error::RecipesError,
    model::{
        Ingredient, NewIngredient, NewTag, NewUser, Page, PageRequest, Recipe, RecipeDraft,
        RecipeFilter, RecipeSummary, ShoppingList, Subscription, Tag, User, UserProfile,
    },
};
use crate::domain::service::Service;

/// Local implementation of the RecipesApi trait that delegates to the domain service
pub struct RecipesLocalClient {
    service: Arc<Service>,
}

impl RecipesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RecipesApi for RecipesLocalClient {
    async fn list_tags(&self) -> Result<Vec<Tag>, RecipesError> {
        self.service.list_tags().await.map_err(Into::into)
    }

    async fn create_tag(&self, tag: NewTag) -> Result<Tag, RecipesError> {
        self.service.create_tag(tag).await.map_err(Into::into)
    }

    async fn list_ingredients(
        &self,
        name: Option<String>,
    ) -> Result<Vec<Ingredient>, RecipesError> {
        self.service
            .list_ingredients(name.as_deref())
            .await
            .map_err(Into::into)
    }

    async fn import_ingredients(&self, items: Vec<NewIngredient>) -> Result<u64, RecipesError> {
        self.service
            .import_ingredients(items)
            .await
            .map_err(Into::into)
    }

    async fn import_ingredients_csv(&self, csv: String) -> Result<u64, RecipesError> {
        self.service
            .import_ingredients_csv(&csv)
            .await
            .map_err(Into::into)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, RecipesError> {
        self.service.create_user(user).await.map_err(Into::into)
    }

    async fn get_user(&self, viewer: Option<i32>, id: i32) -> Result<UserProfile, RecipesError> {
        self.service
            .get_user_profile(viewer, id)
            .await
            .map_err(Into::into)
    }

    async fn create_recipe(&self, actor: i32, draft: RecipeDraft) -> Result<Recipe, RecipesError> {
        self.service
            .create_recipe(actor, draft)
            .await
            .map_err(Into::into)
    }

    async fn update_recipe(
        &self,
        actor: i32,
        id: i32,
        draft: RecipeDraft,
    ) -> Result<Recipe, RecipesError> {
        self.service
            .update_recipe(actor, id, draft)
            .await
            .map_err(Into::into)
    }

    async fn delete_recipe(&self, actor: i32, id: i32) -> Result<(), RecipesError> {
        self.service
            .delete_recipe(actor, id)
            .await
            .map_err(Into::into)
    }

    async fn get_recipe(&self, viewer: Option<i32>, id: i32) -> Result<Recipe, RecipesError> {
        self.service.get_recipe(viewer, id).await.map_err(Into::into)
    }

    async fn list_recipes(
        &self,
        viewer: Option<i32>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesError> {
        self.service
            .list_recipes(viewer, filter, page)
            .await
            .map_err(Into::into)
    }

    async fn add_favorite(
        &self,
        actor: i32,
        recipe_id: i32,
    ) -> Result<RecipeSummary, RecipesError> {
        self.service
            .add_favorite(actor, recipe_id)
            .await
            .map_err(Into::into)
    }

    async fn remove_favorite(&self, actor: i32, recipe_id: i32) -> Result<(), RecipesError> {
        self.service
            .remove_favorite(actor, recipe_id)
            .await
            .map_err(Into::into)
    }

    async fn add_to_cart(&self, actor: i32, recipe_id: i32) -> Result<RecipeSummary, RecipesError> {
        self.service
            .add_to_cart(actor, recipe_id)
            .await
            .map_err(Into::into)
    }

    async fn remove_from_cart(&self, actor: i32, recipe_id: i32) -> Result<(), RecipesError> {
        self.service
            .remove_from_cart(actor, recipe_id)
            .await
            .map_err(Into::into)
    }

    async fn subscribe(
        &self,
        actor: i32,
        author_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, RecipesError> {
        self.service
            .subscribe(actor, author_id, recipes_limit)
            .await
            .map_err(Into::into)
    }

    async fn unsubscribe(&self, actor: i32, author_id: i32) -> Result<(), RecipesError> {
        self.service
            .unsubscribe(actor, author_id)
            .await
            .map_err(Into::into)
    }

    async fn list_subscriptions(
        &self,
        actor: i32,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<Subscription>, RecipesError> {
        self.service
            .list_subscriptions(actor, page, recipes_limit)
            .await
            .map_err(Into::into)
    }

    async fn shopping_list(&self, actor: i32) -> Result<ShoppingList, RecipesError> {
        self.service.shopping_list(actor).await.map_err(Into::into)
    }
}
