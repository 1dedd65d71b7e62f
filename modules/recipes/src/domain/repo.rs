use std::collections::HashSet;

use async_trait::async_trait;

use crate::contract::model::{
    Ingredient, NewIngredient, NewTag, NewUser, RecipeIngredient, Tag, User,
};
use crate::domain::model::{
    IngredientLine, LinkOutcome, NewRecipeRecord, RecipeQuery, RecipeReplacement, RecipeRow,
    RelationKind, UnlinkOutcome, Window,
};

// Ports for the domain layer: persistence operations the service needs.
// Object-safe and async-friendly via `async_trait`.

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_tags(&self) -> anyhow::Result<Vec<Tag>>;
    async fn find_tag(&self, id: i32) -> anyhow::Result<Option<Tag>>;
    /// Name of the first unique tag field (`name`, `color`, `slug`) already in use.
    async fn tag_conflict(&self, tag: &NewTag) -> anyhow::Result<Option<&'static str>>;
    async fn insert_tag(&self, tag: NewTag) -> anyhow::Result<Tag>;
    /// Subset of `ids` that exist.
    async fn existing_tag_ids(&self, ids: &[i32]) -> anyhow::Result<HashSet<i32>>;

    /// Case-insensitive name prefix filter, ordered by name.
    async fn list_ingredients(&self, name_prefix: Option<&str>) -> anyhow::Result<Vec<Ingredient>>;
    async fn find_ingredient(&self, id: i32) -> anyhow::Result<Option<Ingredient>>;
    async fn find_ingredients(&self, ids: &[i32]) -> anyhow::Result<Vec<Ingredient>>;
    async fn existing_ingredient_ids(&self, ids: &[i32]) -> anyhow::Result<HashSet<i32>>;
    /// Bulk insert; returns the number of rows written.
    async fn insert_ingredients(&self, items: Vec<NewIngredient>) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_user(&self, id: i32) -> anyhow::Result<Option<User>>;
    async fn find_users(&self, ids: &[i32]) -> anyhow::Result<Vec<User>>;
    async fn list_users(&self, window: Window) -> anyhow::Result<(Vec<User>, u64)>;
    /// Name of the first unique user field (`email`, `username`) already in use.
    async fn user_conflict(&self, user: &NewUser) -> anyhow::Result<Option<&'static str>>;
    async fn insert_user(&self, user: NewUser) -> anyhow::Result<User>;
}

#[async_trait]
pub trait RecipesRepository: Send + Sync {
    /// Recipe, tag rows and ingredient rows in one transaction. Returns the new id.
    async fn insert_recipe(&self, record: NewRecipeRecord) -> anyhow::Result<i32>;
    /// Scalars updated and composition replaced in one transaction.
    /// Returns false if the recipe no longer exists.
    async fn replace_recipe(&self, replacement: RecipeReplacement) -> anyhow::Result<bool>;
    /// Returns true if a row was deleted.
    async fn delete_recipe(&self, id: i32) -> anyhow::Result<bool>;
    async fn find_recipe(&self, id: i32) -> anyhow::Result<Option<RecipeRow>>;
    /// Newest first.
    async fn list_recipes(
        &self,
        query: &RecipeQuery,
        window: Window,
    ) -> anyhow::Result<(Vec<RecipeRow>, u64)>;
    /// Newest first, at most `limit` rows when given.
    async fn recipes_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<RecipeRow>>;
    async fn count_by_author(&self, author_id: i32) -> anyhow::Result<u64>;
    /// `(recipe_id, tag)` pairs.
    async fn tags_of(&self, recipe_ids: &[i32]) -> anyhow::Result<Vec<(i32, Tag)>>;
    /// `(recipe_id, line)` pairs.
    async fn ingredients_of(
        &self,
        recipe_ids: &[i32],
    ) -> anyhow::Result<Vec<(i32, RecipeIngredient)>>;
}

#[async_trait]
pub trait RelationsRepository: Send + Sync {
    /// Target check, duplicate check and insert in one transaction.
    async fn link(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> anyhow::Result<LinkOutcome>;
    /// Target check and delete in one transaction.
    async fn unlink(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> anyhow::Result<UnlinkOutcome>;
    /// Subset of `target_ids` linked from `user_id`.
    async fn linked(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_ids: &[i32],
    ) -> anyhow::Result<HashSet<i32>>;
    /// Ingredient lines of every recipe in the user's cart.
    async fn cart_lines(&self, user_id: i32) -> anyhow::Result<Vec<IngredientLine>>;
    /// Authors the user follows, ordered by subscription time.
    async fn subscriptions(&self, user_id: i32, window: Window) -> anyhow::Result<(Vec<User>, u64)>;
}
