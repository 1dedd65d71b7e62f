use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::config::RecipesConfig;
use crate::contract::model::{
    Ingredient, NewIngredient, NewTag, NewUser, Page, PageRequest, Recipe, RecipeDraft,
    RecipeFilter, RecipeIngredient, RecipeSummary, ShoppingList, Subscription, Tag, User,
    UserProfile,
};
use crate::domain::composition::{self, missing_ids};
use crate::domain::error::DomainError;
use crate::domain::import::parse_ingredients_csv;
use crate::domain::model::{
    Composition, LinkOutcome, NewRecipeRecord, RecipeQuery, RecipeReplacement, RecipeRow,
    RelationKind, UnlinkOutcome, Window,
};
use crate::domain::repo::{
    CatalogRepository, RecipesRepository, RelationsRepository, UsersRepository,
};
use crate::domain::rules;
use crate::domain::shopping_list;

/// Domain service: recipe composition, relationship sets, the shopping list and the
/// read models around them. Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    catalog: Arc<dyn CatalogRepository>,
    recipes: Arc<dyn RecipesRepository>,
    relations: Arc<dyn RelationsRepository>,
    users: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub min_cooking_time: i32,
    pub max_cooking_time: i32,
    pub max_recipe_name_length: usize,
    pub max_image_bytes: usize,
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub media_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&RecipesConfig::default())
    }
}

impl From<&RecipesConfig> for ServiceConfig {
    fn from(cfg: &RecipesConfig) -> Self {
        Self {
            min_cooking_time: cfg.min_cooking_time,
            max_cooking_time: cfg.max_cooking_time,
            max_recipe_name_length: cfg.max_recipe_name_length,
            max_image_bytes: cfg.max_image_bytes,
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
            media_url: cfg.media_url.clone(),
        }
    }
}

const MAX_SQL_INT: u64 = i64::MAX as u64;

fn db_err(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        recipes: Arc<dyn RecipesRepository>,
        relations: Arc<dyn RelationsRepository>,
        users: Arc<dyn UsersRepository>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            catalog,
            recipes,
            relations,
            users,
            config,
        }
    }

    /// Wire every port to one repository implementation.
    pub fn with_repository<R>(repo: Arc<R>, config: ServiceConfig) -> Self
    where
        R: CatalogRepository + RecipesRepository + RelationsRepository + UsersRepository + 'static,
    {
        Self::new(repo.clone(), repo.clone(), repo.clone(), repo, config)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // --- catalog ---

    #[instrument(name = "recipes.service.list_tags", skip(self))]
    pub async fn list_tags(&self) -> Result<Vec<Tag>, DomainError> {
        self.catalog.list_tags().await.map_err(db_err)
    }

    #[instrument(name = "recipes.service.get_tag", skip(self), fields(tag_id = id))]
    pub async fn get_tag(&self, id: i32) -> Result<Tag, DomainError> {
        self.catalog
            .find_tag(id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::tag_not_found(id))
    }

    #[instrument(
        name = "recipes.service.create_tag",
        skip(self),
        fields(slug = %tag.slug)
    )]
    pub async fn create_tag(&self, tag: NewTag) -> Result<Tag, DomainError> {
        info!("Creating tag");
        rules::validate_new_tag(&tag)?;

        if let Some(field) = self.catalog.tag_conflict(&tag).await.map_err(db_err)? {
            let value = match field {
                "name" => tag.name.clone(),
                "color" => tag.color.clone(),
                _ => tag.slug.clone(),
            };
            return Err(DomainError::already_exists(field, value));
        }

        let created = self.catalog.insert_tag(tag).await.map_err(db_err)?;
        info!("Successfully created tag with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "recipes.service.list_ingredients", skip(self))]
    pub async fn list_ingredients(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<Ingredient>, DomainError> {
        let prefix = name.map(str::trim).filter(|s| !s.is_empty());
        self.catalog.list_ingredients(prefix).await.map_err(db_err)
    }

    #[instrument(name = "recipes.service.get_ingredient", skip(self), fields(ingredient_id = id))]
    pub async fn get_ingredient(&self, id: i32) -> Result<Ingredient, DomainError> {
        self.catalog
            .find_ingredient(id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::ingredient_not_found(id))
    }

    #[instrument(
        name = "recipes.service.import_ingredients",
        skip(self, items),
        fields(count = items.len())
    )]
    pub async fn import_ingredients(&self, items: Vec<NewIngredient>) -> Result<u64, DomainError> {
        for (idx, item) in items.iter().enumerate() {
            rules::validate_new_ingredient(item).map_err(|e| match e {
                DomainError::Validation { field, message } => {
                    DomainError::validation(format!("item {}: {field}", idx + 1), message)
                }
                other => other,
            })?;
        }
        if items.is_empty() {
            debug!("Nothing to import");
            return Ok(0);
        }

        let written = self.catalog.insert_ingredients(items).await.map_err(db_err)?;
        info!("Imported {} ingredients", written);
        Ok(written)
    }

    pub async fn import_ingredients_csv(&self, csv: &str) -> Result<u64, DomainError> {
        let items = parse_ingredients_csv(csv)?;
        self.import_ingredients(items).await
    }

    // --- users ---

    #[instrument(
        name = "recipes.service.create_user",
        skip(self),
        fields(email = %user.email, username = %user.username)
    )]
    pub async fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");
        rules::validate_new_user(&user)?;

        if let Some(field) = self.users.user_conflict(&user).await.map_err(db_err)? {
            let value = if field == "email" {
                user.email.clone()
            } else {
                user.username.clone()
            };
            return Err(DomainError::already_exists(field, value));
        }

        let created = self.users.insert_user(user).await.map_err(db_err)?;
        info!("Successfully created user with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "recipes.service.get_user_profile", skip(self), fields(user_id = id))]
    pub async fn get_user_profile(
        &self,
        viewer: Option<i32>,
        id: i32,
    ) -> Result<UserProfile, DomainError> {
        let user = self
            .users
            .find_user(id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        let mut profiles = self.profiles(viewer, vec![user]).await?;
        profiles
            .pop()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(name = "recipes.service.get_me", skip(self), fields(user_id = viewer))]
    pub async fn get_me(&self, viewer: i32) -> Result<UserProfile, DomainError> {
        let user = self.ensure_actor(viewer).await?;
        Ok(UserProfile {
            user,
            is_subscribed: false,
        })
    }

    #[instrument(name = "recipes.service.list_users", skip(self))]
    pub async fn list_users(
        &self,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<UserProfile>, DomainError> {
        let window = self.window(page)?;
        let (users, count) = self.users.list_users(window).await.map_err(db_err)?;
        let items = self.profiles(viewer, users).await?;
        debug!("Listed {} of {} users", items.len(), count);
        Ok(page_of(items, count, window))
    }

    // --- recipes ---

    #[instrument(
        name = "recipes.service.create_recipe",
        skip(self, draft),
        fields(author_id = author, name = %draft.name)
    )]
    pub async fn create_recipe(
        &self,
        author: i32,
        draft: RecipeDraft,
    ) -> Result<Recipe, DomainError> {
        info!("Creating recipe");
        self.ensure_actor(author).await?;

        self.validate_scalars(&draft)?;
        let composition = composition::validate_composition(&draft)?;
        self.ensure_catalog_refs(&composition).await?;
        let payload = draft
            .image
            .as_ref()
            .ok_or_else(|| DomainError::validation("image", "an image is required"))?;
        let image = composition::decode_image(payload, self.config.max_image_bytes)?;

        let id = self
            .recipes
            .insert_recipe(NewRecipeRecord {
                author_id: author,
                name: draft.name,
                text: draft.text,
                cooking_time: draft.cooking_time,
                image,
                composition,
                created_at: Utc::now(),
            })
            .await
            .map_err(db_err)?;

        info!("Successfully created recipe with id={}", id);
        self.get_recipe(Some(author), id).await
    }

    /// Full replacement: scalars, tag set and ingredient set. The image is kept when the
    /// draft carries none.
    #[instrument(
        name = "recipes.service.update_recipe",
        skip(self, draft),
        fields(recipe_id = id, actor_id = actor)
    )]
    pub async fn update_recipe(
        &self,
        actor: i32,
        id: i32,
        draft: RecipeDraft,
    ) -> Result<Recipe, DomainError> {
        info!("Updating recipe");
        self.ensure_actor(actor).await?;
        self.ensure_author(actor, id).await?;

        self.validate_scalars(&draft)?;
        let composition = composition::validate_composition(&draft)?;
        self.ensure_catalog_refs(&composition).await?;
        let image = draft
            .image
            .as_ref()
            .map(|p| composition::decode_image(p, self.config.max_image_bytes))
            .transpose()?;

        let replaced = self
            .recipes
            .replace_recipe(RecipeReplacement {
                id,
                name: draft.name,
                text: draft.text,
                cooking_time: draft.cooking_time,
                image,
                composition,
            })
            .await
            .map_err(db_err)?;
        if !replaced {
            return Err(DomainError::recipe_not_found(id));
        }

        info!("Successfully updated recipe");
        self.get_recipe(Some(actor), id).await
    }

    #[instrument(
        name = "recipes.service.delete_recipe",
        skip(self),
        fields(recipe_id = id, actor_id = actor)
    )]
    pub async fn delete_recipe(&self, actor: i32, id: i32) -> Result<(), DomainError> {
        info!("Deleting recipe");
        self.ensure_actor(actor).await?;
        self.ensure_author(actor, id).await?;

        if !self.recipes.delete_recipe(id).await.map_err(db_err)? {
            return Err(DomainError::recipe_not_found(id));
        }
        info!("Successfully deleted recipe");
        Ok(())
    }

    #[instrument(name = "recipes.service.get_recipe", skip(self), fields(recipe_id = id))]
    pub async fn get_recipe(&self, viewer: Option<i32>, id: i32) -> Result<Recipe, DomainError> {
        debug!("Getting recipe by id");
        let row = self
            .recipes
            .find_recipe(id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::recipe_not_found(id))?;
        self.hydrate(viewer, vec![row])
            .await?
            .pop()
            .ok_or_else(|| DomainError::recipe_not_found(id))
    }

    #[instrument(name = "recipes.service.list_recipes", skip(self))]
    pub async fn list_recipes(
        &self,
        viewer: Option<i32>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, DomainError> {
        let window = self.window(page)?;
        let only_for_viewer = |flag: Option<bool>| match (flag, viewer) {
            (Some(true), Some(v)) => Some(v),
            _ => None,
        };
        let query = RecipeQuery {
            favorited_by: only_for_viewer(filter.is_favorited),
            in_cart_of: only_for_viewer(filter.is_in_shopping_cart),
            tags: filter.tags,
            author: filter.author,
        };

        let (rows, count) = self
            .recipes
            .list_recipes(&query, window)
            .await
            .map_err(db_err)?;
        let items = self.hydrate(viewer, rows).await?;
        debug!("Listed {} of {} recipes", items.len(), count);
        Ok(page_of(items, count, window))
    }

    // --- relationship sets ---

    #[instrument(name = "recipes.service.add_favorite", skip(self))]
    pub async fn add_favorite(
        &self,
        user: i32,
        recipe_id: i32,
    ) -> Result<RecipeSummary, DomainError> {
        self.link(RelationKind::Favorite, user, recipe_id).await?;
        self.summary(recipe_id).await
    }

    #[instrument(name = "recipes.service.remove_favorite", skip(self))]
    pub async fn remove_favorite(&self, user: i32, recipe_id: i32) -> Result<(), DomainError> {
        self.unlink(RelationKind::Favorite, user, recipe_id).await
    }

    #[instrument(name = "recipes.service.add_to_cart", skip(self))]
    pub async fn add_to_cart(
        &self,
        user: i32,
        recipe_id: i32,
    ) -> Result<RecipeSummary, DomainError> {
        self.link(RelationKind::Cart, user, recipe_id).await?;
        self.summary(recipe_id).await
    }

    #[instrument(name = "recipes.service.remove_from_cart", skip(self))]
    pub async fn remove_from_cart(&self, user: i32, recipe_id: i32) -> Result<(), DomainError> {
        self.unlink(RelationKind::Cart, user, recipe_id).await
    }

    #[instrument(name = "recipes.service.subscribe", skip(self))]
    pub async fn subscribe(
        &self,
        user: i32,
        author_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, DomainError> {
        let recipes_limit = Self::recipes_cap(recipes_limit)?;
        self.link(RelationKind::Subscription, user, author_id).await?;
        let author = self.get_user_profile(Some(user), author_id).await?;
        self.subscription_entry(author, recipes_limit).await
    }

    #[instrument(name = "recipes.service.unsubscribe", skip(self))]
    pub async fn unsubscribe(&self, user: i32, author_id: i32) -> Result<(), DomainError> {
        self.unlink(RelationKind::Subscription, user, author_id).await
    }

    #[instrument(name = "recipes.service.list_subscriptions", skip(self), fields(user_id = user))]
    pub async fn list_subscriptions(
        &self,
        user: i32,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<Subscription>, DomainError> {
        self.ensure_actor(user).await?;
        let window = self.window(page)?;
        let recipes_limit = Self::recipes_cap(recipes_limit)?;

        let (authors, count) = self
            .relations
            .subscriptions(user, window)
            .await
            .map_err(db_err)?;
        let mut items = Vec::with_capacity(authors.len());
        for author in self.profiles(Some(user), authors).await? {
            items.push(self.subscription_entry(author, recipes_limit).await?);
        }
        Ok(page_of(items, count, window))
    }

    /// Sum of ingredient amounts over every recipe in the user's cart.
    #[instrument(name = "recipes.service.shopping_list", skip(self), fields(user_id = user))]
    pub async fn shopping_list(&self, user: i32) -> Result<ShoppingList, DomainError> {
        self.ensure_actor(user).await?;

        let lines = self.relations.cart_lines(user).await.map_err(db_err)?;
        let totals = shopping_list::accumulate(lines);
        if totals.is_empty() {
            debug!("Cart is empty");
            return Ok(ShoppingList::default());
        }

        let ids: Vec<i32> = totals.keys().copied().collect();
        let catalog = self.catalog.find_ingredients(&ids).await.map_err(db_err)?;
        let list = shopping_list::build(&totals, catalog);
        debug!("Shopping list has {} lines", list.lines.len());
        Ok(list)
    }

    // --- helpers ---

    async fn link(&self, kind: RelationKind, user: i32, target: i32) -> Result<(), DomainError> {
        self.ensure_actor(user).await?;
        if kind == RelationKind::Subscription && user == target {
            return Err(DomainError::SelfSubscription);
        }

        match self
            .relations
            .link(kind, user, target)
            .await
            .map_err(db_err)?
        {
            LinkOutcome::Created => {
                info!(%kind, target_id = target, "Relation added");
                Ok(())
            }
            LinkOutcome::Duplicate => Err(DomainError::already_linked(kind, target)),
            LinkOutcome::MissingTarget => Err(DomainError::target_not_found(kind, target)),
        }
    }

    async fn unlink(&self, kind: RelationKind, user: i32, target: i32) -> Result<(), DomainError> {
        self.ensure_actor(user).await?;

        match self
            .relations
            .unlink(kind, user, target)
            .await
            .map_err(db_err)?
        {
            UnlinkOutcome::Removed => {
                info!(%kind, target_id = target, "Relation removed");
                Ok(())
            }
            UnlinkOutcome::Absent => Err(DomainError::not_linked(kind, target)),
            UnlinkOutcome::MissingTarget => Err(DomainError::target_not_found(kind, target)),
        }
    }

    /// Acting users must exist; an identity without a user row is rejected.
    async fn ensure_actor(&self, id: i32) -> Result<User, DomainError> {
        self.users
            .find_user(id)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::UnknownActor { id })
    }

    async fn ensure_author(&self, actor: i32, recipe_id: i32) -> Result<RecipeRow, DomainError> {
        let row = self
            .recipes
            .find_recipe(recipe_id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::recipe_not_found(recipe_id))?;
        if row.author_id != actor {
            return Err(DomainError::NotAuthor { id: recipe_id });
        }
        Ok(row)
    }

    /// Exact set-membership lookup of every referenced tag and ingredient.
    async fn ensure_catalog_refs(&self, composition: &Composition) -> Result<(), DomainError> {
        let existing = self
            .catalog
            .existing_tag_ids(&composition.tags)
            .await
            .map_err(db_err)?;
        let unknown = missing_ids(&composition.tags, &existing);
        if !unknown.is_empty() {
            return Err(DomainError::UnknownTags { ids: unknown });
        }

        let ids: Vec<i32> = composition
            .ingredients
            .iter()
            .map(|l| l.ingredient_id)
            .collect();
        let existing = self
            .catalog
            .existing_ingredient_ids(&ids)
            .await
            .map_err(db_err)?;
        let unknown = missing_ids(&ids, &existing);
        if !unknown.is_empty() {
            return Err(DomainError::UnknownIngredients { ids: unknown });
        }
        Ok(())
    }

    fn validate_scalars(&self, draft: &RecipeDraft) -> Result<(), DomainError> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        if draft.name.chars().count() > self.config.max_recipe_name_length {
            return Err(DomainError::validation(
                "name",
                format!(
                    "must be at most {} characters",
                    self.config.max_recipe_name_length
                ),
            ));
        }
        if draft.text.trim().is_empty() {
            return Err(DomainError::validation("text", "must not be empty"));
        }
        let (min, max) = (self.config.min_cooking_time, self.config.max_cooking_time);
        if !(min..=max).contains(&draft.cooking_time) {
            return Err(DomainError::validation(
                "cooking_time",
                format!("must be between {min} and {max}"),
            ));
        }
        Ok(())
    }

    fn window(&self, page: PageRequest) -> Result<Window, DomainError> {
        let number = page.page.unwrap_or(1);
        if number == 0 {
            return Err(DomainError::validation("page", "pages start at 1"));
        }
        let limit = page.limit.unwrap_or(self.config.default_page_size);
        if limit == 0 {
            return Err(DomainError::validation("limit", "must be positive"));
        }
        let limit = limit.min(self.config.max_page_size);
        // Storage binds offsets as signed 64-bit integers.
        match (number - 1).checked_mul(limit) {
            Some(offset) if offset <= MAX_SQL_INT => {}
            _ => return Err(DomainError::validation("page", "is out of range")),
        }
        Ok(Window {
            page: number,
            limit,
        })
    }

    fn recipes_cap(limit: Option<u64>) -> Result<Option<u64>, DomainError> {
        match limit {
            Some(n) if n > MAX_SQL_INT => Err(DomainError::validation(
                "recipes_limit",
                format!("must be at most {MAX_SQL_INT}"),
            )),
            other => Ok(other),
        }
    }

    fn image_url(&self, image_name: &str) -> String {
        format!(
            "{}/{}",
            self.config.media_url.trim_end_matches('/'),
            image_name
        )
    }

    fn summarize(&self, row: &RecipeRow) -> RecipeSummary {
        RecipeSummary {
            id: row.id,
            name: row.name.clone(),
            image: self.image_url(&row.image_name),
            cooking_time: row.cooking_time,
        }
    }

    async fn summary(&self, recipe_id: i32) -> Result<RecipeSummary, DomainError> {
        let row = self
            .recipes
            .find_recipe(recipe_id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::recipe_not_found(recipe_id))?;
        Ok(self.summarize(&row))
    }

    async fn subscription_entry(
        &self,
        author: UserProfile,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, DomainError> {
        let id = author.user.id;
        let recipes_count = self.recipes.count_by_author(id).await.map_err(db_err)?;
        let recipes = self
            .recipes
            .recipes_by_author(id, recipes_limit)
            .await
            .map_err(db_err)?
            .iter()
            .map(|row| self.summarize(row))
            .collect();
        Ok(Subscription {
            author,
            recipes,
            recipes_count,
        })
    }

    /// Attach `is_subscribed` as seen by `viewer`. A viewer's own row is never subscribed.
    async fn profiles(
        &self,
        viewer: Option<i32>,
        users: Vec<User>,
    ) -> Result<Vec<UserProfile>, DomainError> {
        let following = match viewer {
            Some(v) if !users.is_empty() => {
                let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
                self.relations
                    .linked(RelationKind::Subscription, v, &ids)
                    .await
                    .map_err(db_err)?
            }
            _ => HashSet::new(),
        };

        Ok(users
            .into_iter()
            .map(|user| UserProfile {
                is_subscribed: viewer != Some(user.id) && following.contains(&user.id),
                user,
            })
            .collect())
    }

    /// Batch-load tags, ingredient lines, authors and viewer flags for recipe rows.
    async fn hydrate(
        &self,
        viewer: Option<i32>,
        rows: Vec<RecipeRow>,
    ) -> Result<Vec<Recipe>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<i32> = rows.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let mut tags: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (recipe_id, tag) in self.recipes.tags_of(&ids).await.map_err(db_err)? {
            tags.entry(recipe_id).or_default().push(tag);
        }
        let mut ingredients: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
        for (recipe_id, line) in self.recipes.ingredients_of(&ids).await.map_err(db_err)? {
            ingredients.entry(recipe_id).or_default().push(line);
        }

        let authors = self.users.find_users(&author_ids).await.map_err(db_err)?;
        let authors: HashMap<i32, UserProfile> = self
            .profiles(viewer, authors)
            .await?
            .into_iter()
            .map(|p| (p.user.id, p))
            .collect();

        let (favorited, in_cart) = match viewer {
            Some(v) => (
                self.relations
                    .linked(RelationKind::Favorite, v, &ids)
                    .await
                    .map_err(db_err)?,
                self.relations
                    .linked(RelationKind::Cart, v, &ids)
                    .await
                    .map_err(db_err)?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let author = authors.get(&row.author_id)?.clone();
                Some(Recipe {
                    id: row.id,
                    author,
                    image: self.image_url(&row.image_name),
                    tags: tags.remove(&row.id).unwrap_or_default(),
                    ingredients: ingredients.remove(&row.id).unwrap_or_default(),
                    is_favorited: favorited.contains(&row.id),
                    is_in_shopping_cart: in_cart.contains(&row.id),
                    name: row.name,
                    text: row.text,
                    cooking_time: row.cooking_time,
                    created_at: row.created_at,
                })
            })
            .collect())
    }
}

fn page_of<T>(items: Vec<T>, count: u64, window: Window) -> Page<T> {
    Page {
        items,
        count,
        page: window.page,
        limit: window.limit,
    }
}
