use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{
    ImagePayload, Ingredient, IngredientAmount, Page, PageRequest, Recipe, RecipeDraft,
    RecipeFilter, RecipeIngredient, RecipeSummary, Subscription, Tag, UserProfile,
};

/// REST DTO for a user as seen by the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientDto {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredientDto {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeDto {
    pub id: i32,
    pub author: UserDto,
    pub name: String,
    /// Public URL of the stored image.
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<TagDto>,
    pub ingredients: Vec<RecipeIngredientDto>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub created_at: DateTime<Utc>,
}

/// Short recipe form used by relation endpoints and subscription views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummaryDto {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// An author the caller follows, with a preview of their recipes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionDto {
    #[serde(flatten)]
    pub author: UserDto,
    pub recipes: Vec<RecipeSummaryDto>,
    pub recipes_count: u64,
}

/// Paginated envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageDto<T> {
    pub count: u64,
    pub page: u64,
    pub limit: u64,
    pub results: Vec<T>,
}

/// `{id, amount}` pair; `amount` may be sent as a JSON number or string.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientAmountReq {
    pub id: i32,
    #[serde(deserialize_with = "number_or_string")]
    #[schema(value_type = String, example = "100")]
    pub amount: String,
}

/// REST DTO for creating or fully replacing a recipe
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeWriteReq {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// `data:image/<ext>;base64,<payload>`; optional on update.
    pub image: Option<String>,
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmountReq>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscriptionsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Cap on recipes shown per author.
    pub recipes_limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientsQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

/// Documents the recipe list query string; parsed by [`parse_recipe_query`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    /// Tag slug; repeat for any-of matching.
    pub tags: Option<Vec<String>>,
    pub author: Option<i32>,
    /// `1`/`true` keeps only the caller's favorites.
    pub is_favorited: Option<String>,
    /// `1`/`true` keeps only recipes in the caller's cart.
    pub is_in_shopping_cart: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("invalid value '{other}' for '{key}'")),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{value}' for '{key}'"))
}

/// Parse the recipe list query string. `tags` may repeat; unknown keys are ignored.
pub fn parse_recipe_query(raw: Option<&str>) -> Result<(RecipeFilter, PageRequest), String> {
    let mut filter = RecipeFilter::default();
    let mut page = PageRequest::default();
    for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "tags" => {
                let slug = value.trim();
                if !slug.is_empty() {
                    filter.tags.push(slug.to_string());
                }
            }
            "author" => filter.author = Some(parse_number(&key, &value)?),
            "is_favorited" => filter.is_favorited = Some(parse_flag(&key, &value)?),
            "is_in_shopping_cart" => filter.is_in_shopping_cart = Some(parse_flag(&key, &value)?),
            "page" => page.page = Some(parse_number(&key, &value)?),
            "limit" => page.limit = Some(parse_number(&key, &value)?),
            _ => {}
        }
    }
    Ok((filter, page))
}

// Conversion implementations between REST DTOs and contract models

impl From<UserProfile> for UserDto {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.user.id,
            email: p.user.email,
            username: p.user.username,
            first_name: p.user.first_name,
            last_name: p.user.last_name,
            is_subscribed: p.is_subscribed,
        }
    }
}

impl From<Tag> for TagDto {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            color: t.color,
            slug: t.slug,
        }
    }
}

impl From<Ingredient> for IngredientDto {
    fn from(i: Ingredient) -> Self {
        Self {
            id: i.id,
            name: i.name,
            measurement_unit: i.measurement_unit,
        }
    }
}

impl From<RecipeIngredient> for RecipeIngredientDto {
    fn from(i: RecipeIngredient) -> Self {
        Self {
            id: i.id,
            name: i.name,
            measurement_unit: i.measurement_unit,
            amount: i.amount,
        }
    }
}

impl From<Recipe> for RecipeDto {
    fn from(r: Recipe) -> Self {
        Self {
            id: r.id,
            author: r.author.into(),
            name: r.name,
            image: r.image,
            text: r.text,
            cooking_time: r.cooking_time,
            tags: r.tags.into_iter().map(Into::into).collect(),
            ingredients: r.ingredients.into_iter().map(Into::into).collect(),
            is_favorited: r.is_favorited,
            is_in_shopping_cart: r.is_in_shopping_cart,
            created_at: r.created_at,
        }
    }
}

impl From<RecipeSummary> for RecipeSummaryDto {
    fn from(r: RecipeSummary) -> Self {
        Self {
            id: r.id,
            name: r.name,
            image: r.image,
            cooking_time: r.cooking_time,
        }
    }
}

impl From<Subscription> for SubscriptionDto {
    fn from(s: Subscription) -> Self {
        Self {
            author: s.author.into(),
            recipes: s.recipes.into_iter().map(Into::into).collect(),
            recipes_count: s.recipes_count,
        }
    }
}

impl<T, D: From<T>> From<Page<T>> for PageDto<D> {
    fn from(p: Page<T>) -> Self {
        Self {
            count: p.count,
            page: p.page,
            limit: p.limit,
            results: p.items.into_iter().map(D::from).collect(),
        }
    }
}

impl From<RecipeWriteReq> for RecipeDraft {
    fn from(req: RecipeWriteReq) -> Self {
        Self {
            name: req.name,
            text: req.text,
            cooking_time: req.cooking_time,
            image: req.image.map(ImagePayload::DataUri),
            tags: req.tags,
            ingredients: req.ingredients.map(|items| {
                items
                    .into_iter()
                    .map(|i| IngredientAmount::new(i.id, i.amount))
                    .collect()
            }),
        }
    }
}

impl From<PageQuery> for PageRequest {
    fn from(q: PageQuery) -> Self {
        Self {
            page: q.page,
            limit: q.limit,
        }
    }
}
