//! Pure models for cross-crate communication (no serde/utoipa).

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Data for provisioning a user. Credentials live with the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// A user as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    /// Whether the viewer follows this user. Always false for the viewer's own profile.
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// One `{id, amount}` item of a recipe submission.
///
/// `amount` is kept as submitted text; numbers arrive here in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount {
    pub id: i32,
    pub amount: String,
}

impl IngredientAmount {
    pub fn new(id: i32, amount: impl Into<String>) -> Self {
        Self {
            id,
            amount: amount.into(),
        }
    }
}

/// Recipe picture as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// `data:image/<ext>;base64,<payload>`
    DataUri(String),
    /// Raw upload with its original file name (the extension is taken from it).
    Binary { file_name: String, content: Vec<u8> },
}

/// Create/update payload. List fields are optional so that "missing" and "empty" are both
/// reported as invalid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Required on create; on update `None` keeps the stored image.
    pub image: Option<ImagePayload>,
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmount>>,
}

/// Ingredient line of a stored recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author: UserProfile,
    pub name: String,
    /// Rendered image reference (`{media_url}/{image_name}`).
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub created_at: DateTime<Utc>,
}

/// Short recipe snapshot returned by favorite/cart actions and subscription lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Tag slugs; a recipe matches if it carries any of them.
    pub tags: Vec<String>,
    pub author: Option<i32>,
    /// Only honored for an identified viewer, and only when `true`.
    pub is_favorited: Option<bool>,
    /// Only honored for an identified viewer, and only when `true`.
    pub is_in_shopping_cart: Option<bool>,
}

/// One row of the subscription list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub author: UserProfile,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}

/// 1-based page request; `None` falls back to configured defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Aggregated cart ingredients, one line per distinct ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    pub lines: Vec<ShoppingListLine>,
}

impl ShoppingList {
    pub const FILE_NAME: &'static str = "data.txt";

    /// Plain-text document, `"{name}: {amount} {unit}\n"` per line.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}: {} {}\n", l.name, l.amount, l.measurement_unit))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
