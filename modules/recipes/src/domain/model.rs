//! Storage-facing records exchanged between the service and the repository ports.

use chrono::{DateTime, Utc};
use std::fmt;

/// The three uniqueness-constrained relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// user -> recipe
    Favorite,
    /// user -> recipe
    Cart,
    /// user -> author
    Subscription,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Favorite => "favorites",
            Self::Cart => "shopping cart",
            Self::Subscription => "subscriptions",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    Duplicate,
    MissingTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlinkOutcome {
    Removed,
    Absent,
    MissingTarget,
}

/// Recipe columns without the image blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRow {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub image_name: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

/// Decoded image ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// `recipes/images/<uuid>.<ext>`
    pub name: String,
    pub data: Vec<u8>,
}

/// Validated `(ingredient_id, amount)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Validated tag and ingredient sets of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientLine>,
}

#[derive(Debug, Clone)]
pub struct NewRecipeRecord {
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: StoredImage,
    pub composition: Composition,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of a recipe's scalars and composition.
#[derive(Debug, Clone)]
pub struct RecipeReplacement {
    pub id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// `None` keeps the stored image.
    pub image: Option<StoredImage>,
    pub composition: Composition,
}

/// Recipe query resolved against a viewer.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub tags: Vec<String>,
    pub author: Option<i32>,
    pub favorited_by: Option<i32>,
    pub in_cart_of: Option<i32>,
}

/// Offset window computed from a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub page: u64,
    pub limit: u64,
}

impl Window {
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}
