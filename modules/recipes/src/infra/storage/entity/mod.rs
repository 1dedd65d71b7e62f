//! SeaORM entities, one per table.

pub mod cart_entry;
pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod recipe_ingredient;
pub mod recipe_tag;
pub mod subscription;
pub mod tag;
pub mod user;
