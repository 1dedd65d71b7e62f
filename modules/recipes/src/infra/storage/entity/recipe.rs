use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DerivePartialModel, FromQueryResult};

use crate::domain::model::RecipeRow;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub image_name: String,
    #[sea_orm(column_type = "Blob")]
    pub image_data: Vec<u8>,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Every column but the image blob.
#[derive(Debug, Clone, DerivePartialModel, FromQueryResult)]
#[sea_orm(entity = "Entity")]
pub struct Header {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub image_name: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Header> for RecipeRow {
    fn from(h: Header) -> Self {
        Self {
            id: h.id,
            author_id: h.author_id,
            name: h.name,
            image_name: h.image_name,
            text: h.text,
            cooking_time: h.cooking_time,
            created_at: h.created_at,
        }
    }
}
