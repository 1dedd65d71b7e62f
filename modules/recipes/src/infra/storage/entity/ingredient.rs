use sea_orm::entity::prelude::*;

use crate::contract::model::Ingredient;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Ingredient {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            measurement_unit: m.measurement_unit,
        }
    }
}
