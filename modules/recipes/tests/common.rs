#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use db::{ConnectOpts, DbHandle};
use recipes::contract::model::{
    ImagePayload, IngredientAmount, NewIngredient, NewTag, NewUser, RecipeDraft, Tag, User,
};
use recipes::domain::service::Service;
use recipes::{RecipesConfig, RecipesModule};

/// 1x1 transparent PNG.
pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub struct TestApp {
    pub module: RecipesModule,
    pub service: Arc<Service>,
    pub db: DbHandle,
}

/// Fresh in-memory database with the schema applied.
pub async fn setup() -> TestApp {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .expect("connect to in-memory sqlite");
    let conn = db.sea();
    RecipesModule::migrate(&conn).await.expect("migrations");
    let module = RecipesModule::new(conn, &RecipesConfig::default());
    let service = module.service();
    TestApp {
        module,
        service,
        db,
    }
}

pub async fn user(svc: &Service, username: &str) -> User {
    svc.create_user(NewUser {
        email: format!("{username}@example.com"),
        username: username.to_string(),
        first_name: "Test".to_string(),
        last_name: "Cook".to_string(),
    })
    .await
    .expect("create user")
}

pub async fn tag(svc: &Service, slug: &str, color: &str) -> Tag {
    svc.create_tag(NewTag {
        name: slug.to_string(),
        color: color.to_string(),
        slug: slug.to_string(),
    })
    .await
    .expect("create tag")
}

/// Imports `(name, unit)` pairs and returns their ids by name.
pub async fn ingredients(svc: &Service, items: &[(&str, &str)]) -> HashMap<String, i32> {
    let batch = items
        .iter()
        .map(|(name, unit)| NewIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        })
        .collect();
    svc.import_ingredients(batch).await.expect("import");
    svc.list_ingredients(None)
        .await
        .expect("list ingredients")
        .into_iter()
        .map(|i| (i.name, i.id))
        .collect()
}

pub fn draft(name: &str, tags: &[i32], lines: &[(i32, &str)]) -> RecipeDraft {
    RecipeDraft {
        name: name.to_string(),
        text: format!("How to cook {name}"),
        cooking_time: 15,
        image: Some(ImagePayload::DataUri(PNG_DATA_URI.to_string())),
        tags: Some(tags.to_vec()),
        ingredients: Some(
            lines
                .iter()
                .map(|(id, amount)| IngredientAmount::new(*id, *amount))
                .collect(),
        ),
    }
}
