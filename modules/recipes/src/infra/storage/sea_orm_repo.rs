//! SeaORM-backed implementation of every repository port.
//!
//! Generic over `C: ConnectionTrait + TransactionTrait` so the same code runs
//! against a pooled `DatabaseConnection` in production and in tests.
//! Multi-statement writes open their own transaction; dropping it without
//! `commit` rolls back.

use std::collections::{HashMap, HashSet};

use anyhow::Context;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, SqlErr, TransactionTrait,
};

use crate::contract::model::{
    Ingredient, NewIngredient, NewTag, NewUser, RecipeIngredient, Tag, User,
};
use crate::domain::model::{
    Composition, IngredientLine, LinkOutcome, NewRecipeRecord, RecipeQuery, RecipeReplacement,
    RecipeRow, RelationKind, UnlinkOutcome, Window,
};
use crate::domain::repo::{
    CatalogRepository, RecipesRepository, RelationsRepository, UsersRepository,
};
use crate::infra::storage::entity::{
    cart_entry, favorite, ingredient, recipe, recipe_ingredient, recipe_tag, subscription, tag,
    user,
};

/// Rows per INSERT statement during bulk ingredient loads.
const IMPORT_CHUNK: usize = 500;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

async fn write_composition<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    composition: &Composition,
) -> anyhow::Result<()> {
    if !composition.tags.is_empty() {
        recipe_tag::Entity::insert_many(composition.tags.iter().map(|&tag_id| {
            recipe_tag::ActiveModel {
                recipe_id: Set(recipe_id),
                tag_id: Set(tag_id),
                ..Default::default()
            }
        }))
        .exec_without_returning(conn)
        .await
        .context("insert recipe tags failed")?;
    }
    if !composition.ingredients.is_empty() {
        recipe_ingredient::Entity::insert_many(composition.ingredients.iter().map(|line| {
            recipe_ingredient::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id),
                amount: Set(line.amount),
                ..Default::default()
            }
        }))
        .exec_without_returning(conn)
        .await
        .context("insert recipe ingredients failed")?;
    }
    Ok(())
}

async fn target_exists<C: ConnectionTrait>(
    conn: &C,
    kind: RelationKind,
    target_id: i32,
) -> anyhow::Result<bool> {
    let count = match kind {
        RelationKind::Favorite | RelationKind::Cart => {
            recipe::Entity::find_by_id(target_id).count(conn).await
        }
        RelationKind::Subscription => user::Entity::find_by_id(target_id).count(conn).await,
    }
    .context("target lookup failed")?;
    Ok(count > 0)
}

async fn link_exists<C: ConnectionTrait>(
    conn: &C,
    kind: RelationKind,
    user_id: i32,
    target_id: i32,
) -> anyhow::Result<bool> {
    let count = match kind {
        RelationKind::Favorite => {
            favorite::Entity::find()
                .filter(favorite::Column::UserId.eq(user_id))
                .filter(favorite::Column::RecipeId.eq(target_id))
                .count(conn)
                .await
        }
        RelationKind::Cart => {
            cart_entry::Entity::find()
                .filter(cart_entry::Column::UserId.eq(user_id))
                .filter(cart_entry::Column::RecipeId.eq(target_id))
                .count(conn)
                .await
        }
        RelationKind::Subscription => {
            subscription::Entity::find()
                .filter(subscription::Column::UserId.eq(user_id))
                .filter(subscription::Column::AuthorId.eq(target_id))
                .count(conn)
                .await
        }
    }
    .context("link lookup failed")?;
    Ok(count > 0)
}

async fn insert_link<C: ConnectionTrait>(
    conn: &C,
    kind: RelationKind,
    user_id: i32,
    target_id: i32,
) -> Result<(), DbErr> {
    match kind {
        RelationKind::Favorite => favorite::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(target_id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map(|_| ()),
        RelationKind::Cart => cart_entry::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(target_id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map(|_| ()),
        RelationKind::Subscription => subscription::ActiveModel {
            user_id: Set(user_id),
            author_id: Set(target_id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map(|_| ()),
    }
}

#[async_trait::async_trait]
impl<C> CatalogRepository for SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn list_tags(&self) -> anyhow::Result<Vec<Tag>> {
        let rows = tag::Entity::find()
            .order_by_asc(tag::Column::Id)
            .all(&self.conn)
            .await
            .context("list_tags failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_tag(&self, id: i32) -> anyhow::Result<Option<Tag>> {
        let found = tag::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_tag failed")?;
        Ok(found.map(Into::into))
    }

    async fn tag_conflict(&self, new_tag: &NewTag) -> anyhow::Result<Option<&'static str>> {
        let checks = [
            ("name", tag::Column::Name, &new_tag.name),
            ("color", tag::Column::Color, &new_tag.color),
            ("slug", tag::Column::Slug, &new_tag.slug),
        ];
        for (field, column, value) in checks {
            let taken = tag::Entity::find()
                .filter(column.eq(value.as_str()))
                .count(&self.conn)
                .await
                .context("tag_conflict failed")?;
            if taken > 0 {
                return Ok(Some(field));
            }
        }
        Ok(None)
    }

    async fn insert_tag(&self, new_tag: NewTag) -> anyhow::Result<Tag> {
        let m = tag::ActiveModel {
            name: Set(new_tag.name),
            color: Set(new_tag.color),
            slug: Set(new_tag.slug),
            ..Default::default()
        };
        let saved = m.insert(&self.conn).await.context("insert_tag failed")?;
        Ok(saved.into())
    }

    async fn existing_tag_ids(&self, ids: &[i32]) -> anyhow::Result<HashSet<i32>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = tag::Entity::find()
            .select_only()
            .column(tag::Column::Id)
            .filter(tag::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.conn)
            .await
            .context("existing_tag_ids failed")?;
        Ok(found.into_iter().collect())
    }

    async fn list_ingredients(&self, name_prefix: Option<&str>) -> anyhow::Result<Vec<Ingredient>> {
        let mut select = ingredient::Entity::find();
        if let Some(prefix) = name_prefix.map(str::trim).filter(|p| !p.is_empty()) {
            let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(ingredient::Column::Name)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        let rows = select
            .order_by_asc(ingredient::Column::Name)
            .order_by_asc(ingredient::Column::Id)
            .all(&self.conn)
            .await
            .context("list_ingredients failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_ingredient(&self, id: i32) -> anyhow::Result<Option<Ingredient>> {
        let found = ingredient::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_ingredient failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_ingredients(&self, ids: &[i32]) -> anyhow::Result<Vec<Ingredient>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = ingredient::Entity::find()
            .filter(ingredient::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await
            .context("find_ingredients failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn existing_ingredient_ids(&self, ids: &[i32]) -> anyhow::Result<HashSet<i32>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = ingredient::Entity::find()
            .select_only()
            .column(ingredient::Column::Id)
            .filter(ingredient::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.conn)
            .await
            .context("existing_ingredient_ids failed")?;
        Ok(found.into_iter().collect())
    }

    async fn insert_ingredients(&self, items: Vec<NewIngredient>) -> anyhow::Result<u64> {
        if items.is_empty() {
            return Ok(0);
        }
        let txn = self.conn.begin().await.context("begin failed")?;
        let mut written = 0;
        for chunk in items.chunks(IMPORT_CHUNK) {
            written += ingredient::Entity::insert_many(chunk.iter().map(|item| {
                ingredient::ActiveModel {
                    name: Set(item.name.clone()),
                    measurement_unit: Set(item.measurement_unit.clone()),
                    ..Default::default()
                }
            }))
            .exec_without_returning(&txn)
            .await
            .context("insert_ingredients failed")?;
        }
        txn.commit().await.context("commit failed")?;
        Ok(written)
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn find_user(&self, id: i32) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_user failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_users(&self, ids: &[i32]) -> anyhow::Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await
            .context("find_users failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_users(&self, window: Window) -> anyhow::Result<(Vec<User>, u64)> {
        let count = user::Entity::find()
            .count(&self.conn)
            .await
            .context("count users failed")?;
        let rows = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .offset(window.offset())
            .limit(window.limit)
            .all(&self.conn)
            .await
            .context("list_users failed")?;
        Ok((rows.into_iter().map(Into::into).collect(), count))
    }

    async fn user_conflict(&self, new_user: &NewUser) -> anyhow::Result<Option<&'static str>> {
        let checks = [
            ("email", user::Column::Email, &new_user.email),
            ("username", user::Column::Username, &new_user.username),
        ];
        for (field, column, value) in checks {
            let taken = user::Entity::find()
                .filter(column.eq(value.as_str()))
                .count(&self.conn)
                .await
                .context("user_conflict failed")?;
            if taken > 0 {
                return Ok(Some(field));
            }
        }
        Ok(None)
    }

    async fn insert_user(&self, new_user: NewUser) -> anyhow::Result<User> {
        let m = user::ActiveModel {
            email: Set(new_user.email),
            username: Set(new_user.username),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            ..Default::default()
        };
        let saved = m.insert(&self.conn).await.context("insert_user failed")?;
        Ok(saved.into())
    }
}

#[async_trait::async_trait]
impl<C> RecipesRepository for SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn insert_recipe(&self, record: NewRecipeRecord) -> anyhow::Result<i32> {
        let txn = self.conn.begin().await.context("begin failed")?;
        let m = recipe::ActiveModel {
            author_id: Set(record.author_id),
            name: Set(record.name),
            image_name: Set(record.image.name),
            image_data: Set(record.image.data),
            text: Set(record.text),
            cooking_time: Set(record.cooking_time),
            created_at: Set(record.created_at),
            ..Default::default()
        };
        let saved = m.insert(&txn).await.context("insert_recipe failed")?;
        write_composition(&txn, saved.id, &record.composition).await?;
        txn.commit().await.context("commit failed")?;
        Ok(saved.id)
    }

    async fn replace_recipe(&self, replacement: RecipeReplacement) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await.context("begin failed")?;
        let mut update = recipe::Entity::update_many()
            .col_expr(recipe::Column::Name, Expr::value(replacement.name))
            .col_expr(recipe::Column::Text, Expr::value(replacement.text))
            .col_expr(recipe::Column::CookingTime, Expr::value(replacement.cooking_time))
            .filter(recipe::Column::Id.eq(replacement.id));
        if let Some(image) = replacement.image {
            update = update
                .col_expr(recipe::Column::ImageName, Expr::value(image.name))
                .col_expr(recipe::Column::ImageData, Expr::value(image.data));
        }
        let res = update.exec(&txn).await.context("update recipe failed")?;
        if res.rows_affected == 0 {
            return Ok(false);
        }

        recipe_tag::Entity::delete_many()
            .filter(recipe_tag::Column::RecipeId.eq(replacement.id))
            .exec(&txn)
            .await
            .context("clear recipe tags failed")?;
        recipe_ingredient::Entity::delete_many()
            .filter(recipe_ingredient::Column::RecipeId.eq(replacement.id))
            .exec(&txn)
            .await
            .context("clear recipe ingredients failed")?;
        write_composition(&txn, replacement.id, &replacement.composition).await?;

        txn.commit().await.context("commit failed")?;
        Ok(true)
    }

    async fn delete_recipe(&self, id: i32) -> anyhow::Result<bool> {
        let res = recipe::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete_recipe failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn find_recipe(&self, id: i32) -> anyhow::Result<Option<RecipeRow>> {
        let found = recipe::Entity::find_by_id(id)
            .into_partial_model::<recipe::Header>()
            .one(&self.conn)
            .await
            .context("find_recipe failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_recipes(
        &self,
        query: &RecipeQuery,
        window: Window,
    ) -> anyhow::Result<(Vec<RecipeRow>, u64)> {
        let mut select = recipe::Entity::find();
        if let Some(author) = query.author {
            select = select.filter(recipe::Column::AuthorId.eq(author));
        }
        if !query.tags.is_empty() {
            let tagged = recipe_tag::Entity::find()
                .select_only()
                .column(recipe_tag::Column::RecipeId)
                .inner_join(tag::Entity)
                .filter(tag::Column::Slug.is_in(query.tags.iter().cloned()))
                .into_query();
            select = select.filter(recipe::Column::Id.in_subquery(tagged));
        }
        if let Some(user_id) = query.favorited_by {
            let favorites = favorite::Entity::find()
                .select_only()
                .column(favorite::Column::RecipeId)
                .filter(favorite::Column::UserId.eq(user_id))
                .into_query();
            select = select.filter(recipe::Column::Id.in_subquery(favorites));
        }
        if let Some(user_id) = query.in_cart_of {
            let cart = cart_entry::Entity::find()
                .select_only()
                .column(cart_entry::Column::RecipeId)
                .filter(cart_entry::Column::UserId.eq(user_id))
                .into_query();
            select = select.filter(recipe::Column::Id.in_subquery(cart));
        }

        let count = select
            .clone()
            .count(&self.conn)
            .await
            .context("count recipes failed")?;
        let rows = select
            .order_by_desc(recipe::Column::CreatedAt)
            .order_by_desc(recipe::Column::Id)
            .offset(window.offset())
            .limit(window.limit)
            .into_partial_model::<recipe::Header>()
            .all(&self.conn)
            .await
            .context("list_recipes failed")?;
        Ok((rows.into_iter().map(Into::into).collect(), count))
    }

    async fn recipes_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<RecipeRow>> {
        let mut select = recipe::Entity::find()
            .filter(recipe::Column::AuthorId.eq(author_id))
            .order_by_desc(recipe::Column::CreatedAt)
            .order_by_desc(recipe::Column::Id);
        if let Some(limit) = limit {
            select = select.limit(limit);
        }
        let rows = select
            .into_partial_model::<recipe::Header>()
            .all(&self.conn)
            .await
            .context("recipes_by_author failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_author(&self, author_id: i32) -> anyhow::Result<u64> {
        recipe::Entity::find()
            .filter(recipe::Column::AuthorId.eq(author_id))
            .count(&self.conn)
            .await
            .context("count_by_author failed")
    }

    async fn tags_of(&self, recipe_ids: &[i32]) -> anyhow::Result<Vec<(i32, Tag)>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = recipe_tag::Entity::find()
            .filter(recipe_tag::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .find_also_related(tag::Entity)
            .order_by_asc(recipe_tag::Column::RecipeId)
            .order_by_asc(tag::Column::Id)
            .all(&self.conn)
            .await
            .context("tags_of failed")?;
        Ok(rows
            .into_iter()
            .filter_map(|(link, found)| found.map(|t| (link.recipe_id, t.into())))
            .collect())
    }

    async fn ingredients_of(
        &self,
        recipe_ids: &[i32],
    ) -> anyhow::Result<Vec<(i32, RecipeIngredient)>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = recipe_ingredient::Entity::find()
            .filter(recipe_ingredient::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .find_also_related(ingredient::Entity)
            .order_by_asc(recipe_ingredient::Column::RecipeId)
            .order_by_asc(recipe_ingredient::Column::Id)
            .all(&self.conn)
            .await
            .context("ingredients_of failed")?;
        Ok(rows
            .into_iter()
            .filter_map(|(link, found)| {
                found.map(|i| {
                    (
                        link.recipe_id,
                        RecipeIngredient {
                            id: i.id,
                            name: i.name,
                            measurement_unit: i.measurement_unit,
                            amount: link.amount,
                        },
                    )
                })
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl<C> RelationsRepository for SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn link(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> anyhow::Result<LinkOutcome> {
        let txn = self.conn.begin().await.context("begin failed")?;
        if !target_exists(&txn, kind, target_id).await? {
            return Ok(LinkOutcome::MissingTarget);
        }
        if link_exists(&txn, kind, user_id, target_id).await? {
            return Ok(LinkOutcome::Duplicate);
        }
        match insert_link(&txn, kind, user_id, target_id).await {
            Ok(()) => {}
            // A concurrent writer won the race for the unique pair.
            Err(e) if is_unique_violation(&e) => return Ok(LinkOutcome::Duplicate),
            Err(e) => return Err(e).context("insert link failed"),
        }
        txn.commit().await.context("commit failed")?;
        Ok(LinkOutcome::Created)
    }

    async fn unlink(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_id: i32,
    ) -> anyhow::Result<UnlinkOutcome> {
        let txn = self.conn.begin().await.context("begin failed")?;
        if !target_exists(&txn, kind, target_id).await? {
            return Ok(UnlinkOutcome::MissingTarget);
        }
        let removed = match kind {
            RelationKind::Favorite => {
                favorite::Entity::delete_many()
                    .filter(favorite::Column::UserId.eq(user_id))
                    .filter(favorite::Column::RecipeId.eq(target_id))
                    .exec(&txn)
                    .await
            }
            RelationKind::Cart => {
                cart_entry::Entity::delete_many()
                    .filter(cart_entry::Column::UserId.eq(user_id))
                    .filter(cart_entry::Column::RecipeId.eq(target_id))
                    .exec(&txn)
                    .await
            }
            RelationKind::Subscription => {
                subscription::Entity::delete_many()
                    .filter(subscription::Column::UserId.eq(user_id))
                    .filter(subscription::Column::AuthorId.eq(target_id))
                    .exec(&txn)
                    .await
            }
        }
        .context("delete link failed")?
        .rows_affected;
        txn.commit().await.context("commit failed")?;
        Ok(if removed > 0 {
            UnlinkOutcome::Removed
        } else {
            UnlinkOutcome::Absent
        })
    }

    async fn linked(
        &self,
        kind: RelationKind,
        user_id: i32,
        target_ids: &[i32],
    ) -> anyhow::Result<HashSet<i32>> {
        if target_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = target_ids.iter().copied();
        let found: Vec<i32> = match kind {
            RelationKind::Favorite => {
                favorite::Entity::find()
                    .select_only()
                    .column(favorite::Column::RecipeId)
                    .filter(favorite::Column::UserId.eq(user_id))
                    .filter(favorite::Column::RecipeId.is_in(ids))
                    .into_tuple()
                    .all(&self.conn)
                    .await
            }
            RelationKind::Cart => {
                cart_entry::Entity::find()
                    .select_only()
                    .column(cart_entry::Column::RecipeId)
                    .filter(cart_entry::Column::UserId.eq(user_id))
                    .filter(cart_entry::Column::RecipeId.is_in(ids))
                    .into_tuple()
                    .all(&self.conn)
                    .await
            }
            RelationKind::Subscription => {
                subscription::Entity::find()
                    .select_only()
                    .column(subscription::Column::AuthorId)
                    .filter(subscription::Column::UserId.eq(user_id))
                    .filter(subscription::Column::AuthorId.is_in(ids))
                    .into_tuple()
                    .all(&self.conn)
                    .await
            }
        }
        .context("linked failed")?;
        Ok(found.into_iter().collect())
    }

    async fn cart_lines(&self, user_id: i32) -> anyhow::Result<Vec<IngredientLine>> {
        let in_cart = cart_entry::Entity::find()
            .select_only()
            .column(cart_entry::Column::RecipeId)
            .filter(cart_entry::Column::UserId.eq(user_id))
            .into_query();
        let rows: Vec<(i32, i32)> = recipe_ingredient::Entity::find()
            .select_only()
            .column(recipe_ingredient::Column::IngredientId)
            .column(recipe_ingredient::Column::Amount)
            .filter(recipe_ingredient::Column::RecipeId.in_subquery(in_cart))
            .into_tuple()
            .all(&self.conn)
            .await
            .context("cart_lines failed")?;
        Ok(rows
            .into_iter()
            .map(|(ingredient_id, amount)| IngredientLine {
                ingredient_id,
                amount,
            })
            .collect())
    }

    async fn subscriptions(
        &self,
        user_id: i32,
        window: Window,
    ) -> anyhow::Result<(Vec<User>, u64)> {
        let select = subscription::Entity::find()
            .filter(subscription::Column::UserId.eq(user_id))
            .order_by_asc(subscription::Column::Id);
        let count = select
            .clone()
            .count(&self.conn)
            .await
            .context("count subscriptions failed")?;
        let author_ids: Vec<i32> = select
            .select_only()
            .column(subscription::Column::AuthorId)
            .offset(window.offset())
            .limit(window.limit)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("subscriptions failed")?;
        if author_ids.is_empty() {
            return Ok((Vec::new(), count));
        }

        let mut by_id: HashMap<i32, User> = user::Entity::find()
            .filter(user::Column::Id.is_in(author_ids.iter().copied()))
            .all(&self.conn)
            .await
            .context("load subscribed authors failed")?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();
        let authors = author_ids
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .collect();
        Ok((authors, count))
    }
}
