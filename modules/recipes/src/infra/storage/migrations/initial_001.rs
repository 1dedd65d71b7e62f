use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden, Clone, Copy)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    FirstName,
    LastName,
}

#[derive(DeriveIden, Clone, Copy)]
enum Tags {
    Table,
    Id,
    Name,
    Color,
    Slug,
}

#[derive(DeriveIden, Clone, Copy)]
enum Ingredients {
    Table,
    Id,
    Name,
    MeasurementUnit,
}

#[derive(DeriveIden, Clone, Copy)]
enum Recipes {
    Table,
    Id,
    AuthorId,
    Name,
    ImageName,
    ImageData,
    Text,
    CookingTime,
    CreatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum RecipeTags {
    Table,
    Id,
    RecipeId,
    TagId,
}

#[derive(DeriveIden, Clone, Copy)]
enum RecipeIngredients {
    Table,
    Id,
    RecipeId,
    IngredientId,
    Amount,
}

#[derive(DeriveIden, Clone, Copy)]
enum Favorites {
    Table,
    Id,
    UserId,
    RecipeId,
}

#[derive(DeriveIden, Clone, Copy)]
enum CartEntries {
    Table,
    Id,
    UserId,
    RecipeId,
}

#[derive(DeriveIden, Clone, Copy)]
enum Subscriptions {
    Table,
    Id,
    UserId,
    AuthorId,
}

fn pk(col: impl IntoIden + 'static) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn fk_int(col: impl IntoIden + 'static) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().to_owned()
}

fn cascade(
    from: (impl IntoIden + 'static, impl IntoIden + 'static),
    to: (impl IntoIden + 'static, impl IntoIden + 'static),
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .from(from.0, from.1)
        .to(to.0, to.1)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

/// Join table `(left, right)` with a unique pair index.
async fn create_link_table(
    manager: &SchemaManager<'_>,
    table: impl IntoIden + Copy + 'static,
    id: impl IntoIden + 'static,
    left: (impl IntoIden + Copy + 'static, (impl IntoIden + 'static, impl IntoIden + 'static)),
    right: (impl IntoIden + Copy + 'static, (impl IntoIden + 'static, impl IntoIden + 'static)),
    index_name: &str,
) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(pk(id))
                .col(fk_int(left.0))
                .col(fk_int(right.0))
                .foreign_key(&mut cascade((table, left.0), left.1))
                .foreign_key(&mut cascade((table, right.0), right.1))
                .to_owned(),
        )
        .await?;
    manager
        .create_index(
            Index::create()
                .name(index_name)
                .table(table)
                .col(left.0)
                .col(right.0)
                .unique()
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk(Users::Id))
                    .col(ColumnDef::new(Users::Email).string_len(254).not_null().unique_key())
                    .col(ColumnDef::new(Users::Username).string_len(150).not_null().unique_key())
                    .col(ColumnDef::new(Users::FirstName).string_len(150).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(150).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(pk(Tags::Id))
                    .col(ColumnDef::new(Tags::Name).string_len(200).not_null().unique_key())
                    .col(ColumnDef::new(Tags::Color).string_len(7).not_null().unique_key())
                    .col(ColumnDef::new(Tags::Slug).string_len(200).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ingredients::Table)
                    .if_not_exists()
                    .col(pk(Ingredients::Id))
                    .col(ColumnDef::new(Ingredients::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Ingredients::MeasurementUnit).string_len(200).not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_ingredients_name")
                    .table(Ingredients::Table)
                    .col(Ingredients::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Recipes::Table)
                    .if_not_exists()
                    .col(pk(Recipes::Id))
                    .col(fk_int(Recipes::AuthorId))
                    .col(ColumnDef::new(Recipes::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Recipes::ImageName).string().not_null())
                    .col(ColumnDef::new(Recipes::ImageData).blob().not_null())
                    .col(ColumnDef::new(Recipes::Text).text().not_null())
                    .col(ColumnDef::new(Recipes::CookingTime).integer().not_null())
                    .col(
                        ColumnDef::new(Recipes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut cascade(
                        (Recipes::Table, Recipes::AuthorId),
                        (Users::Table, Users::Id),
                    ))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_recipes_created_at")
                    .table(Recipes::Table)
                    .col(Recipes::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        create_link_table(
            manager,
            RecipeTags::Table,
            RecipeTags::Id,
            (RecipeTags::RecipeId, (Recipes::Table, Recipes::Id)),
            (RecipeTags::TagId, (Tags::Table, Tags::Id)),
            "ux_recipe_tags_pair",
        )
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecipeIngredients::Table)
                    .if_not_exists()
                    .col(pk(RecipeIngredients::Id))
                    .col(fk_int(RecipeIngredients::RecipeId))
                    .col(fk_int(RecipeIngredients::IngredientId))
                    .col(ColumnDef::new(RecipeIngredients::Amount).integer().not_null())
                    .check(Expr::col(RecipeIngredients::Amount).gte(1))
                    .foreign_key(&mut cascade(
                        (RecipeIngredients::Table, RecipeIngredients::RecipeId),
                        (Recipes::Table, Recipes::Id),
                    ))
                    .foreign_key(&mut cascade(
                        (RecipeIngredients::Table, RecipeIngredients::IngredientId),
                        (Ingredients::Table, Ingredients::Id),
                    ))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("ux_recipe_ingredients_pair")
                    .table(RecipeIngredients::Table)
                    .col(RecipeIngredients::RecipeId)
                    .col(RecipeIngredients::IngredientId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        create_link_table(
            manager,
            Favorites::Table,
            Favorites::Id,
            (Favorites::UserId, (Users::Table, Users::Id)),
            (Favorites::RecipeId, (Recipes::Table, Recipes::Id)),
            "ux_favorites_pair",
        )
        .await?;

        create_link_table(
            manager,
            CartEntries::Table,
            CartEntries::Id,
            (CartEntries::UserId, (Users::Table, Users::Id)),
            (CartEntries::RecipeId, (Recipes::Table, Recipes::Id)),
            "ux_cart_entries_pair",
        )
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(pk(Subscriptions::Id))
                    .col(fk_int(Subscriptions::UserId))
                    .col(fk_int(Subscriptions::AuthorId))
                    .check(Expr::col(Subscriptions::UserId).ne(Expr::col(Subscriptions::AuthorId)))
                    .foreign_key(&mut cascade(
                        (Subscriptions::Table, Subscriptions::UserId),
                        (Users::Table, Users::Id),
                    ))
                    .foreign_key(&mut cascade(
                        (Subscriptions::Table, Subscriptions::AuthorId),
                        (Users::Table, Users::Id),
                    ))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("ux_subscriptions_pair")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .col(Subscriptions::AuthorId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartEntries::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Favorites::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecipeIngredients::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecipeTags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Recipes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ingredients::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}
