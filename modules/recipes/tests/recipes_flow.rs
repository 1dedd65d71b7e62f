//! Service-level tests against an in-memory SQLite database.

mod common;

use std::collections::HashSet;

use common::{draft, ingredients, setup, tag, user};
use recipes::contract::error::RecipesError;
use recipes::contract::model::{PageRequest, RecipeFilter};
use recipes::domain::error::DomainError;

#[tokio::test]
async fn create_then_read_round_trip() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let breakfast = tag(svc, "breakfast", "#FFAA00").await;
    let lunch = tag(svc, "lunch", "#00AAFF").await;
    let ids = ingredients(svc, &[("eggs", "pcs"), ("milk", "ml")]).await;

    let created = svc
        .create_recipe(
            chef.id,
            draft(
                "Omelette",
                &[lunch.id, breakfast.id],
                &[(ids["eggs"], "3"), (ids["milk"], "100")],
            ),
        )
        .await
        .unwrap();

    let read = svc.get_recipe(None, created.id).await.unwrap();
    let tag_ids: HashSet<i32> = read.tags.iter().map(|t| t.id).collect();
    assert_eq!(tag_ids, HashSet::from([breakfast.id, lunch.id]));
    let lines: HashSet<(i32, i32)> = read.ingredients.iter().map(|i| (i.id, i.amount)).collect();
    assert_eq!(lines, HashSet::from([(ids["eggs"], 3), (ids["milk"], 100)]));

    assert_eq!(read.author.user.id, chef.id);
    assert!(read.image.starts_with("/media/recipes/images/"));
    assert!(read.image.ends_with(".png"));
    assert!(!read.is_favorited);
    assert!(!read.is_in_shopping_cart);
}

#[tokio::test]
async fn duplicate_ingredient_is_rejected_without_mutation() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let t = tag(svc, "dinner", "#112233").await;
    let ids = ingredients(svc, &[("rice", "g")]).await;
    let rice = ids["rice"];

    let err = svc
        .create_recipe(chef.id, draft("Rice", &[t.id], &[(rice, "100"), (rice, "50")]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateIngredient { id } if id == rice));

    let page = svc
        .list_recipes(None, RecipeFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.count, 0);

    let saved = svc
        .create_recipe(chef.id, draft("Rice", &[t.id], &[(rice, "100")]))
        .await
        .unwrap();
    let err = svc
        .update_recipe(
            chef.id,
            saved.id,
            draft("Rice v2", &[t.id], &[(rice, "1"), (rice, "2")]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateIngredient { .. }));

    let unchanged = svc.get_recipe(None, saved.id).await.unwrap();
    assert_eq!(unchanged.name, "Rice");
    assert_eq!(unchanged.ingredients.len(), 1);
    assert_eq!(unchanged.ingredients[0].amount, 100);
}

#[tokio::test]
async fn empty_tag_or_ingredient_lists_are_rejected() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let t = tag(svc, "snack", "#445566").await;
    let ids = ingredients(svc, &[("nuts", "g")]).await;

    let err = svc
        .create_recipe(chef.id, draft("Nuts", &[], &[(ids["nuts"], "10")]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyList { field: "tags" }));

    let err = svc
        .create_recipe(chef.id, draft("Nuts", &[t.id], &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyList { field: "ingredients" }));

    let mut missing = draft("Nuts", &[t.id], &[(ids["nuts"], "10")]);
    missing.ingredients = None;
    let err = svc.create_recipe(chef.id, missing).await.unwrap_err();
    assert!(matches!(err, DomainError::EmptyList { field: "ingredients" }));
}

#[tokio::test]
async fn amount_must_be_a_positive_integer() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let t = tag(svc, "soup", "#778899").await;
    let ids = ingredients(svc, &[("water", "ml")]).await;
    let water = ids["water"];

    for bad in ["0", "-1", "abc", "1.5", ""] {
        let err = svc
            .create_recipe(chef.id, draft("Soup", &[t.id], &[(water, bad)]))
            .await
            .unwrap_err();
        assert!(
            matches!(err, DomainError::InvalidAmount { .. }),
            "amount {bad:?} gave {err:?}"
        );
    }

    let ok = svc
        .create_recipe(chef.id, draft("Soup", &[t.id], &[(water, "3")]))
        .await
        .unwrap();
    assert_eq!(ok.ingredients[0].amount, 3);
}

#[tokio::test]
async fn unknown_tags_and_ingredients_are_not_found() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let t = tag(svc, "salad", "#AABBCC").await;
    let ids = ingredients(svc, &[("lettuce", "g")]).await;

    let err = svc
        .create_recipe(chef.id, draft("Salad", &[t.id, 999], &[(ids["lettuce"], "1")]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UnknownTags { ref ids } if ids == &vec![999]));

    let err = svc
        .create_recipe(chef.id, draft("Salad", &[t.id], &[(4242, "1")]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UnknownIngredients { .. }));
    assert!(svc.list_tags().await.unwrap().len() == 1);
}

#[tokio::test]
async fn update_replaces_the_ingredient_set_exactly() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let a = tag(svc, "a", "#000001").await;
    let b = tag(svc, "b", "#000002").await;
    let ids = ingredients(svc, &[("flour", "g"), ("salt", "g"), ("sugar", "g")]).await;

    let recipe = svc
        .create_recipe(
            chef.id,
            draft("Bread", &[a.id], &[(ids["flour"], "500"), (ids["salt"], "10")]),
        )
        .await
        .unwrap();
    let image = recipe.image.clone();

    let mut replacement = draft(
        "Sweet bread",
        &[b.id],
        &[(ids["flour"], "400"), (ids["sugar"], "30")],
    );
    replacement.image = None;
    let updated = svc
        .update_recipe(chef.id, recipe.id, replacement)
        .await
        .unwrap();

    let lines: HashSet<(i32, i32)> = updated
        .ingredients
        .iter()
        .map(|i| (i.id, i.amount))
        .collect();
    assert_eq!(lines, HashSet::from([(ids["flour"], 400), (ids["sugar"], 30)]));
    assert_eq!(updated.tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b.id]);
    assert_eq!(updated.name, "Sweet bread");
    assert_eq!(updated.image, image, "image kept when none is sent");
}

#[tokio::test]
async fn only_the_author_may_modify_a_recipe() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let other = user(svc, "other").await;
    let t = tag(svc, "cake", "#ABCDEF").await;
    let ids = ingredients(svc, &[("cocoa", "g")]).await;
    let recipe = svc
        .create_recipe(chef.id, draft("Cake", &[t.id], &[(ids["cocoa"], "20")]))
        .await
        .unwrap();

    let err = svc
        .update_recipe(other.id, recipe.id, draft("Mine", &[t.id], &[(ids["cocoa"], "1")]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotAuthor { .. }));

    let err = svc.delete_recipe(other.id, recipe.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotAuthor { .. }));

    let err = svc.delete_recipe(9999, recipe.id).await.unwrap_err();
    assert!(matches!(err, DomainError::UnknownActor { id: 9999 }));
}

#[tokio::test]
async fn relation_sets_report_conflicts_through_the_client() {
    let app = setup().await;
    let client = app.module.client();
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let fan = user(svc, "fan").await;
    let t = tag(svc, "pie", "#101010").await;
    let ids = ingredients(svc, &[("apple", "pcs")]).await;
    let recipe = svc
        .create_recipe(chef.id, draft("Pie", &[t.id], &[(ids["apple"], "4")]))
        .await
        .unwrap();

    let summary = client.add_favorite(fan.id, recipe.id).await.unwrap();
    assert_eq!(summary.id, recipe.id);
    assert!(matches!(
        client.add_favorite(fan.id, recipe.id).await,
        Err(RecipesError::Conflict { .. })
    ));

    client.add_to_cart(fan.id, recipe.id).await.unwrap();
    assert!(matches!(
        client.add_to_cart(fan.id, recipe.id).await,
        Err(RecipesError::Conflict { .. })
    ));

    client.remove_favorite(fan.id, recipe.id).await.unwrap();
    assert!(matches!(
        client.remove_favorite(fan.id, recipe.id).await,
        Err(RecipesError::InvalidRequest { .. })
    ));

    assert!(matches!(
        client.add_favorite(fan.id, 777).await,
        Err(RecipesError::NotFound { .. })
    ));

    let viewed = client.get_recipe(Some(fan.id), recipe.id).await.unwrap();
    assert!(!viewed.is_favorited);
    assert!(viewed.is_in_shopping_cart);
}

#[tokio::test]
async fn subscriptions_reject_self_and_duplicates() {
    let app = setup().await;
    let client = app.module.client();
    let svc = &app.service;
    let reader = user(svc, "reader").await;
    let author = user(svc, "author").await;

    assert!(matches!(
        client.subscribe(reader.id, reader.id, None).await,
        Err(RecipesError::InvalidRequest { .. })
    ));

    let sub = client.subscribe(reader.id, author.id, None).await.unwrap();
    assert!(sub.author.is_subscribed);
    assert_eq!(sub.recipes_count, 0);

    assert!(matches!(
        client.subscribe(reader.id, author.id, None).await,
        Err(RecipesError::Conflict { .. })
    ));
    assert!(matches!(
        client.subscribe(reader.id, 31337, None).await,
        Err(RecipesError::NotFound { .. })
    ));

    client.unsubscribe(reader.id, author.id).await.unwrap();
    assert!(matches!(
        client.unsubscribe(reader.id, author.id).await,
        Err(RecipesError::InvalidRequest { .. })
    ));
}

#[tokio::test]
async fn subscription_view_limits_recipes_but_counts_all() {
    let app = setup().await;
    let svc = &app.service;
    let reader = user(svc, "reader").await;
    let author = user(svc, "author").await;
    let quiet = user(svc, "quiet").await;
    let t = tag(svc, "daily", "#202020").await;
    let ids = ingredients(svc, &[("oats", "g")]).await;
    for name in ["One", "Two", "Three"] {
        svc.create_recipe(author.id, draft(name, &[t.id], &[(ids["oats"], "50")]))
            .await
            .unwrap();
    }

    svc.subscribe(reader.id, author.id, None).await.unwrap();
    svc.subscribe(reader.id, quiet.id, None).await.unwrap();

    let page = svc
        .list_subscriptions(reader.id, PageRequest::default(), Some(2))
        .await
        .unwrap();
    assert_eq!(page.count, 2);
    let first = &page.items[0];
    assert_eq!(first.author.user.id, author.id);
    assert!(first.author.is_subscribed);
    assert_eq!(first.recipes.len(), 2);
    assert_eq!(first.recipes_count, 3);
    assert_eq!(first.recipes[0].name, "Three", "newest first");

    let second = &page.items[1];
    assert_eq!(second.author.user.id, quiet.id);
    assert!(second.recipes.is_empty());
    assert_eq!(second.recipes_count, 0);

    let profile = svc.get_user_profile(Some(reader.id), author.id).await.unwrap();
    assert!(profile.is_subscribed);
    let own = svc.get_user_profile(Some(reader.id), reader.id).await.unwrap();
    assert!(!own.is_subscribed);
}

#[tokio::test]
async fn shopping_list_sums_amounts_across_cart() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let shopper = user(svc, "shopper").await;
    let t = tag(svc, "baking", "#303030").await;
    let ids = ingredients(svc, &[("sugar", "g"), ("flour", "g"), ("salt", "g")]).await;

    let a = svc
        .create_recipe(
            chef.id,
            draft("A", &[t.id], &[(ids["flour"], "200"), (ids["sugar"], "50")]),
        )
        .await
        .unwrap();
    let b = svc
        .create_recipe(
            chef.id,
            draft("B", &[t.id], &[(ids["flour"], "100"), (ids["salt"], "5")]),
        )
        .await
        .unwrap();

    svc.add_to_cart(shopper.id, b.id).await.unwrap();
    svc.add_to_cart(shopper.id, a.id).await.unwrap();

    let list = svc.shopping_list(shopper.id).await.unwrap();
    assert_eq!(list.lines.len(), 3);
    assert_eq!(list.render(), "flour: 300 g\nsalt: 5 g\nsugar: 50 g\n");
}

#[tokio::test]
async fn empty_cart_yields_an_empty_document() {
    let app = setup().await;
    let svc = &app.service;
    let shopper = user(svc, "shopper").await;

    let list = svc.shopping_list(shopper.id).await.unwrap();
    assert!(list.is_empty());
    assert_eq!(list.render(), "");
}

#[tokio::test]
async fn deleting_a_recipe_clears_it_from_carts() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let shopper = user(svc, "shopper").await;
    let t = tag(svc, "tea", "#404040").await;
    let ids = ingredients(svc, &[("tea", "g")]).await;
    let recipe = svc
        .create_recipe(chef.id, draft("Tea", &[t.id], &[(ids["tea"], "5")]))
        .await
        .unwrap();
    svc.add_to_cart(shopper.id, recipe.id).await.unwrap();
    svc.add_favorite(shopper.id, recipe.id).await.unwrap();

    svc.delete_recipe(chef.id, recipe.id).await.unwrap();

    assert!(svc.shopping_list(shopper.id).await.unwrap().is_empty());
    assert!(matches!(
        svc.get_recipe(None, recipe.id).await,
        Err(DomainError::RecipeNotFound { .. })
    ));
}

#[tokio::test]
async fn list_filters_by_tag_author_and_viewer_flags() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let other = user(svc, "other").await;
    let viewer = user(svc, "viewer").await;
    let hot = tag(svc, "hot", "#FF0000").await;
    let cold = tag(svc, "cold", "#0000FF").await;
    let misc = tag(svc, "misc", "#00FF00").await;
    let ids = ingredients(svc, &[("ice", "g")]).await;
    let ice = ids["ice"];

    let soup = svc
        .create_recipe(chef.id, draft("Soup", &[hot.id], &[(ice, "1")]))
        .await
        .unwrap();
    let sorbet = svc
        .create_recipe(other.id, draft("Sorbet", &[cold.id], &[(ice, "2")]))
        .await
        .unwrap();
    svc.create_recipe(chef.id, draft("Toast", &[misc.id], &[(ice, "3")]))
        .await
        .unwrap();

    let by_tags = RecipeFilter {
        tags: vec!["hot".into(), "cold".into()],
        ..Default::default()
    };
    let page = svc
        .list_recipes(None, by_tags, PageRequest::default())
        .await
        .unwrap();
    let names: HashSet<String> = page.items.into_iter().map(|r| r.name).collect();
    assert_eq!(names, HashSet::from(["Soup".to_string(), "Sorbet".to_string()]));

    let by_author = RecipeFilter {
        author: Some(other.id),
        ..Default::default()
    };
    let page = svc
        .list_recipes(None, by_author, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].id, sorbet.id);

    svc.add_favorite(viewer.id, soup.id).await.unwrap();
    let favorites = RecipeFilter {
        is_favorited: Some(true),
        ..Default::default()
    };
    let page = svc
        .list_recipes(Some(viewer.id), favorites.clone(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.count, 1);
    assert!(page.items[0].is_favorited);

    // Anonymous callers have no favorites to filter by.
    let page = svc
        .list_recipes(None, favorites, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.count, 3);
}

#[tokio::test]
async fn pagination_windows_and_clamps() {
    let app = setup().await;
    let svc = &app.service;
    let chef = user(svc, "chef").await;
    let t = tag(svc, "bulk", "#505050").await;
    let ids = ingredients(svc, &[("bean", "g")]).await;
    for i in 0..7 {
        svc.create_recipe(chef.id, draft(&format!("R{i}"), &[t.id], &[(ids["bean"], "1")]))
            .await
            .unwrap();
    }

    let first = svc
        .list_recipes(None, RecipeFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(first.count, 7);
    assert_eq!(first.items.len(), 6);
    assert_eq!(first.page, 1);

    let second = svc
        .list_recipes(
            None,
            RecipeFilter::default(),
            PageRequest {
                page: Some(2),
                limit: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);

    let clamped = svc
        .list_recipes(
            None,
            RecipeFilter::default(),
            PageRequest {
                page: None,
                limit: Some(10_000),
            },
        )
        .await
        .unwrap();
    assert_eq!(clamped.limit, 100);

    let err = svc
        .list_recipes(
            None,
            RecipeFilter::default(),
            PageRequest {
                page: Some(0),
                limit: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn oversized_page_and_recipes_limit_are_rejected() {
    let app = setup().await;
    let svc = &app.service;
    let reader = user(svc, "reader").await;
    let author = user(svc, "author").await;

    let err = svc
        .list_recipes(
            None,
            RecipeFilter::default(),
            PageRequest {
                page: Some(u64::MAX),
                limit: Some(10),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "page"));

    // Far past the end but still addressable: an empty page, not an error.
    let empty = svc
        .list_recipes(
            None,
            RecipeFilter::default(),
            PageRequest {
                page: Some(1_000_000),
                limit: Some(10),
            },
        )
        .await
        .unwrap();
    assert!(empty.items.is_empty());

    let err = svc
        .list_users(
            None,
            PageRequest {
                page: Some(u64::MAX / 2),
                limit: Some(100),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = svc
        .subscribe(reader.id, author.id, Some(u64::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "recipes_limit"));
    // Rejected before anything was written.
    svc.subscribe(reader.id, author.id, None).await.unwrap();

    let err = svc
        .list_subscriptions(reader.id, PageRequest::default(), Some(u64::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let page = svc
        .list_subscriptions(reader.id, PageRequest::default(), Some(i64::MAX as u64))
        .await
        .unwrap();
    assert_eq!(page.count, 1);
}

#[tokio::test]
async fn catalog_import_and_prefix_search() {
    let app = setup().await;
    let client = app.module.client();

    let written = client
        .import_ingredients_csv("Flour,g\nflaxseed,g\n\"Salt, sea\",pinch\nSugar,g\n".to_string())
        .await
        .unwrap();
    assert_eq!(written, 4);

    let found = client.list_ingredients(Some("FL".to_string())).await.unwrap();
    let names: Vec<_> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Flour") && names.contains(&"flaxseed"));

    let salt = client.list_ingredients(Some("salt".to_string())).await.unwrap();
    assert_eq!(salt.len(), 1);
    assert_eq!(salt[0].name, "Salt, sea");

    let none = client.list_ingredients(Some("%".to_string())).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn duplicate_users_and_tags_conflict() {
    let app = setup().await;
    let client = app.module.client();
    let svc = &app.service;
    user(svc, "chef").await;
    tag(svc, "vegan", "#606060").await;

    let dup_user = client
        .create_user(recipes::contract::model::NewUser {
            email: "chef@example.com".into(),
            username: "someone".into(),
            first_name: "A".into(),
            last_name: "B".into(),
        })
        .await;
    assert!(matches!(dup_user, Err(RecipesError::Conflict { .. })));

    let dup_tag = client
        .create_tag(recipes::contract::model::NewTag {
            name: "vegan2".into(),
            color: "#606060".into(),
            slug: "vegan2".into(),
        })
        .await;
    assert!(matches!(dup_tag, Err(RecipesError::Conflict { .. })));
}
