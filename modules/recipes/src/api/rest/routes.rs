use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the recipes REST surface on `router`.
///
/// Static segments (`/api/users/me`, `/api/recipes/download_shopping_cart`)
/// take precedence over the `{id}` captures next to them.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let api = Router::new()
        // catalog
        .route("/api/tags", get(handlers::list_tags))
        .route("/api/tags/{id}", get(handlers::get_tag))
        .route("/api/ingredients", get(handlers::list_ingredients))
        .route("/api/ingredients/{id}", get(handlers::get_ingredient))
        // recipes
        .route(
            "/api/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route(
            "/api/recipes/download_shopping_cart",
            get(handlers::download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}",
            get(handlers::get_recipe)
                .patch(handlers::update_recipe)
                .delete(handlers::delete_recipe),
        )
        .route(
            "/api/recipes/{id}/favorite",
            post(handlers::add_favorite).delete(handlers::remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart",
            post(handlers::add_to_cart).delete(handlers::remove_from_cart),
        )
        // users
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/me", get(handlers::get_me))
        .route("/api/users/subscriptions", get(handlers::list_subscriptions))
        .route("/api/users/{id}", get(handlers::get_user))
        .route(
            "/api/users/{id}/subscribe",
            post(handlers::subscribe).delete(handlers::unsubscribe),
        )
        .layer(Extension(service));

    router.merge(api)
}
