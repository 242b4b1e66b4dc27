use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::{api, handlers, AppState};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_posts))
        .route("/posts", get(handlers::list_posts).post(handlers::create_post))
        .route("/posts/new", get(handlers::new_post_form))
        .route("/posts/:id", get(handlers::show_post).post(handlers::update_post))
        .route("/posts/:id/edit", get(handlers::edit_post_form))
        .route("/api/posts", get(api::list_posts).post(api::create_post))
        .route(
            "/api/posts/:id",
            get(api::get_post)
                .put(api::update_post)
                .delete(api::delete_post),
        )
        .route("/api/posts/:id/like", post(api::like_post))
        .route("/health", get(handlers::health))
}
