//! JSON surface over the same repository the pages use.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    models::{NewPost, Page, Post, PostPatch, PostSummary},
    Result,
};

use super::{
    extract::{ApiJson, ApiPath, ApiQuery},
    handlers::ListParams,
    AppState,
};

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub likes: i64,
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Page<PostSummary>>> {
    let query = params.q.as_deref().unwrap_or_default();
    let page = state
        .posts
        .search(query, params.list_query(state.page_size))
        .await?;

    Ok(Json(page))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Post>> {
    Ok(Json(state.posts.get_by_id(id).await?))
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewPost>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = state.posts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<PostPatch>,
) -> Result<Json<Post>> {
    Ok(Json(state.posts.update(id, patch).await?))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like_post(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<LikeResponse>> {
    let likes = state.posts.like(id).await?;
    Ok(Json(LikeResponse { likes }))
}
