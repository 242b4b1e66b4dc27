use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    models::{ListQuery, Pagination},
    Error,
};

use super::{
    views::{
        ErrorTemplate, PostDetailTemplate, PostForm, PostFormTemplate, PostListTemplate,
        DETAIL_FAILED, NOT_FOUND,
    },
    AppState,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub drafts: Option<bool>,
}

impl ListParams {
    pub fn list_query(&self, default_per_page: u32) -> ListQuery {
        ListQuery {
            pagination: Pagination::new(self.page, self.per_page, default_per_page),
            include_drafts: self.drafts.unwrap_or(false),
        }
    }
}

fn render<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => Error::Internal(format!("Template error: {}", e)).into_response(),
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    render(status, ErrorTemplate::new(message))
}

/// Page for a failed lookup or write that is not a form validation problem.
fn failure_page(err: Error) -> Response {
    match err {
        Error::NotFound => error_page(StatusCode::NOT_FOUND, NOT_FOUND),
        err => {
            tracing::error!("Error loading post: {}", err);
            error_page(err.status(), DETAIL_FAILED)
        }
    }
}

/// HTML forms only reach valid UUIDs through links; anything else is a missing post.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Response {
    let query = params.q.clone().unwrap_or_default();
    let list = params.list_query(state.page_size);

    match state.posts.search(&query, list).await {
        Ok(page) => render(StatusCode::OK, PostListTemplate::new(&params, page)),
        Err(e) => {
            tracing::error!("Error fetching posts: {}", e);
            render(e.status(), PostListTemplate::failed(query))
        }
    }
}

pub async fn show_post(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_page(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    let mut post = match state.posts.get_by_id(id).await {
        Ok(post) => post,
        Err(e) => return failure_page(e),
    };

    match state.posts.record_view(id).await {
        Ok(()) => post.metadata.views += 1,
        Err(e) => tracing::warn!(post_id = %id, "Failed to record view: {}", e),
    }

    render(StatusCode::OK, PostDetailTemplate::new(post))
}

pub async fn new_post_form() -> Response {
    render(
        StatusCode::OK,
        PostFormTemplate::create(PostForm::default(), None),
    )
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PostForm>,
) -> Response {
    match state.posts.create(form.to_new_post()).await {
        Ok(_) => Redirect::to("/posts").into_response(),
        Err(Error::Validation(e)) => render(
            StatusCode::UNPROCESSABLE_ENTITY,
            PostFormTemplate::create(form, Some(e.to_string())),
        ),
        Err(e) => {
            tracing::error!("Error saving post: {}", e);
            render(
                e.status(),
                PostFormTemplate::create(form, Some("Failed to save post".to_string())),
            )
        }
    }
}

pub async fn edit_post_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_page(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    match state.posts.get_by_id(id).await {
        Ok(post) => render(
            StatusCode::OK,
            PostFormTemplate::edit(id, PostForm::from_post(&post), None),
        ),
        Err(e) => failure_page(e),
    }
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_page(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    match state.posts.update(id, form.to_patch()).await {
        Ok(_) => Redirect::to("/posts").into_response(),
        Err(Error::Validation(e)) => render(
            StatusCode::UNPROCESSABLE_ENTITY,
            PostFormTemplate::edit(id, form, Some(e.to_string())),
        ),
        Err(Error::NotFound) => error_page(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => {
            tracing::error!("Error saving post: {}", e);
            render(
                e.status(),
                PostFormTemplate::edit(id, form, Some("Failed to save post".to_string())),
            )
        }
    }
}

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
