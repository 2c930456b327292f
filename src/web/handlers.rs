use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::{
    models::{BlogPost, PostDraft},
    Error, Result,
};

use super::AppState;

// A non-numeric id can never match a post.
fn post_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    path.map(|Path(id)| id).map_err(|_| Error::NotFound)
}

fn draft(payload: std::result::Result<Json<PostDraft>, JsonRejection>) -> Result<PostDraft> {
    payload
        .map(|Json(draft)| draft)
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))
}

// 302 Found, which browsers follow with a GET.
pub async fn index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/index.html")])
}

pub async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<BlogPost>>> {
    let posts = state.blog.list_published().await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<BlogPost>> {
    let id = post_id(path)?;
    let post = state.blog.get_published(id).await?.ok_or(Error::NotFound)?;
    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<PostDraft>, JsonRejection>,
) -> Result<Response> {
    let post = state.blog.create(draft(payload)?).await?;
    let location = format!("/api/posts/{}", post.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(post)).into_response())
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<PostDraft>, JsonRejection>,
) -> Result<Json<BlogPost>> {
    let id = post_id(path)?;
    let post = state
        .blog
        .update(id, draft(payload)?)
        .await?
        .ok_or(Error::NotFound)?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let id = post_id(path)?;
    if state.blog.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound)
    }
}

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
