use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: u32,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// What `/echo` saw: method, lower-cased headers and the raw body as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub type Db = Arc<RwLock<HashMap<u32, Post>>>;

/// Posts the server starts with, ids `1..=3`.
pub fn seed_posts() -> Vec<Post> {
    (1..=3)
        .map(|id| Post {
            user_id: 1,
            id,
            title: format!("post {id}"),
            body: format!("body of post {id}"),
        })
        .collect()
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(
        seed_posts().into_iter().map(|post| (post.id, post)).collect(),
    ));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post)
                .put(replace_post)
                .patch(update_post)
                .delete(delete_post),
        )
        .route("/echo", any(echo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let posts = db.read().await;
    let mut posts: Vec<Post> = posts.values().cloned().collect();
    posts.sort_by_key(|post| post.id);
    Json(posts)
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<NewPost>,
) -> (StatusCode, Json<Post>) {
    let mut posts = db.write().await;
    let id = posts.keys().max().copied().unwrap_or(0) + 1;
    let post = Post {
        user_id: input.user_id,
        id,
        title: input.title,
        body: input.body,
    };
    posts.insert(id, post.clone());
    tracing::debug!(id, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<Post>, StatusCode> {
    let posts = db.read().await;
    posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_post(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(input): Json<NewPost>,
) -> Result<Json<Post>, StatusCode> {
    let mut posts = db.write().await;
    let post = posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    post.user_id = input.user_id;
    post.title = input.title;
    post.body = input.body;
    Ok(Json(post.clone()))
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(input): Json<PostPatch>,
) -> Result<Json<Post>, StatusCode> {
    let mut posts = db.write().await;
    let post = posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(body) = input.body {
        post.body = body;
    }
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u32>) -> StatusCode {
    let mut posts = db.write().await;
    posts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .unwrap_or(StatusCode::NOT_FOUND)
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.as_str().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_camel_case_keys() {
        let post = Post {
            user_id: 1,
            id: 1,
            title: "test".to_string(),
            body: "test".to_string(),
        };
        let json = serde_json::to_string(&post).unwrap();
        assert_eq!(json, r#"{"userId":1,"id":1,"title":"test","body":"test"}"#);
    }

    #[test]
    fn new_post_ignores_client_supplied_id() {
        let input: NewPost =
            serde_json::from_str(r#"{"userId":2,"id":99,"title":"t","body":"b"}"#).unwrap();
        assert_eq!(input.user_id, 2);
        assert_eq!(input.title, "t");
    }

    #[test]
    fn new_post_rejects_missing_title() {
        let result: Result<NewPost, _> = serde_json::from_str(r#"{"userId":1,"body":"b"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn post_patch_all_fields_optional() {
        let input: PostPatch = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.body.is_none());
    }

    #[test]
    fn seed_posts_are_numbered_from_one() {
        let ids: Vec<u32> = seed_posts().iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
