//! HTTP request handlers for the API server.
//!
//! Translates requests into repository calls and serializes results using
//! axum. One parametrized create/list pair serves both content kinds; the
//! articles surface adds category and free-text filters.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use byline_domain::page::DEFAULT_LIMIT;
use byline_domain::traits::ContentStore;
use byline_domain::{
    Article, ArticleDraft, ArticleFilter, ContentDraft, ContentItem, ContentKind, Page,
};
use byline_read::Reader;
use byline_store::{SqliteStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Shared application state
///
/// The store handle is acquired per request and released on every exit
/// path; rusqlite connections are not Sync, hence the mutex.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend, shared across requests
    pub store: Arc<Mutex<SqliteStore>>,
}

impl AppState {
    /// Wrap a store for sharing across handlers
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Request body for creating a blog post or news item
#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    /// Author name
    pub author: String,
    /// Title
    pub title: String,
    /// Body text
    pub body: String,
    /// Requested tag names; duplicates collapse to one association
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A content item as returned by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Item identifier
    pub id: i64,
    /// Author name
    pub author: String,
    /// Title
    pub title: String,
    /// Body text
    pub body: String,
    /// Resolved tag names, deduplicated
    pub tags: Vec<String>,
}

impl From<ContentItem> for ContentResponse {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id.value(),
            author: item.author,
            title: item.title,
            body: item.body,
            tags: item.tags.into_iter().map(|t| t.name).collect(),
        }
    }
}

/// Request body for creating an article
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Category name, resolved to an existing category or created
    pub category: String,
}

/// An article as returned by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleResponse {
    /// Article identifier
    pub id: i64,
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Category name
    pub category: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.value(),
            title: article.title,
            content: article.content,
            category: article.category.name,
        }
    }
}

/// Pagination query parameters (`?skip=&limit=`)
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Number of leading items to skip
    pub skip: Option<u32>,
    /// Maximum number of items to return
    pub limit: Option<u32>,
}

impl ListQuery {
    /// The page to request, or `None` to let the read service pick defaults
    fn page(&self) -> Option<Page> {
        match (self.skip, self.limit) {
            (None, None) => None,
            (skip, limit) => Some(Page::new(
                skip.unwrap_or(0),
                limit.unwrap_or(DEFAULT_LIMIT),
            )),
        }
    }
}

/// Article listing query parameters (`?category=&search=&skip=&limit=`)
#[derive(Debug, Default, Deserialize)]
pub struct ArticleListQuery {
    /// Exact category name to filter by
    pub category: Option<String>,
    /// Free-text fragment searched in title and content
    pub search: Option<String>,
    /// Number of leading items to skip
    pub skip: Option<u32>,
    /// Maximum number of items to return
    pub limit: Option<u32>,
}

impl ArticleListQuery {
    fn filter(&self) -> ArticleFilter {
        ArticleFilter {
            category: self.category.clone(),
            search: self.search.clone(),
        }
    }

    fn page(&self) -> Option<Page> {
        ListQuery {
            skip: self.skip,
            limit: self.limit,
        }
        .page()
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum ApiError {
    /// Caller's fault: malformed or missing required input
    Validation(String),
    /// Storage backend failure
    Storage(String),
    /// Internal server error
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => ApiError::Validation(msg),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

/// Create an item of the given kind inside one store acquisition
fn create_content(
    state: &AppState,
    kind: ContentKind,
    request: CreateContentRequest,
) -> Result<ContentResponse, ApiError> {
    let mut store = state
        .store
        .lock()
        .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))?;

    let draft = ContentDraft::new(request.author, request.title, request.body, request.tags);
    let item = store.create(kind, draft)?;

    debug!("created {} {} with {} tags", kind, item.id, item.tags.len());

    Ok(item.into())
}

/// List items of the given kind inside one store acquisition
fn list_content(
    state: &AppState,
    kind: ContentKind,
    query: &ListQuery,
) -> Result<Vec<ContentResponse>, ApiError> {
    let store = state
        .store
        .lock()
        .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))?;

    let reader = Reader::new(&*store);
    let items = match kind {
        ContentKind::Blog => reader.blogs(query.page())?,
        ContentKind::News => reader.news(query.page())?,
    };

    Ok(items.into_iter().map(ContentResponse::from).collect())
}

/// POST /blogs/ - Create a blog post
async fn create_blog(
    State(state): State<AppState>,
    Json(request): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let created = create_content(&state, ContentKind::Blog, request)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /blogs/ - List blog posts
async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    Ok(Json(list_content(&state, ContentKind::Blog, &query)?))
}

/// POST /news/ - Create a news item
async fn create_news(
    State(state): State<AppState>,
    Json(request): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let created = create_content(&state, ContentKind::News, request)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /news/ - List news items
async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    Ok(Json(list_content(&state, ContentKind::News, &query)?))
}

/// POST /articles/ - Create an article
async fn create_article(
    State(state): State<AppState>,
    Json(request): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ArticleResponse>), ApiError> {
    let mut store = state
        .store
        .lock()
        .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))?;

    let draft = ArticleDraft::new(request.title, request.content, request.category);
    let article = store.create_article(draft)?;

    debug!("created article {}", article.id);

    Ok((StatusCode::CREATED, Json(article.into())))
}

/// GET /articles/ - List articles with optional category/search filters
async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let store = state
        .store
        .lock()
        .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))?;

    let reader = Reader::new(&*store);
    let articles = reader.articles(&query.filter(), query.page())?;

    Ok(Json(
        articles.into_iter().map(ArticleResponse::from).collect(),
    ))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/blogs/", post(create_blog).get(list_blogs))
        .route("/news/", post(create_news).get(list_news))
        .route("/articles/", post(create_article).get(list_articles))
        .route("/health", get(health_check))
        .with_state(state)
}
