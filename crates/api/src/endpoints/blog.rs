//! Typed calls for the `/blog` resource.

use portal_client::http::encode_segment;
use portal_client::HttpClient;
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_models::blog::{BlogCategory, BlogComment, BlogPost, CreatePost, PostQuery, UpdatePost};
use portal_models::NewComment;

/// Calls mounted at `/blog`.
///
/// ```text
/// GET    /blog/posts                  -> list_posts
/// GET    /blog/posts/{slug}           -> get_post
/// POST   /blog/posts                  -> create_post
/// PUT    /blog/posts/{id}             -> update_post
/// DELETE /blog/posts/{id}             -> delete_post
/// GET    /blog/categories             -> list_categories
/// GET    /blog/posts/{id}/comments    -> list_comments
/// POST   /blog/posts/{id}/comments    -> add_comment
/// ```
#[derive(Debug, Clone)]
pub struct BlogApi {
    client: HttpClient,
}

impl BlogApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list_posts(&self, query: &PostQuery) -> ApiResult<Vec<BlogPost>> {
        self.client.get_query("/blog/posts", query).await
    }

    /// Fetch a post by its URL slug.
    pub async fn get_post(&self, slug: &str) -> ApiResult<BlogPost> {
        self.client
            .get(&format!("/blog/posts/{}", encode_segment(slug)))
            .await
    }

    pub async fn create_post(&self, post: &CreatePost) -> ApiResult<BlogPost> {
        self.client.post("/blog/posts", post).await
    }

    pub async fn update_post(&self, id: DbId, update: &UpdatePost) -> ApiResult<BlogPost> {
        self.client.put(&format!("/blog/posts/{id}"), update).await
    }

    pub async fn delete_post(&self, id: DbId) -> ApiResult<()> {
        self.client.delete_unit(&format!("/blog/posts/{id}")).await
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<BlogCategory>> {
        self.client.get("/blog/categories").await
    }

    pub async fn list_comments(&self, post_id: DbId) -> ApiResult<Vec<BlogComment>> {
        self.client
            .get(&format!("/blog/posts/{post_id}/comments"))
            .await
    }

    pub async fn add_comment(&self, post_id: DbId, content: &str) -> ApiResult<BlogComment> {
        let body = NewComment {
            content: content.to_string(),
        };
        self.client
            .post(&format!("/blog/posts/{post_id}/comments"), &body)
            .await
    }
}
