//! Post-specific operations: comment threads and likes.
//!
//! Both are read-modify-write against the stored post; concurrent writers
//! race and the last save wins, same as a full `PUT`.

use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::{Comment, SkillPost};
use crate::state::AppState;
use crate::store::new_document_id;

use super::handlers::{crud_routes, not_found};
use super::{Lookup, ResourceService};

impl ResourceService<SkillPost> {
    /// Appends `comment` to the post's thread, assigning an id and a
    /// timestamp when the caller left them out.
    pub async fn add_comment(
        &self,
        post_id: &str,
        mut comment: Comment,
    ) -> Result<Lookup<SkillPost>, AppError> {
        let content_is_blank = comment
            .content
            .as_deref()
            .map_or(true, |c| c.trim().is_empty());
        if content_is_blank {
            return Err(AppError::Validation(
                "Comment content must not be empty".to_string(),
            ));
        }

        let Some(mut post) = self.store.find_by_id(post_id).await? else {
            return Ok(Lookup::NotFound);
        };

        comment.id.get_or_insert_with(new_document_id);
        comment
            .timestamp
            .get_or_insert_with(|| Utc::now().naive_utc());
        post.comments.push(comment);

        let saved = self.store.save(post).await?;
        info!("Added comment to Post {post_id}");
        Ok(Lookup::Found(saved))
    }

    /// Likes the post for `user_id`, or removes the like if already present.
    pub async fn toggle_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<Lookup<SkillPost>, AppError> {
        let Some(mut post) = self.store.find_by_id(post_id).await? else {
            return Ok(Lookup::NotFound);
        };

        let liked = post.toggle_like(user_id);
        let saved = self.store.save(post).await?;
        info!("User {user_id} liked={liked} Post {post_id}");
        Ok(Lookup::Found(saved))
    }
}

/// POST /api/posts/:id/comments
pub async fn handle_add_comment(
    State(service): State<ResourceService<SkillPost>>,
    Path(id): Path<String>,
    AppJson(comment): AppJson<Comment>,
) -> Result<Json<SkillPost>, AppError> {
    service
        .add_comment(&id, comment)
        .await?
        .found_or_else(|| not_found::<SkillPost>(&id))
        .map(Json)
}

/// PUT /api/posts/:id/likes/:user_id
pub async fn handle_toggle_like(
    State(service): State<ResourceService<SkillPost>>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<Json<SkillPost>, AppError> {
    service
        .toggle_like(&id, &user_id)
        .await?
        .found_or_else(|| not_found::<SkillPost>(&id))
        .map(Json)
}

pub fn routes() -> Router<AppState> {
    crud_routes::<SkillPost>("/api/posts")
        .route("/api/posts/:id/comments", post(handle_add_comment))
        .route("/api/posts/:id/likes/:user_id", put(handle_toggle_like))
}
