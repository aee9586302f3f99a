//! User- and course-scoped progress queries, served from the store's
//! `userId` / `courseId` indexes.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::errors::AppError;
use crate::models::SkillProgress;
use crate::state::AppState;

use super::handlers::crud_routes;
use super::ResourceService;

impl ResourceService<SkillProgress> {
    /// Every progress record owned by `user_id`.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<SkillProgress>, AppError> {
        self.list_by("userId", user_id).await
    }

    pub async fn list_by_course(&self, course_id: &str) -> Result<Vec<SkillProgress>, AppError> {
        self.list_by("courseId", course_id).await
    }
}

/// GET /api/progress/user/:user_id
pub async fn handle_list_by_user(
    State(service): State<ResourceService<SkillProgress>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SkillProgress>>, AppError> {
    Ok(Json(service.list_by_user(&user_id).await?))
}

/// GET /api/progress/course/:course_id
pub async fn handle_list_by_course(
    State(service): State<ResourceService<SkillProgress>>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<SkillProgress>>, AppError> {
    Ok(Json(service.list_by_course(&course_id).await?))
}

pub fn routes() -> Router<AppState> {
    crud_routes::<SkillProgress>("/api/progress")
        .route("/api/progress/user/:user_id", get(handle_list_by_user))
        .route("/api/progress/course/:course_id", get(handle_list_by_course))
}
