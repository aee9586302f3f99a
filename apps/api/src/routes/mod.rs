pub mod chat;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::models::{ContactForm, Enrollment, Learning, Skill};
use crate::resources::{handlers::crud_routes, posts, progress};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .merge(crud_routes::<ContactForm>("/api/contacts"))
        .merge(crud_routes::<Enrollment>("/api/enrollments"))
        .merge(crud_routes::<Learning>("/api/learnings"))
        .merge(crud_routes::<Skill>("/api/skills"))
        .merge(posts::routes())
        .merge(progress::routes())
        .route("/api/chat", post(chat::handle_chat))
        .with_state(state)
}
