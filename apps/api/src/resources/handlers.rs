use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

use super::{Resource, ResourceService};

pub(super) fn not_found<T: Resource>(id: &str) -> AppError {
    AppError::NotFound(format!("{} {id} not found", T::NAME))
}

/// POST /api/<resource>
pub async fn handle_create<T: Resource>(
    State(service): State<ResourceService<T>>,
    AppJson(record): AppJson<T>,
) -> Result<Json<T>, AppError> {
    Ok(Json(service.create(record).await?))
}

/// GET /api/<resource>
pub async fn handle_list<T: Resource>(
    State(service): State<ResourceService<T>>,
) -> Result<Json<Vec<T>>, AppError> {
    Ok(Json(service.list().await?))
}

/// GET /api/<resource>/:id
pub async fn handle_get<T: Resource>(
    State(service): State<ResourceService<T>>,
    Path(id): Path<String>,
) -> Result<Json<T>, AppError> {
    service
        .get_by_id(&id)
        .await?
        .found_or_else(|| not_found::<T>(&id))
        .map(Json)
}

/// PUT /api/<resource>/:id
pub async fn handle_update<T: Resource>(
    State(service): State<ResourceService<T>>,
    Path(id): Path<String>,
    AppJson(record): AppJson<T>,
) -> Result<Json<T>, AppError> {
    service
        .update(&id, record)
        .await?
        .found_or_else(|| not_found::<T>(&id))
        .map(Json)
}

/// DELETE /api/<resource>/:id
pub async fn handle_delete<T: Resource>(
    State(service): State<ResourceService<T>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The five CRUD routes for `T` under `prefix`. `PUT` is only mounted when
/// the type's update policy allows updates.
pub fn crud_routes<T>(prefix: &str) -> Router<AppState>
where
    T: Resource,
    ResourceService<T>: FromRef<AppState>,
{
    let item = get(handle_get::<T>).delete(handle_delete::<T>);
    let item = if T::UPDATE_POLICY.allows_update() {
        item.put(handle_update::<T>)
    } else {
        item
    };

    Router::new()
        .route(prefix, get(handle_list::<T>).post(handle_create::<T>))
        .route(&format!("{prefix}/:id"), item)
}
