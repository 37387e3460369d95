use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    state::AppState,
    users::{
        dto::{CreateUserRequest, Reply, UpdateUserParams, UserIdQuery},
        repo::StoreError,
        repo_types::User,
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(health))
        .route("/signup", post(create_user))
        .route("/allUsers", get(list_users).delete(delete_all_users))
        .route("/getUser", get(get_user))
        .route("/deleteUser", delete(delete_user))
        .route("/updateUser", post(update_user))
}

type HandlerResult<T> = Result<Reply<T>, (StatusCode, String)>;

pub async fn health() -> &'static str {
    "test"
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> HandlerResult<User> {
    services::create_user(state.store.as_ref(), payload)
        .await
        .map_err(internal)
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> HandlerResult<Vec<User>> {
    services::list_users(state.store.as_ref())
        .await
        .map_err(internal)
}

#[instrument(skip(state))]
pub async fn delete_all_users(State(state): State<AppState>) -> HandlerResult<()> {
    services::delete_all_users(state.store.as_ref())
        .await
        .map_err(internal)
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Query(q): Query<UserIdQuery>,
) -> HandlerResult<User> {
    services::get_user(state.store.as_ref(), q.user_id)
        .await
        .map_err(internal)
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Query(q): Query<UserIdQuery>,
) -> HandlerResult<()> {
    services::delete_user(state.store.as_ref(), q.user_id)
        .await
        .map_err(internal)
}

#[instrument(skip(state, params))]
pub async fn update_user(
    State(state): State<AppState>,
    Query(params): Query<UpdateUserParams>,
) -> HandlerResult<User> {
    services::update_user(state.store.as_ref(), params)
        .await
        .map_err(internal)
}

fn internal(e: StoreError) -> (StatusCode, String) {
    error!(error = %e, "store operation failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
