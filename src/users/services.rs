use axum::http::StatusCode;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::users::{
    dto::{BaseResponse, CreateUserRequest, Reply, UpdateUserParams},
    repo::{StoreError, StoreResult, UserStore},
    repo_types::{NewUser, User},
};

pub const USER_EXISTS: &str = "User already exists";
pub const USER_CREATED: &str = "User created successfully";
pub const NO_USERS: &str = "No users found";
pub const USERS_FETCHED: &str = "Users fetched successfully";
pub const ALL_DELETED: &str = "All users deleted successfully";
pub const USER_FETCHED: &str = "User fetched successfully";
pub const USER_UPDATED: &str = "User updated successfully";

fn not_found<T>(id: i64) -> Reply<T> {
    warn!(user_id = id, "user not found");
    // Logical 404 only; the transport status stays 200.
    Reply::ok(BaseResponse::new(
        404,
        format!("No user found with ID: {}", id),
        None,
    ))
}

fn conflict(mobile: &str) -> Reply<User> {
    warn!(%mobile, "user already exists");
    Reply::with_status(
        StatusCode::CONFLICT,
        BaseResponse::new(409, USER_EXISTS, None),
    )
}

/// Registers a user unless its mobile is taken.
///
/// Sent as HTTP 201 with logical code 200. The existence check is only a
/// fast path: a concurrent insert losing on the store's unique constraint
/// gets the same conflict reply.
pub async fn create_user(store: &dyn UserStore, req: CreateUserRequest) -> StoreResult<Reply<User>> {
    if store.exists_by_mobile(&req.mobile).await? {
        return Ok(conflict(&req.mobile));
    }

    let new_user = NewUser {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password: req.password,
        address: req.address,
        created_date: OffsetDateTime::now_utc(),
        mobile: req.mobile,
        user_status: req.user_status,
    };

    let user = match store.insert(new_user).await {
        Ok(u) => u,
        Err(StoreError::DuplicateMobile(mobile)) => return Ok(conflict(&mobile)),
        Err(e) => return Err(e),
    };

    info!(user_id = user.user_id, "user created");
    Ok(Reply::with_status(
        StatusCode::CREATED,
        BaseResponse::new(200, USER_CREATED, Some(user)),
    ))
}

pub async fn list_users(store: &dyn UserStore) -> StoreResult<Reply<Vec<User>>> {
    let users = store.find_all().await?;
    let message = if users.is_empty() { NO_USERS } else { USERS_FETCHED };
    Ok(Reply::ok(BaseResponse::new(200, message, Some(users))))
}

pub async fn delete_all_users(store: &dyn UserStore) -> StoreResult<Reply<()>> {
    store.delete_all().await?;
    info!("all users deleted");
    Ok(Reply::ok(BaseResponse::new(200, ALL_DELETED, None)))
}

pub async fn get_user(store: &dyn UserStore, id: i64) -> StoreResult<Reply<User>> {
    match store.find_by_id(id).await? {
        Some(user) => Ok(Reply::ok(BaseResponse::new(200, USER_FETCHED, Some(user)))),
        None => Ok(not_found(id)),
    }
}

pub async fn delete_user(store: &dyn UserStore, id: i64) -> StoreResult<Reply<()>> {
    if !store.exists_by_id(id).await? {
        return Ok(not_found(id));
    }

    store.delete_by_id(id).await?;
    info!(user_id = id, "user deleted");
    Ok(Reply::ok(BaseResponse::new(
        200,
        format!("User with ID {} deleted successfully", id),
        None,
    )))
}

/// Replaces every mutable field of an existing user.
///
/// `mobile` and `createdDate` are kept. Sent as HTTP 200 with logical code 201.
pub async fn update_user(
    store: &dyn UserStore,
    params: UpdateUserParams,
) -> StoreResult<Reply<User>> {
    let Some(mut user) = store.find_by_id(params.user_id).await? else {
        return Ok(not_found(params.user_id));
    };

    user.first_name = Some(params.first_name);
    user.last_name = params.last_name;
    user.email = Some(params.email);
    user.password = Some(params.password);
    user.address = Some(params.address);
    user.user_status = params.user_status;
    user.updated_date = Some(OffsetDateTime::now_utc());

    let user = store.save(&user).await?;
    info!(user_id = user.user_id, "user updated");
    Ok(Reply::ok(BaseResponse::new(201, USER_UPDATED, Some(user))))
}
