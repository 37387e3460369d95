use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Envelope wrapped around every `/user` response except the health probe.
///
/// `response_code` is a logical code and does not always agree with the
/// HTTP status the envelope travels under.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T> {
    pub response_code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    pub fn new(response_code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            response_code,
            message: message.into(),
            data,
        }
    }
}

/// A [`BaseResponse`] paired with the HTTP status it is sent with.
#[derive(Debug)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub body: BaseResponse<T>,
}

impl<T> Reply<T> {
    pub fn ok(body: BaseResponse<T>) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn with_status(status: StatusCode, body: BaseResponse<T>) -> Self {
        Self { status, body }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Body of `POST /user/signup`.
///
/// Client-sent `userId`, `createdDate` and `updatedDate` are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub mobile: String,
    #[serde(default)]
    pub user_status: i32,
}

/// Query of `POST /user/updateUser`. Every field is mandatory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserParams {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub user_status: i32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: i64,
}
