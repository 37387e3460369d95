use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Row of `user_data`.
///
/// `password` is stored and returned as given; nothing hashes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_date: Option<OffsetDateTime>,
    pub mobile: String,
    pub user_status: i32,
}

/// A user not yet persisted; the store assigns `user_id`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    pub created_date: OffsetDateTime,
    pub mobile: String,
    pub user_status: i32,
}

impl NewUser {
    pub fn with_id(self, user_id: i64) -> User {
        User {
            user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            address: self.address,
            created_date: self.created_date,
            updated_date: None,
            mobile: self.mobile,
            user_status: self.user_status,
        }
    }
}
