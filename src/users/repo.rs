use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("mobile {0} already registered")]
    DuplicateMobile(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for [`User`] records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user and return it with its assigned id.
    async fn insert(&self, user: NewUser) -> StoreResult<User>;
    /// Overwrite an existing user's row.
    async fn save(&self, user: &User) -> StoreResult<User>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;
    /// All users, oldest id first.
    async fn find_all(&self) -> StoreResult<Vec<User>>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    async fn delete_all(&self) -> StoreResult<()>;
    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;
    async fn exists_by_mobile(&self, mobile: &str) -> StoreResult<bool>;
}

const USER_COLUMNS: &str = "user_id, first_name, last_name, email, password, address, \
                            created_date, updated_date, mobile, user_status";

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Unique constraint on `user_data.mobile`, named in the migration.
const MOBILE_UNIQUE_CONSTRAINT: &str = "user_data_mobile_key";

fn is_mobile_conflict(unique_violation: bool, constraint: Option<&str>) -> bool {
    unique_violation && constraint == Some(MOBILE_UNIQUE_CONSTRAINT)
}

fn map_insert_error(e: sqlx::Error, mobile: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if is_mobile_conflict(db.is_unique_violation(), db.constraint()) {
            return StoreError::DuplicateMobile(mobile.to_string());
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            r#"
            INSERT INTO user_data
                (first_name, last_name, email, password, address, created_date, updated_date, mobile, user_status)
            VALUES ($1, $2, $3, $4, $5, $6, NULL, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.address)
            .bind(user.created_date)
            .bind(&user.mobile)
            .bind(user.user_status)
            .fetch_one(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &user.mobile))
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        let sql = format!(
            r#"
            UPDATE user_data
               SET first_name = $2, last_name = $3, email = $4, password = $5,
                   address = $6, updated_date = $7, user_status = $8
             WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let saved = sqlx::query_as::<_, User>(&sql)
            .bind(user.user_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.address)
            .bind(user.updated_date)
            .bind(user.user_status)
            .fetch_one(&self.db)
            .await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM user_data WHERE user_id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM user_data ORDER BY user_id ASC");
        let rows = sqlx::query_as::<_, User>(&sql).fetch_all(&self.db).await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM user_data WHERE user_id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM user_data").execute(&self.db).await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM user_data WHERE user_id = $1)")
                .bind(id)
                .fetch_one(&self.db)
                .await?;
        Ok(exists)
    }

    async fn exists_by_mobile(&self, mobile: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM user_data WHERE mobile = $1)")
                .bind(mobile)
                .fetch_one(&self.db)
                .await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_mobile_constraint_is_a_mobile_conflict() {
        assert!(is_mobile_conflict(true, Some("user_data_mobile_key")));
        assert!(!is_mobile_conflict(true, Some("user_data_email_key")));
        assert!(!is_mobile_conflict(true, None));
        assert!(!is_mobile_conflict(false, Some("user_data_mobile_key")));
    }

    #[test]
    fn non_database_errors_stay_database_errors() {
        let err = map_insert_error(sqlx::Error::RowNotFound, "555-0100");
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }
}
