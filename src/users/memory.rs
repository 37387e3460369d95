use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::users::repo::{StoreError, StoreResult, UserStore};
use crate::users::repo_types::{NewUser, User};

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

/// Process-local [`UserStore`]. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner.rows.values().any(|u| u.mobile == user.mobile) {
            return Err(StoreError::DuplicateMobile(user.mobile));
        }
        inner.next_id += 1;
        let user = user.with_id(inner.next_id);
        inner.rows.insert(user.user_id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&user.user_id) {
            Some(row) => {
                *row = User {
                    mobile: row.mobile.clone(),
                    created_date: row.created_date,
                    ..user.clone()
                };
                Ok(row.clone())
            }
            None => Err(StoreError::Database(sqlx::Error::RowNotFound)),
        }
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<()> {
        self.inner.write().await.rows.clear();
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.inner.read().await.rows.contains_key(&id))
    }

    async fn exists_by_mobile(&self, mobile: &str) -> StoreResult<bool> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .any(|u| u.mobile == mobile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn new_user(mobile: &str) -> NewUser {
        NewUser {
            first_name: Some("Jane".into()),
            last_name: "Doe".into(),
            email: None,
            password: None,
            address: None,
            created_date: OffsetDateTime::now_utc(),
            mobile: mobile.into(),
            user_status: 0,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = InMemoryUserStore::default();
        let a = store.insert(new_user("1")).await.unwrap();
        let b = store.insert(new_user("2")).await.unwrap();
        assert_eq!((a.user_id, b.user_id), (1, 2));

        store.delete_all().await.unwrap();
        let c = store.insert(new_user("3")).await.unwrap();
        assert_eq!(c.user_id, 3);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_mobile() {
        let store = InMemoryUserStore::default();
        store.insert(new_user("555-0100")).await.unwrap();
        let err = store.insert(new_user("555-0100")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateMobile(m) if m == "555-0100"));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_keeps_mobile_and_created_date() {
        let store = InMemoryUserStore::default();
        let original = store.insert(new_user("555-0101")).await.unwrap();

        let mut changed = original.clone();
        changed.mobile = "other".into();
        changed.last_name = "Smith".into();
        let saved = store.save(&changed).await.unwrap();

        assert_eq!(saved.mobile, "555-0101");
        assert_eq!(saved.created_date, original.created_date);
        assert_eq!(saved.last_name, "Smith");
    }

    #[tokio::test]
    async fn save_of_unknown_id_fails() {
        let store = InMemoryUserStore::default();
        let ghost = new_user("x").with_id(42);
        assert!(store.save(&ghost).await.is_err());
    }

    #[tokio::test]
    async fn find_all_is_in_insertion_order() {
        let store = InMemoryUserStore::default();
        for m in ["c", "a", "b"] {
            store.insert(new_user(m)).await.unwrap();
        }
        let mobiles: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.mobile)
            .collect();
        assert_eq!(mobiles, ["c", "a", "b"]);
    }
}
