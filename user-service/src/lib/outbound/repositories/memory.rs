//! In-memory user store for tests and local runs without Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::LoginInformation;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserGetter;
use crate::domain::user::ports::UserWriter;
use crate::user::errors::UserError;

#[derive(Default)]
struct Store {
    last_id: i64,
    users: HashMap<UserId, User>,
    ids_by_username: HashMap<String, UserId>,
    logins: HashMap<UserId, LoginInformation>,
}

/// User store kept in a `HashMap` behind an async `RwLock`.
///
/// Every write takes the lock once, so the username check and insert, and
/// the login counter increment, are atomic. Data is lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_by_id(&self, id: UserId) -> Option<User> {
        self.store.read().await.users.get(&id).cloned()
    }

    pub async fn login_information(&self, id: UserId) -> Option<LoginInformation> {
        self.store.read().await.logins.get(&id).cloned()
    }
}

#[async_trait]
impl UserWriter for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<UserId, UserError> {
        let mut store = self.store.write().await;

        if store.ids_by_username.contains_key(&user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.clone()));
        }

        store.last_id += 1;
        let id = UserId(store.last_id);
        let now = Utc::now();

        let mut stored = user.clone();
        stored.id = id;
        stored.created_at = Some(now);
        stored.updated_at = Some(now);

        store.ids_by_username.insert(stored.username.clone(), id);
        store.users.insert(id, stored);

        Ok(id)
    }

    async fn update_login_information(&self, user: &User) -> Result<(), UserError> {
        let mut store = self.store.write().await;
        let now = Utc::now();

        store
            .logins
            .entry(user.id)
            .and_modify(|login| {
                login.success_login_count += 1;
                login.last_login_at = now;
            })
            .or_insert(LoginInformation {
                user_id: user.id,
                success_login_count: 1,
                last_login_at: now,
            });

        Ok(())
    }
}

#[async_trait]
impl UserGetter for InMemoryUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<User, UserError> {
        let store = self.store.read().await;

        store
            .ids_by_username
            .get(username)
            .and_then(|id| store.users.get(id))
            .cloned()
            .ok_or_else(|| UserError::NotFoundByUsername(username.to_string()))
    }
}
