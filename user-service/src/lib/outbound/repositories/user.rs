use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::models::Gender;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserGetter;
use crate::domain::user::ports::UserWriter;
use crate::user::errors::UserError;

const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    username: String,
    password: String,
    phone_number: String,
    gender: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            name: row.name,
            username: row.username,
            phone_number: row.phone_number,
            gender: Gender::from_input(&row.gender),
            password: row.password,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    match e {
        sqlx::Error::PoolTimedOut => UserError::Cancelled(e.to_string()),
        other => UserError::DatabaseError(other.to_string()),
    }
}

#[async_trait]
impl UserWriter for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<UserId, UserError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, name, gender, phone_number, password)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.name)
        .bind(user.gender.as_str())
        .bind(&user.phone_number)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
                {
                    return UserError::UsernameAlreadyExists(user.username.clone());
                }
            }
            database_error(e)
        })?;

        Ok(UserId(id))
    }

    async fn update_login_information(&self, user: &User) -> Result<(), UserError> {
        sqlx::query(
            r#"
            INSERT INTO user_tokens (user_id, success_login_count, last_login_at)
            VALUES ($1, 1, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET
                success_login_count = user_tokens.success_login_count + 1,
                last_login_at = NOW()
            "#,
        )
        .bind(user.id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserGetter for PostgresUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<User, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, username, password, phone_number, gender, created_at, updated_at
            FROM users
            WHERE username = $1
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(User::from)
            .ok_or_else(|| UserError::NotFoundByUsername(username.to_string()))
    }
}
