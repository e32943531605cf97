//! Repository tests against a live Postgres.
//!
//! Run with `DATABASE_URL` pointing at a server that allows `CREATE DATABASE`
//! and `--ignored`.

mod common;

use common::TestDb;
use user_service::domain::user::models::Gender;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::ports::UserGetter;
use user_service::domain::user::ports::UserWriter;
use user_service::outbound::repositories::PostgresUserRepository;
use user_service::user::errors::UserError;

fn user(username: &str) -> User {
    User {
        id: UserId::UNSET,
        name: "Alice Example".to_string(),
        username: username.to_string(),
        phone_number: "+628123123123".to_string(),
        gender: Gender::Female,
        password: "$argon2id$stored".to_string(),
        created_at: None,
        updated_at: None,
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_create_and_get_by_username() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let id = repository.create(&user("alice_01")).await.unwrap();
    assert!(id.is_set());

    let stored = repository.get_by_username("alice_01").await.unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.gender, Gender::Female);
    assert!(stored.created_at.is_some());
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_duplicate_username_is_a_conflict() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository.create(&user("alice_01")).await.unwrap();
    let result = repository.create(&user("alice_01")).await;

    assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_unknown_username_is_not_found() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let result = repository.get_by_username("nobody_here").await;

    assert!(matches!(result, Err(UserError::NotFoundByUsername(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_login_information_upserts() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let id = repository.create(&user("alice_01")).await.unwrap();
    let stored = repository.get_by_username("alice_01").await.unwrap();
    repository.update_login_information(&stored).await.unwrap();
    repository.update_login_information(&stored).await.unwrap();

    let count: i64 =
        sqlx::query_scalar("SELECT success_login_count FROM user_tokens WHERE user_id = $1")
            .bind(id.0)
            .fetch_one(&db.pool)
            .await
            .unwrap();
    assert_eq!(count, 2);
}
