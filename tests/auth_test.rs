// ABOUTME: Integration tests for registration, password verification, and login rules
// ABOUTME: Exercises bcrypt hashing, JWT issuance, and the inactive-user login block

use anyhow::Result;
use std::time::{SystemTime, UNIX_EPOCH};

use onboarding_service::{
    auth::AuthManager,
    database::Database,
    models::{User, UserStatus},
};

async fn setup_test_database(name: &str) -> Result<Database> {
    std::fs::create_dir_all("./test_data")?;
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let db_url = format!("sqlite:./test_data/{name}_{nanos}.db");

    Ok(Database::new(&db_url).await?)
}

#[tokio::test]
async fn test_register_and_verify_password() -> Result<()> {
    let database = setup_test_database("register").await?;

    let password_hash = AuthManager::hash_password("correct horse battery")?;
    let user = User::new(
        "ada@test.com".to_string(),
        password_hash,
        "Ada".to_string(),
        "Lovelace".to_string(),
    );
    let user_id = database.create_user(&user).await?;

    let stored = database
        .get_user_by_email("ada@test.com")
        .await?
        .expect("user exists");
    assert_eq!(stored.id, user_id);
    assert_eq!(stored.status, UserStatus::Pending);

    assert!(AuthManager::verify_password(
        "correct horse battery",
        &stored.password_hash
    )?);
    assert!(!AuthManager::verify_password(
        "wrong password",
        &stored.password_hash
    )?);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_rejected() -> Result<()> {
    let database = setup_test_database("duplicate_email").await?;

    let user = User::new(
        "dup@test.com".to_string(),
        "hash".to_string(),
        "First".to_string(),
        "User".to_string(),
    );
    database.create_user(&user).await?;

    // UNIQUE constraint on email
    assert!(database.create_user(&user).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_inactive_user_cannot_login() -> Result<()> {
    let database = setup_test_database("inactive_login").await?;

    let user = User::new(
        "inactive@test.com".to_string(),
        AuthManager::hash_password("some password")?,
        "In".to_string(),
        "Active".to_string(),
    );
    let user_id = database.create_user(&user).await?;

    database
        .update_user_status(user_id, UserStatus::Inactive)
        .await?;

    let stored = database.get_user(user_id).await?.expect("user exists");
    assert_eq!(stored.status, UserStatus::Inactive);
    assert!(!stored.status.can_login());

    Ok(())
}

#[tokio::test]
async fn test_jwt_issued_for_stored_user() -> Result<()> {
    let database = setup_test_database("jwt_issue").await?;
    let auth_manager = AuthManager::new(b"integration-test-secret".to_vec(), 24);

    let user = User::new(
        "token@test.com".to_string(),
        AuthManager::hash_password("some password")?,
        "Tok".to_string(),
        "En".to_string(),
    );
    let user_id = database.create_user(&user).await?;
    let stored = database.get_user(user_id).await?.expect("user exists");

    let token = auth_manager.generate_token(&stored)?;
    let claims = auth_manager.validate_token(&token)?;
    assert_eq!(claims.user_id()?, user_id);
    assert_eq!(claims.email, "token@test.com");

    Ok(())
}
