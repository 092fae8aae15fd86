// ABOUTME: Integration tests for roles, departments, countries, volunteers, and identities
// ABOUTME: Exercises the CRUD surface of the reference-data database modules

use anyhow::Result;
use std::time::{SystemTime, UNIX_EPOCH};

use onboarding_service::{
    database::{Database, IdentityInput},
    models::{role_names, User},
};

async fn setup_test_database(name: &str) -> Result<Database> {
    std::fs::create_dir_all("./test_data")?;
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let db_url = format!("sqlite:./test_data/{name}_{nanos}.db");

    Ok(Database::new(&db_url).await?)
}

async fn create_test_user(database: &Database, email: &str) -> Result<i64> {
    let user = User::new(
        email.to_string(),
        "hash".to_string(),
        "Ref".to_string(),
        "Data".to_string(),
    );
    Ok(database.create_user(&user).await?)
}

#[tokio::test]
async fn test_base_roles_are_seeded() -> Result<()> {
    let database = setup_test_database("seeded_roles").await?;

    for name in [role_names::APPLICANT, role_names::VOLUNTEER, role_names::ADMIN] {
        assert!(
            database.get_role_by_name(name).await?.is_some(),
            "role {name} missing"
        );
    }

    // Migrations are idempotent, seeding included
    database.migrate().await?;
    assert_eq!(database.list_roles().await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_role_crud() -> Result<()> {
    let database = setup_test_database("role_crud").await?;

    let id = database.create_role("coordinator").await?;
    let role = database.get_role(id).await?.expect("role exists");
    assert_eq!(role.name, "coordinator");

    assert!(database.update_role(id, "senior-coordinator").await?);
    let role = database.get_role(id).await?.expect("role exists");
    assert_eq!(role.name, "senior-coordinator");

    assert!(database.delete_role(id).await?);
    assert!(database.get_role(id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_department_crud() -> Result<()> {
    let database = setup_test_database("department_crud").await?;

    let id = database
        .create_department("Logistics", Some("12 Harbour Rd"))
        .await?;
    let department = database.get_department(id).await?.expect("exists");
    assert_eq!(department.name, "Logistics");
    assert_eq!(department.address.as_deref(), Some("12 Harbour Rd"));
    assert_eq!(department.status, 1);

    assert!(
        database
            .update_department(id, Some("Field Logistics"), None, Some(0))
            .await?
    );
    let department = database.get_department(id).await?.expect("exists");
    assert_eq!(department.name, "Field Logistics");
    // Address untouched by partial update
    assert_eq!(department.address.as_deref(), Some("12 Harbour Rd"));
    assert_eq!(department.status, 0);

    assert!(database.delete_department(id).await?);
    assert!(!database.update_department(id, Some("gone"), None, None).await?);

    Ok(())
}

#[tokio::test]
async fn test_country_crud() -> Result<()> {
    let database = setup_test_database("country_crud").await?;

    database.create_country("Zambia").await?;
    database.create_country("Albania").await?;

    let countries = database.list_countries().await?;
    assert_eq!(countries.len(), 2);
    // Ordered by name
    assert_eq!(countries[0].name, "Albania");

    // Unique names
    assert!(database.create_country("Albania").await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_volunteer_detail_unique_per_user() -> Result<()> {
    let database = setup_test_database("volunteer_unique").await?;
    let user_id = create_test_user(&database, "vol@test.com").await?;

    let id = database.create_volunteer_detail(user_id, None).await?;
    assert!(database.get_volunteer_detail(id).await?.is_some());

    // One detail per user
    assert!(database.create_volunteer_detail(user_id, None).await.is_err());

    let department_id = database.create_department("Kitchen", None).await?;
    assert!(
        database
            .update_volunteer_detail(id, Some(department_id), Some(0))
            .await?
    );
    let detail = database.get_volunteer_detail(id).await?.expect("exists");
    assert_eq!(detail.department_id, Some(department_id));
    assert_eq!(detail.status, 0);

    assert!(database.delete_volunteer_detail(id).await?);
    assert!(!database.update_volunteer_detail(id, None, Some(1)).await?);

    Ok(())
}

#[tokio::test]
async fn test_identity_documents() -> Result<()> {
    let database = setup_test_database("identities").await?;
    let user_id = create_test_user(&database, "docs@test.com").await?;

    let passport = IdentityInput {
        number: "P1234567".to_string(),
        doc_type: "passport".to_string(),
        expiry_date: "2030-06-30".parse().ok(),
        place_issued: Some("Wellington".to_string()),
    };
    let id = database.create_identity(user_id, &passport).await?;

    let national_id = IdentityInput {
        number: "NID-99".to_string(),
        doc_type: "national_id".to_string(),
        expiry_date: None,
        place_issued: None,
    };
    database.create_identity(user_id, &national_id).await?;

    let documents = database.list_identities_for_user(user_id).await?;
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].number, "P1234567");

    let renewed = IdentityInput {
        number: "P7654321".to_string(),
        doc_type: "passport".to_string(),
        expiry_date: "2035-06-30".parse().ok(),
        place_issued: Some("Auckland".to_string()),
    };
    assert!(database.update_identity(id, &renewed).await?);
    let stored = database.get_identity(id).await?.expect("exists");
    assert_eq!(stored.number, "P7654321");

    assert!(database.delete_identity(id).await?);
    assert_eq!(database.list_identities_for_user(user_id).await?.len(), 1);

    // Documents are removed with their user
    database.delete_user(user_id).await?;
    assert!(database.list_identities_for_user(user_id).await?.is_empty());

    Ok(())
}
