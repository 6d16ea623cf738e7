use crate::company::{self, Entity as CompanyEntity};
use super::connect;
use crate::errors::ModelError;
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::EntityTrait;

fn unique_tax_id() -> String {
    format!("{:014}", uuid::Uuid::new_v4().as_u128() % 100_000_000_000_000)
}

#[tokio::test]
async fn test_company_create_find_delete() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(());
    }
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;

    let tax_id = unique_tax_id();
    let created = company::create(&db, "Acme", &tax_id, "Acme Corp", Some("1 Main St")).await?;
    assert_eq!(created.tax_id, tax_id);
    assert_eq!(created.created_at, created.updated_at);

    let found = company::find_by_tax_id(&db, &tax_id).await?.expect("company exists");
    assert_eq!(found.id, created.id);
    assert_eq!(found.address.as_deref(), Some("1 Main St"));

    let dup = company::create(&db, "Other", &tax_id, "Other", None).await;
    assert!(matches!(dup, Err(ModelError::Duplicate(ref t)) if *t == tax_id));

    CompanyEntity::delete_by_id(created.id).exec(&db).await?;
    assert!(company::find_by_tax_id(&db, &tax_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_company_create_validates_input() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(());
    }
    let db = connect().await?;
    let bad = company::create(&db, "Acme", "123", "Acme Corp", None).await;
    assert!(matches!(bad, Err(ModelError::Validation(_))));
    let blank = company::create(&db, "  ", &unique_tax_id(), "Acme Corp", None).await;
    assert!(matches!(blank, Err(ModelError::Validation(_))));
    Ok(())
}
