use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Number of digits in a CNPJ tax identifier.
pub const TAX_ID_LEN: usize = 14;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub tax_id: String,
    pub trade_name: String,
    pub address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_tax_id(tax_id: &str) -> Result<(), ModelError> {
    if tax_id.len() != TAX_ID_LEN || !tax_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::Validation("tax_id must be exactly 14 digits".into()));
    }
    Ok(())
}

fn require(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

/// Insert a company; `created_at` and `updated_at` share the same instant.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    tax_id: &str,
    trade_name: &str,
    address: Option<&str>,
) -> Result<Model, ModelError> {
    require("name", name)?;
    validate_tax_id(tax_id)?;
    require("trade_name", trade_name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        tax_id: Set(tax_id.to_string()),
        trade_name: Set(trade_name.to_string()),
        address: Set(address.map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::from_db(e, tax_id))
}

pub async fn find_by_tax_id(db: &DatabaseConnection, tax_id: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::TaxId.eq(tax_id))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
