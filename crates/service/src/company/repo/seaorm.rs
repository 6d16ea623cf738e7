use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};

use models::company;
use models::errors::ModelError;

use crate::company::domain::{Company, CreateCompanyInput};
use crate::company::repository::CompanyRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

fn from_model_error(err: ModelError) -> ServiceError {
    match err {
        ModelError::Duplicate(tax_id) => ServiceError::Conflict(tax_id),
        other => ServiceError::Model(other),
    }
}

#[async_trait::async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Company>, ServiceError> {
        let found = company::find_by_tax_id(&self.db, tax_id).await.map_err(from_model_error)?;
        Ok(found.map(Company::from))
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<(Vec<Company>, u64), ServiceError> {
        let rows = company::Entity::find()
            .order_by_desc(company::Column::CreatedAt)
            .order_by_desc(company::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        let total = company::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        Ok((rows.into_iter().map(Company::from).collect(), total))
    }

    async fn insert(&self, input: &CreateCompanyInput) -> Result<Company, ServiceError> {
        let created = company::create(
            &self.db,
            &input.name,
            &input.tax_id,
            &input.trade_name,
            input.address.as_deref(),
        )
        .await
        .map_err(from_model_error)?;
        Ok(created.into())
    }

    async fn save(&self, c: &Company) -> Result<Company, ServiceError> {
        let am = company::ActiveModel {
            id: Set(c.id),
            name: Set(c.name.clone()),
            tax_id: Set(c.tax_id.clone()),
            trade_name: Set(c.trade_name.clone()),
            address: Set(c.address.clone()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let updated = am
            .update(&self.db)
            .await
            .map_err(|e| from_model_error(ModelError::from_db(e, &c.tax_id)))?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = company::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
