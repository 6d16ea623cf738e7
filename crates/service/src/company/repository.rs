use async_trait::async_trait;

use super::domain::{Company, CreateCompanyInput};
use crate::errors::ServiceError;

/// Repository abstraction for company persistence.
///
/// Implementations must enforce `tax_id` uniqueness themselves and report a
/// violation as [`ServiceError::Conflict`].
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Company>, ServiceError>;
    /// Rows ordered by `created_at DESC, id DESC`, plus the total row count.
    async fn find_page(&self, offset: u64, limit: u64) -> Result<(Vec<Company>, u64), ServiceError>;
    async fn insert(&self, input: &CreateCompanyInput) -> Result<Company, ServiceError>;
    /// Persist every field of `company` and refresh `updated_at`.
    async fn save(&self, company: &Company) -> Result<Company, ServiceError>;
    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        rows: Vec<Company>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockCompanyRepository {
        state: Mutex<State>,
        failing: AtomicBool,
    }

    impl MockCompanyRepository {
        /// Make every subsequent call fail as an infrastructure error.
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub async fn len(&self) -> usize {
            self.state.lock().await.rows.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ServiceError::Repository("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CompanyRepository for MockCompanyRepository {
        async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Company>, ServiceError> {
            self.check()?;
            let state = self.state.lock().await;
            Ok(state.rows.iter().find(|c| c.tax_id == tax_id).cloned())
        }

        async fn find_page(&self, offset: u64, limit: u64) -> Result<(Vec<Company>, u64), ServiceError> {
            self.check()?;
            let state = self.state.lock().await;
            let mut rows = state.rows.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            let total = rows.len() as u64;
            let page = rows.into_iter().skip(offset as usize).take(limit as usize).collect();
            Ok((page, total))
        }

        async fn insert(&self, input: &CreateCompanyInput) -> Result<Company, ServiceError> {
            self.check()?;
            let mut state = self.state.lock().await;
            if state.rows.iter().any(|c| c.tax_id == input.tax_id) {
                return Err(ServiceError::Conflict(input.tax_id.clone()));
            }
            state.last_id += 1;
            let now = Utc::now();
            let company = Company {
                id: state.last_id,
                tax_id: input.tax_id.clone(),
                name: input.name.clone(),
                trade_name: input.trade_name.clone(),
                address: input.address.clone(),
                created_at: now,
                updated_at: now,
            };
            state.rows.push(company.clone());
            Ok(company)
        }

        async fn save(&self, company: &Company) -> Result<Company, ServiceError> {
            self.check()?;
            let mut state = self.state.lock().await;
            if state.rows.iter().any(|c| c.tax_id == company.tax_id && c.id != company.id) {
                return Err(ServiceError::Conflict(company.tax_id.clone()));
            }
            let row = state
                .rows
                .iter_mut()
                .find(|c| c.id == company.id)
                .ok_or_else(|| ServiceError::not_found(&company.tax_id))?;
            *row = Company { updated_at: Utc::now(), created_at: row.created_at, ..company.clone() };
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            self.check()?;
            let mut state = self.state.lock().await;
            let before = state.rows.len();
            state.rows.retain(|c| c.id != id);
            Ok(state.rows.len() < before)
        }
    }
}
