use std::sync::Arc;

use common::types::Ack;
use tracing::{error, info, instrument, warn};

use super::domain::{Company, CompanyPage, CompanySummary, CreateCompanyInput, UpdateCompanyInput};
use super::repository::CompanyRepository;
use crate::errors::ServiceError;
use crate::notification::NotificationService;
use crate::pagination::{PageMeta, PageRequest};

/// Company lifecycle business service, independent of the web framework.
pub struct CompanyService<R: CompanyRepository> {
    repo: Arc<R>,
    notifier: Arc<NotificationService>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: Arc<R>, notifier: Arc<NotificationService>) -> Self { Self { repo, notifier } }

    /// Register a company and notify subscribers in the background.
    ///
    /// The notification runs on a detached task; its outcome never reaches
    /// the caller.
    ///
    /// # Examples
    /// ```
    /// use service::company::{CompanyService, domain::CreateCompanyInput, repository::mock::MockCompanyRepository};
    /// use service::notification::{NotificationService, mailer::mock::RecordingMailer};
    /// use std::sync::Arc;
    /// let notifier = Arc::new(NotificationService::new(Arc::new(RecordingMailer::default()), vec![]));
    /// let svc = CompanyService::new(Arc::new(MockCompanyRepository::default()), notifier);
    /// let input = CreateCompanyInput { name: "Acme".into(), tax_id: "12345678901234".into(), trade_name: "Acme Corp".into(), address: None };
    /// let ack = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(ack.message, "Empresa com CNPJ 12345678901234 foi criada com sucesso.");
    /// ```
    #[instrument(skip(self, input), fields(tax_id = %input.tax_id))]
    pub async fn create(&self, input: CreateCompanyInput) -> Result<Ack, ServiceError> {
        let company = match self.insert_unique(&input).await {
            Ok(company) => company,
            Err(e @ ServiceError::Conflict(_)) => {
                warn!("{e}");
                return Err(e);
            }
            Err(e) if e.is_validation() => return Err(e),
            Err(e) => {
                error!(err = %e, code = e.code(), "create company failed");
                return Err(ServiceError::Internal(format!("Erro ao criar empresa. Detalhes: {e}")));
            }
        };
        info!(id = company.id, "company_created");

        let message = format!("Empresa com CNPJ {} foi criada com sucesso.", company.tax_id);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            notifier.notify_company_created(&company).await;
        });
        Ok(Ack::success(message))
    }

    async fn insert_unique(&self, input: &CreateCompanyInput) -> Result<Company, ServiceError> {
        if self.repo.find_by_tax_id(&input.tax_id).await?.is_some() {
            return Err(ServiceError::Conflict(input.tax_id.clone()));
        }
        // the unique constraint still catches a concurrent insert of the same tax id
        self.repo.insert(input).await
    }

    /// List companies, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, req: PageRequest) -> Result<CompanyPage, ServiceError> {
        let (rows, total) = self.repo.find_page(req.offset(), req.page_size).await.map_err(|e| {
            error!(err = %e, "list companies failed");
            ServiceError::Internal(format!("Erro ao buscar empresas. Detalhes: {e}"))
        })?;
        Ok(CompanyPage {
            data: rows.into_iter().map(CompanySummary::from).collect(),
            meta: PageMeta::new(total, req),
            message: "Empresas listadas com sucesso.".to_string(),
            status: "success".to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Company, ServiceError> {
        match self.repo.find_by_tax_id(tax_id).await {
            Ok(Some(company)) => Ok(company),
            Ok(None) => {
                let err = ServiceError::not_found(tax_id);
                warn!("{err}");
                Err(err)
            }
            Err(e) => {
                error!(err = %e, "find company failed");
                Err(e)
            }
        }
    }

    /// Merge the supplied fields and refresh `updated_at`.
    ///
    /// Every failure, including infrastructure errors, is reported as not found.
    #[instrument(skip(self, input))]
    pub async fn update(&self, tax_id: &str, input: UpdateCompanyInput) -> Result<Ack, ServiceError> {
        match self.merge_and_save(tax_id, input).await {
            Ok(_) => Ok(Ack::success(format!("Empresa com CNPJ {tax_id} foi atualizada com sucesso."))),
            Err(e) => {
                error!(err = %e, "update company failed");
                Err(ServiceError::NotFound(format!(
                    "Erro ao atualizar empresa com CNPJ {tax_id}. Detalhes: {e}"
                )))
            }
        }
    }

    async fn merge_and_save(&self, tax_id: &str, input: UpdateCompanyInput) -> Result<Company, ServiceError> {
        let mut company = self.find_by_tax_id(tax_id).await?;
        input.apply_to(&mut company);
        self.repo.save(&company).await
    }

    /// Every failure, including infrastructure errors, is reported as not found.
    #[instrument(skip(self))]
    pub async fn delete(&self, tax_id: &str) -> Result<Ack, ServiceError> {
        match self.remove(tax_id).await {
            Ok(company) => Ok(Ack::success(format!(
                "Empresa com CNPJ {} foi excluída com sucesso.",
                company.tax_id
            ))),
            Err(e) => {
                error!(err = %e, "delete company failed");
                Err(ServiceError::NotFound(format!(
                    "Erro ao excluir empresa com CNPJ {tax_id}. Detalhes: {e}"
                )))
            }
        }
    }

    async fn remove(&self, tax_id: &str) -> Result<Company, ServiceError> {
        let company = self.find_by_tax_id(tax_id).await?;
        if !self.repo.delete(company.id).await? {
            return Err(ServiceError::not_found(tax_id));
        }
        info!(id = company.id, "company_deleted");
        Ok(company)
    }
}
