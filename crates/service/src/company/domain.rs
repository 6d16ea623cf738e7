use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::PageMeta;

/// Creation input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyInput {
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "cnpj")]
    pub tax_id: String,
    #[serde(default, alias = "nomeFantasia")]
    pub trade_name: String,
    #[serde(default, alias = "endereco")]
    pub address: Option<String>,
}

/// Partial update input; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyInput {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default, alias = "cnpj")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "nomeFantasia")]
    pub trade_name: Option<String>,
    #[serde(default, alias = "endereco")]
    pub address: Option<String>,
}

impl UpdateCompanyInput {
    pub fn apply_to(self, company: &mut Company) {
        if let Some(name) = self.name {
            company.name = name;
        }
        if let Some(tax_id) = self.tax_id {
            company.tax_id = tax_id;
        }
        if let Some(trade_name) = self.trade_name {
            company.trade_name = trade_name;
        }
        if let Some(address) = self.address {
            company.address = Some(address);
        }
    }
}

/// Full company record, as returned by lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i32,
    pub tax_id: String,
    pub name: String,
    pub trade_name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::company::Model> for Company {
    fn from(m: models::company::Model) -> Self {
        Self {
            id: m.id,
            tax_id: m.tax_id,
            name: m.name,
            trade_name: m.trade_name,
            address: m.address,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

/// List projection; `id` and `name` are not exposed in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub tax_id: String,
    pub trade_name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanySummary {
    fn from(c: Company) -> Self {
        Self {
            tax_id: c.tax_id,
            trade_name: c.trade_name,
            address: c.address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// One page of companies plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyPage {
    pub data: Vec<CompanySummary>,
    #[serde(flatten)]
    pub meta: PageMeta,
    pub message: String,
    pub status: String,
}
