//! Input validation run at the system boundary, before the company service.

use super::domain::{CreateCompanyInput, UpdateCompanyInput};
use crate::errors::{FieldError, ServiceError};

const NAME_REQUIRED: &str = "O nome é obrigatório.";
const TAX_ID_REQUIRED: &str = "O CNPJ é obrigatório.";
const TAX_ID_FORMAT: &str = "CNPJ deve ter 14 dígitos numéricos.";
const TRADE_NAME_REQUIRED: &str = "O nome fantasia é obrigatório.";
const ADDRESS_BLANK: &str = "O endereço não pode ser vazio.";

fn check_tax_id(tax_id: &str, errors: &mut Vec<FieldError>) {
    if tax_id.trim().is_empty() {
        errors.push(FieldError::new("taxId", TAX_ID_REQUIRED));
    } else if models::company::validate_tax_id(tax_id).is_err() {
        errors.push(FieldError::new("taxId", TAX_ID_FORMAT));
    }
}

fn check_required(field: &'static str, value: &str, message: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), ServiceError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

pub fn validate_create(input: &CreateCompanyInput) -> Result<(), ServiceError> {
    let mut errors = Vec::new();
    check_required("name", &input.name, NAME_REQUIRED, &mut errors);
    check_tax_id(&input.tax_id, &mut errors);
    check_required("tradeName", &input.trade_name, TRADE_NAME_REQUIRED, &mut errors);
    if let Some(address) = &input.address {
        check_required("address", address, ADDRESS_BLANK, &mut errors);
    }
    finish(errors)
}

pub fn validate_update(input: &UpdateCompanyInput) -> Result<(), ServiceError> {
    let mut errors = Vec::new();
    if let Some(name) = &input.name {
        check_required("name", name, NAME_REQUIRED, &mut errors);
    }
    if let Some(tax_id) = &input.tax_id {
        check_tax_id(tax_id, &mut errors);
    }
    if let Some(trade_name) = &input.trade_name {
        check_required("tradeName", trade_name, TRADE_NAME_REQUIRED, &mut errors);
    }
    if let Some(address) = &input.address {
        check_required("address", address, ADDRESS_BLANK, &mut errors);
    }
    finish(errors)
}
