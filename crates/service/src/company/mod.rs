//! Company module: three-layer architecture (domain, repository, service).
//!
//! Owns the company lifecycle and the tax-id uniqueness rule.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;
pub mod validation;

pub use service::CompanyService;
