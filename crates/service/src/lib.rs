//! Service layer providing the company registry business operations.
//! - Separates business logic from data access through repository traits.
//! - Reuses entity definitions and tax-id rules from the `models` crate.
//! - Notifications are dispatched on detached tasks and never fail a request.

pub mod errors;
pub mod pagination;
pub mod company;
pub mod notification;
#[cfg(test)]
pub mod test_support;
