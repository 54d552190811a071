use async_trait::async_trait;
use thiserror::Error;

use clientele_core::domain::customer::{Customer, CustomerId};
use clientele_core::errors::ApplicationError;

pub mod customer;
pub mod memory;

pub use customer::SqlCustomerRepository;
pub use memory::InMemoryCustomerRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        Self::Persistence(value.to_string())
    }
}

/// Case-folded form used for name lookups. Full Unicode lowercase, so `É`
/// and `é` compare equal.
pub(crate) fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Storage for customer rows.
///
/// Name lookups (`list_by_first_name`, `find_by_full_name`, `list_by_last_name`)
/// compare [`fold_name`] forms; `name_taken` compares exactly. Listings come back in
/// insertion order. Mutations report the number of affected rows.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;

    async fn list_by_first_name(&self, first_name: &str)
        -> Result<Vec<Customer>, RepositoryError>;

    async fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Customer>, RepositoryError>;

    async fn list_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, RepositoryError>;

    /// Inclusive on both bounds.
    async fn list_by_age_range(&self, min: i32, max: i32)
        -> Result<Vec<Customer>, RepositoryError>;

    /// Whether another row already uses this exact name pair.
    async fn name_taken(
        &self,
        first_name: &str,
        last_name: &str,
        excluding: Option<&CustomerId>,
    ) -> Result<bool, RepositoryError>;

    async fn insert(&self, customer: &Customer) -> Result<u64, RepositoryError>;

    async fn update(&self, customer: &Customer) -> Result<u64, RepositoryError>;

    async fn set_age(&self, ids: &[CustomerId], age: i32) -> Result<u64, RepositoryError>;

    async fn delete(&self, id: &CustomerId) -> Result<u64, RepositoryError>;

    async fn delete_many(&self, ids: &[CustomerId]) -> Result<u64, RepositoryError>;
}
