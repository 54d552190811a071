use std::sync::Arc;

use clientele_core::address::mentions_country;
use clientele_core::domain::customer::{Customer, CustomerDraft, CustomerId};
use clientele_core::errors::{ApplicationError, CustomerError};
use clientele_db::CustomerRepository;
use tracing::info;

/// Validation plus query/mutation logic over a [`CustomerRepository`].
///
/// Name uniqueness is checked with a read before the write and nothing in
/// the store backs it up, so two concurrent writers can both pass the check.
#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Vec<Customer>, ApplicationError> {
        Ok(self.repository.list_all().await?)
    }

    pub async fn get_by_id(&self, id: CustomerId) -> Result<Customer, ApplicationError> {
        if id.is_nil() {
            return Err(CustomerError::NotFound("Id cannot be empty".to_string()).into());
        }

        self.repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CustomerError::missing_id(&id).into())
    }

    /// Case-insensitive; no match is an empty list, not an error.
    pub async fn list_by_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Customer>, ApplicationError> {
        if first_name.is_empty() {
            return Err(CustomerError::invalid("First name cannot be null or empty").into());
        }

        Ok(self.repository.list_by_first_name(first_name).await?)
    }

    pub async fn get_by_first_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Customer>, ApplicationError> {
        if first_name.is_empty() || last_name.is_empty() {
            return Err(CustomerError::invalid(
                "First name and last name cannot be null or empty",
            )
            .into());
        }

        Ok(self.repository.find_by_full_name(first_name, last_name).await?)
    }

    /// Both bounds are required and inclusive. Zero is an ordinary age.
    pub async fn list_by_age_range(
        &self,
        min_age: Option<i32>,
        max_age: Option<i32>,
    ) -> Result<Vec<Customer>, ApplicationError> {
        let (Some(min_age), Some(max_age)) = (min_age, max_age) else {
            return Err(CustomerError::invalid("minAge and maxAge are required").into());
        };

        Ok(self.repository.list_by_age_range(min_age, max_age).await?)
    }

    pub async fn list_by_country(&self, country: &str) -> Result<Vec<Customer>, ApplicationError> {
        if country.is_empty() {
            return Err(CustomerError::invalid("Country cannot be null or empty").into());
        }

        let customers = self.repository.list_all().await?;
        Ok(customers
            .into_iter()
            .filter(|customer| mentions_country(&customer.address, country))
            .collect())
    }

    /// Persists a customer whose id the caller has already assigned.
    pub async fn add(&self, customer: &Customer) -> Result<u64, ApplicationError> {
        if self.repository.name_taken(&customer.first_name, &customer.last_name, None).await? {
            return Err(
                CustomerError::duplicate_name(&customer.first_name, &customer.last_name).into()
            );
        }

        let affected = self.repository.insert(customer).await?;
        info!(
            event_name = "customer.created",
            customer_id = %customer.id,
            "customer created"
        );
        Ok(affected)
    }

    pub async fn update(
        &self,
        id: CustomerId,
        draft: CustomerDraft,
    ) -> Result<Customer, ApplicationError> {
        if id.is_nil() {
            return Err(CustomerError::NotFound("Id cannot be empty".to_string()).into());
        }

        let mut existing =
            self.repository.find_by_id(&id).await?.ok_or_else(|| CustomerError::missing_id(&id))?;

        if self.repository.name_taken(&draft.first_name, &draft.last_name, Some(&id)).await? {
            return Err(CustomerError::duplicate_name(&draft.first_name, &draft.last_name).into());
        }

        existing.apply(draft);
        self.repository.update(&existing).await?;
        info!(
            event_name = "customer.updated",
            customer_id = %id,
            "customer updated"
        );
        Ok(existing)
    }

    /// Sets `age` on every customer whose last name matches, ignoring case.
    pub async fn bulk_update_age_by_last_name(
        &self,
        last_name: &str,
        age: Option<i32>,
    ) -> Result<Vec<Customer>, ApplicationError> {
        if last_name.is_empty() {
            return Err(CustomerError::invalid("lastName cannot be null or empty").into());
        }
        let Some(age) = age else {
            return Err(CustomerError::invalid("newAge is required").into());
        };

        let mut matches = self.repository.list_by_last_name(last_name).await?;
        if matches.is_empty() {
            return Err(CustomerError::NotFound(format!(
                "Customer with lastname {last_name} does not exist"
            ))
            .into());
        }

        let ids: Vec<CustomerId> = matches.iter().map(|customer| customer.id).collect();
        let affected = self.repository.set_age(&ids, age).await?;
        for customer in &mut matches {
            customer.age = age;
        }

        info!(
            event_name = "customer.age_bulk_updated",
            last_name = %last_name,
            affected,
            "customer ages updated"
        );
        Ok(matches)
    }

    pub async fn delete_by_id(&self, id: CustomerId) -> Result<(), ApplicationError> {
        if id.is_nil() {
            return Err(CustomerError::invalid("Id cannot be empty").into());
        }

        if self.repository.delete(&id).await? == 0 {
            return Err(CustomerError::missing_id(&id).into());
        }

        info!(
            event_name = "customer.deleted",
            customer_id = %id,
            "customer deleted"
        );
        Ok(())
    }

    pub async fn delete_by_ids(&self, ids: &[CustomerId]) -> Result<u64, ApplicationError> {
        if ids.is_empty() {
            return Err(CustomerError::invalid("ids cannot be empty").into());
        }

        let removed = self.repository.delete_many(ids).await?;
        if removed == 0 {
            return Err(CustomerError::NotFound("Customers does not exist".to_string()).into());
        }

        info!(
            event_name = "customer.deleted_many",
            requested = ids.len(),
            removed,
            "customers deleted"
        );
        Ok(removed)
    }
}
