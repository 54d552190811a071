use tokio::sync::RwLock;

use clientele_core::domain::customer::{Customer, CustomerId};

use super::{fold_name, CustomerRepository, RepositoryError};

/// Insertion-ordered store used by tests and ephemeral runs.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        Self { customers: RwLock::new(customers.into_iter().collect()) }
    }

    async fn select(&self, predicate: impl Fn(&Customer) -> bool) -> Vec<Customer> {
        let customers = self.customers.read().await;
        customers.iter().filter(|customer| predicate(customer)).cloned().collect()
    }
}

#[async_trait::async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self.customers.read().await.clone())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|customer| customer.id == *id).cloned())
    }

    async fn list_by_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let folded = fold_name(first_name);
        Ok(self.select(|customer| fold_name(&customer.first_name) == folded).await)
    }

    async fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        let (first_name, last_name) = (fold_name(first_name), fold_name(last_name));
        let customers = self.customers.read().await;
        Ok(customers
            .iter()
            .find(|customer| {
                fold_name(&customer.first_name) == first_name
                    && fold_name(&customer.last_name) == last_name
            })
            .cloned())
    }

    async fn list_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, RepositoryError> {
        let folded = fold_name(last_name);
        Ok(self.select(|customer| fold_name(&customer.last_name) == folded).await)
    }

    async fn list_by_age_range(
        &self,
        min: i32,
        max: i32,
    ) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self.select(|customer| (min..=max).contains(&customer.age)).await)
    }

    async fn name_taken(
        &self,
        first_name: &str,
        last_name: &str,
        excluding: Option<&CustomerId>,
    ) -> Result<bool, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().any(|customer| {
            Some(&customer.id) != excluding
                && customer.first_name == first_name
                && customer.last_name == last_name
        }))
    }

    async fn insert(&self, customer: &Customer) -> Result<u64, RepositoryError> {
        let mut customers = self.customers.write().await;
        if customers.iter().any(|existing| existing.id == customer.id) {
            return Err(RepositoryError::Constraint(format!(
                "customer id {} is already stored",
                customer.id
            )));
        }
        customers.push(customer.clone());
        Ok(1)
    }

    async fn update(&self, customer: &Customer) -> Result<u64, RepositoryError> {
        let mut customers = self.customers.write().await;
        match customers.iter_mut().find(|existing| existing.id == customer.id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_age(&self, ids: &[CustomerId], age: i32) -> Result<u64, RepositoryError> {
        let mut customers = self.customers.write().await;
        let mut affected = 0;
        for customer in customers.iter_mut().filter(|customer| ids.contains(&customer.id)) {
            customer.age = age;
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: &CustomerId) -> Result<u64, RepositoryError> {
        self.delete_many(std::slice::from_ref(id)).await
    }

    async fn delete_many(&self, ids: &[CustomerId]) -> Result<u64, RepositoryError> {
        let mut customers = self.customers.write().await;
        let before = customers.len();
        customers.retain(|customer| !ids.contains(&customer.id));
        Ok((before - customers.len()) as u64)
    }
}
