use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use uuid::Uuid;

use clientele_core::domain::customer::{Customer, CustomerId};

use super::{fold_name, CustomerRepository, RepositoryError};
use crate::DbPool;

const SELECT_CUSTOMER: &str = "SELECT id, first_name, last_name, age, address FROM customer";

pub struct SqlCustomerRepository {
    pool: DbPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_many<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let rows: Vec<SqliteRow> = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_customer).collect::<Result<Vec<_>, _>>()
    }
}

fn row_to_customer(row: &SqliteRow) -> Result<Customer, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let first_name: String =
        row.try_get("first_name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let last_name: String =
        row.try_get("last_name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let age: i32 = row.try_get("age").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let address: String =
        row.try_get("address").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let id = Uuid::parse_str(&id)
        .map_err(|e| RepositoryError::Decode(format!("customer id `{id}`: {e}")))?;

    Ok(Customer { id: CustomerId(id), first_name, last_name, age, address })
}

fn push_id_list(builder: &mut QueryBuilder<'_, Sqlite>, ids: &[CustomerId]) {
    builder.push(" WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id.0.to_string());
    }
    separated.push_unseparated(")");
}

#[async_trait::async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let sql = format!("{SELECT_CUSTOMER} ORDER BY rowid");
        self.fetch_many(sqlx::query(&sql)).await
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let sql = format!("{SELECT_CUSTOMER} WHERE id = ?");
        let row = sqlx::query(&sql).bind(id.0.to_string()).fetch_optional(&self.pool).await?;

        match row {
            Some(ref r) => Ok(Some(row_to_customer(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let sql = format!("{SELECT_CUSTOMER} WHERE first_name_folded = ? ORDER BY rowid");
        self.fetch_many(sqlx::query(&sql).bind(fold_name(first_name))).await
    }

    async fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        let sql = format!(
            "{SELECT_CUSTOMER}
             WHERE first_name_folded = ? AND last_name_folded = ?
             ORDER BY rowid LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(fold_name(first_name))
            .bind(fold_name(last_name))
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_customer(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, RepositoryError> {
        let sql = format!("{SELECT_CUSTOMER} WHERE last_name_folded = ? ORDER BY rowid");
        self.fetch_many(sqlx::query(&sql).bind(fold_name(last_name))).await
    }

    async fn list_by_age_range(
        &self,
        min: i32,
        max: i32,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let sql = format!("{SELECT_CUSTOMER} WHERE age >= ? AND age <= ? ORDER BY rowid");
        self.fetch_many(sqlx::query(&sql).bind(min).bind(max)).await
    }

    async fn name_taken(
        &self,
        first_name: &str,
        last_name: &str,
        excluding: Option<&CustomerId>,
    ) -> Result<bool, RepositoryError> {
        let count: i64 = match excluding {
            Some(id) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM customer
                     WHERE first_name = ? AND last_name = ? AND id <> ?",
                )
                .bind(first_name)
                .bind(last_name)
                .bind(id.0.to_string())
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM customer WHERE first_name = ? AND last_name = ?",
                )
                .bind(first_name)
                .bind(last_name)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(count > 0)
    }

    async fn insert(&self, customer: &Customer) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO customer
                 (id, first_name, last_name, age, address, first_name_folded, last_name_folded)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(customer.id.0.to_string())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.age)
        .bind(&customer.address)
        .bind(fold_name(&customer.first_name))
        .bind(fold_name(&customer.last_name))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn update(&self, customer: &Customer) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE customer
             SET first_name = ?, last_name = ?, age = ?, address = ?,
                 first_name_folded = ?, last_name_folded = ?
             WHERE id = ?",
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.age)
        .bind(&customer.address)
        .bind(fold_name(&customer.first_name))
        .bind(fold_name(&customer.last_name))
        .bind(customer.id.0.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn set_age(&self, ids: &[CustomerId], age: i32) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE customer SET age = ");
        builder.push_bind(age);
        push_id_list(&mut builder, ids);

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &CustomerId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM customer WHERE id = ?")
            .bind(id.0.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_many(&self, ids: &[CustomerId]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM customer");
        push_id_list(&mut builder, ids);

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
