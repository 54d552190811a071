use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use clientele_core::domain::customer::{Customer, CustomerDraft, CustomerId};
use clientele_core::errors::CustomerError;
use serde::Deserialize;
use uuid::Uuid;

use super::service::CustomerService;
use crate::error::ApiError;

// Query parameters default to empty/nil so the service, not the extractor,
// decides what a missing value means.

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstNameQuery {
    #[serde(default)]
    pub first_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullNameQuery {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRangeQuery {
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAgeQuery {
    #[serde(default)]
    pub last_name: String,
    pub new_age: Option<i32>,
}

/// `ids` is a comma-separated list of UUIDs.
#[derive(Debug, Deserialize)]
pub struct IdsQuery {
    #[serde(default)]
    pub ids: String,
}

pub async fn add_customer(
    State(service): State<CustomerService>,
    Json(draft): Json<CustomerDraft>,
) -> Result<Json<Customer>, ApiError> {
    let customer = draft.into_customer(CustomerId::generate());
    service.add(&customer).await?;
    Ok(Json(customer))
}

pub async fn get_all_customers(
    State(service): State<CustomerService>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(service.list_all().await?))
}

pub async fn get_customer_by_id(
    State(service): State<CustomerService>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(service.get_by_id(CustomerId(query.id)).await?))
}

pub async fn get_customer_by_first_name(
    State(service): State<CustomerService>,
    Query(query): Query<FirstNameQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(service.list_by_first_name(&query.first_name).await?))
}

pub async fn get_customer_by_first_and_last_name(
    State(service): State<CustomerService>,
    Query(query): Query<FullNameQuery>,
) -> Result<Json<Customer>, ApiError> {
    service
        .get_by_first_and_last_name(&query.first_name, &query.last_name)
        .await?
        .map(Json)
        .ok_or_else(|| {
            CustomerError::NotFound(format!(
                "Customer with name {} {} does not exist",
                query.first_name, query.last_name
            ))
            .into()
        })
}

pub async fn get_customers_between_age(
    State(service): State<CustomerService>,
    Query(query): Query<AgeRangeQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(service.list_by_age_range(query.min_age, query.max_age).await?))
}

pub async fn get_customer_by_country(
    State(service): State<CustomerService>,
    Query(query): Query<CountryQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(service.list_by_country(&query.country).await?))
}

pub async fn update_customer_by_id(
    State(service): State<CustomerService>,
    Query(query): Query<IdQuery>,
    Json(draft): Json<CustomerDraft>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(service.update(CustomerId(query.id), draft).await?))
}

pub async fn update_all_customers_age_by_last_name(
    State(service): State<CustomerService>,
    Query(query): Query<BulkAgeQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(service.bulk_update_age_by_last_name(&query.last_name, query.new_age).await?))
}

pub async fn delete_customer_by_id(
    State(service): State<CustomerService>,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, ApiError> {
    service.delete_by_id(CustomerId(query.id)).await?;
    Ok(StatusCode::OK)
}

pub async fn delete_multiple_customer_by_ids(
    State(service): State<CustomerService>,
    Query(query): Query<IdsQuery>,
) -> Result<StatusCode, ApiError> {
    let ids = parse_id_list(&query.ids)?;
    service.delete_by_ids(&ids).await?;
    Ok(StatusCode::OK)
}

fn parse_id_list(raw: &str) -> Result<Vec<CustomerId>, CustomerError> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            Uuid::parse_str(value)
                .map(CustomerId)
                .map_err(|_| CustomerError::invalid(format!("`{value}` is not a valid customer id")))
        })
        .collect()
}
