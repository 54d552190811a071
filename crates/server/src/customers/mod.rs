//! Customer records API.
//!
//! - `POST   /customer/addcustomer`
//! - `GET    /customer/getallcustomers`
//! - `GET    /customer/getcustomerbyid?id=`
//! - `GET    /customer/getcustomerbyfirstname?firstName=`
//! - `GET    /customer/getcustomerbyfirstandlastname?firstName=&lastName=`
//! - `GET    /customer/getcustomersbetweenage?minAge=&maxAge=`
//! - `GET    /customer/getcustomerbycountry?country=`
//! - `PUT    /customer/updatecustomebyid?id=`
//! - `PUT    /customer/updateallcustomersagebylastname?lastName=&newAge=`
//! - `DELETE /customer/deletecustomerbyid?id=`
//! - `DELETE /customer/deletemultiplecustomerbyids?ids=a,b,c`

pub mod handlers;
pub mod service;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub use service::CustomerService;

pub fn router(service: CustomerService) -> Router {
    Router::new()
        .route("/customer/addcustomer", post(handlers::add_customer))
        .route("/customer/getallcustomers", get(handlers::get_all_customers))
        .route("/customer/getcustomerbyid", get(handlers::get_customer_by_id))
        .route("/customer/getcustomerbyfirstname", get(handlers::get_customer_by_first_name))
        .route(
            "/customer/getcustomerbyfirstandlastname",
            get(handlers::get_customer_by_first_and_last_name),
        )
        .route("/customer/getcustomersbetweenage", get(handlers::get_customers_between_age))
        .route("/customer/getcustomerbycountry", get(handlers::get_customer_by_country))
        .route("/customer/updatecustomebyid", put(handlers::update_customer_by_id))
        .route(
            "/customer/updateallcustomersagebylastname",
            put(handlers::update_all_customers_age_by_last_name),
        )
        .route("/customer/deletecustomerbyid", delete(handlers::delete_customer_by_id))
        .route(
            "/customer/deletemultiplecustomerbyids",
            delete(handlers::delete_multiple_customer_by_ids),
        )
        .with_state(service)
}
