pub mod address;
pub mod config;
pub mod domain;
pub mod errors;

pub use address::{address_tokens, mentions_country};
pub use domain::customer::{Customer, CustomerDraft, CustomerId};
pub use errors::{ApplicationError, CustomerError};
