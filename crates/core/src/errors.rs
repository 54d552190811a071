use thiserror::Error;

use crate::domain::customer::CustomerId;

/// Failures a caller can act on. The message is returned to the client as-is.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CustomerError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    NotFound(String),
}

impl CustomerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn missing_id(id: &CustomerId) -> Self {
        Self::NotFound(format!("Customer with id {id} does not exist"))
    }

    pub fn duplicate_name(first_name: &str, last_name: &str) -> Self {
        Self::AlreadyExists(format!("Customer with name {first_name} {last_name} already exists"))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(message)
            | Self::AlreadyExists(message)
            | Self::NotFound(message) => message,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Customer(#[from] CustomerError),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::domain::customer::CustomerId;
    use crate::errors::{ApplicationError, CustomerError};

    #[test]
    fn missing_id_message_names_the_id() {
        let id = CustomerId(Uuid::new_v4());
        let error = CustomerError::missing_id(&id);

        assert!(matches!(error, CustomerError::NotFound(_)));
        assert_eq!(error.to_string(), format!("Customer with id {id} does not exist"));
    }

    #[test]
    fn duplicate_name_maps_to_already_exists() {
        let error = CustomerError::duplicate_name("Joe", "Smith");

        assert!(matches!(error, CustomerError::AlreadyExists(_)));
        assert_eq!(error.message(), "Customer with name Joe Smith already exists");
    }

    #[test]
    fn customer_errors_pass_their_message_through() {
        let application = ApplicationError::from(CustomerError::invalid("bad input"));

        assert!(matches!(application, ApplicationError::Customer(_)));
        assert_eq!(application.to_string(), "bad input");
    }

    #[test]
    fn persistence_errors_carry_store_detail() {
        let application = ApplicationError::Persistence("database is locked".to_owned());

        assert_eq!(application.to_string(), "persistence failure: database is locked");
    }
}
