use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil UUID doubles as "no id supplied" on the wire.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub address: String,
}

/// Mutable customer fields as submitted by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub address: String,
}

impl CustomerDraft {
    pub fn into_customer(self, id: CustomerId) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            address: self.address,
        }
    }
}

impl Customer {
    /// Overwrites every mutable field, keeping the identifier.
    pub fn apply(&mut self, draft: CustomerDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.age = draft.age;
        self.address = draft.address;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::{Customer, CustomerDraft, CustomerId};

    #[test]
    fn customer_serializes_with_camel_case_fields() {
        let id = Uuid::parse_str("fa4a05bb-03c8-4d3f-a3c2-4c1d8b44f9b3").expect("uuid");
        let customer = Customer {
            id: CustomerId(id),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            age: 30,
            address: "Netherlands".to_string(),
        };

        let value = serde_json::to_value(&customer).expect("serialize");

        assert_eq!(
            value,
            json!({
                "id": "fa4a05bb-03c8-4d3f-a3c2-4c1d8b44f9b3",
                "firstName": "Jane",
                "lastName": "Smith",
                "age": 30,
                "address": "Netherlands"
            })
        );
    }

    #[test]
    fn draft_requires_every_field() {
        let missing_age = serde_json::from_value::<CustomerDraft>(json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "address": "Netherlands"
        }));

        assert!(missing_age.is_err());
    }

    #[test]
    fn apply_keeps_identifier() {
        let id = CustomerId::generate();
        let mut customer = CustomerDraft {
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            age: 30,
            address: "Amsterdam, Netherlands".to_string(),
        }
        .into_customer(id);

        customer.apply(CustomerDraft {
            first_name: "Joseph".to_string(),
            last_name: "Smit".to_string(),
            age: 31,
            address: "Brussels, Belgium".to_string(),
        });

        assert_eq!(customer.id, id);
        assert_eq!(customer.first_name, "Joseph");
        assert_eq!(customer.last_name, "Smit");
        assert_eq!(customer.age, 31);
    }

    #[test]
    fn default_id_is_nil() {
        assert!(CustomerId::default().is_nil());
        assert!(!CustomerId::generate().is_nil());
    }
}
