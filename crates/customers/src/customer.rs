use serde::{Deserialize, Serialize};

use atelier_core::{CustomerId, DomainError, DomainResult, Entity};

/// A customer that outbound movements can be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    phone: String,
    email: Option<String>,
}

impl Customer {
    /// Create a customer. Name is required; email, when present, gets a
    /// basic shape check.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let email = match email {
            Some(e) => {
                let e = e.trim().to_lowercase();
                if e.is_empty() {
                    None
                } else if !e.contains('@') {
                    return Err(DomainError::validation("invalid email format"));
                } else {
                    Some(e)
                }
            }
            None => None,
        };

        Ok(Self {
            id,
            name: name.trim().to_string(),
            phone: phone.into(),
            email,
        })
    }

    pub fn customer_id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_trims_and_normalizes() {
        let customer = Customer::new(
            CustomerId::new(),
            "  Maria Silva  ",
            "+55 11 98888-0000",
            Some("Maria@Example.com".to_string()),
        )
        .unwrap();

        assert_eq!(customer.name(), "Maria Silva");
        assert_eq!(customer.email(), Some("maria@example.com"));
    }

    #[test]
    fn rejects_empty_name() {
        let err = Customer::new(CustomerId::new(), "   ", "", None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_malformed_email() {
        let err = Customer::new(
            CustomerId::new(),
            "Ana",
            "",
            Some("not-an-email".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn blank_email_collapses_to_none() {
        let customer =
            Customer::new(CustomerId::new(), "Ana", "", Some("   ".to_string())).unwrap();
        assert_eq!(customer.email(), None);
    }
}
