//! Supplier models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A supplier that products may reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a supplier
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, max = 100, message = "Supplier name is required"))]
    pub name: String,
    #[validate(length(max = 100))]
    pub contact_person: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CreateSupplierInput {
    /// Treat blank optional form fields as absent
    pub fn normalized(self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value.and_then(|v| {
                let trimmed = v.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
        }

        Self {
            name: self.name.trim().to_string(),
            contact_person: blank_to_none(self.contact_person),
            email: blank_to_none(self.email),
            phone: blank_to_none(self.phone),
            address: blank_to_none(self.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_become_none() {
        let input = CreateSupplierInput {
            name: "  Acme Trading ".to_string(),
            contact_person: Some("".to_string()),
            email: Some("   ".to_string()),
            phone: Some("0917 555 0101".to_string()),
            address: None,
        }
        .normalized();

        assert_eq!(input.name, "Acme Trading");
        assert_eq!(input.contact_person, None);
        assert_eq!(input.email, None);
        assert_eq!(input.phone.as_deref(), Some("0917 555 0101"));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_name_required() {
        let input = CreateSupplierInput::default().normalized();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let input = CreateSupplierInput {
            name: "Acme".to_string(),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }
}
