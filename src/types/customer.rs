//! Customer roster types

use super::{check_text, Collection, FleetError, Record, RecordId};

/// A customer who may rent cars
///
/// Customers are immutable once added. License and phone are not required to
/// be unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub license: String,
}

impl Customer {
    pub fn new(id: RecordId, details: CustomerDetails) -> Self {
        Customer {
            id,
            name: details.name,
            address: details.address,
            phone: details.phone,
            license: details.license,
        }
    }
}

impl Record for Customer {
    const COLLECTION: Collection = Collection::Customers;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Caller-supplied customer fields
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub license: String,
}

impl CustomerDetails {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        license: impl Into<String>,
    ) -> Self {
        CustomerDetails {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            license: license.into(),
        }
    }

    pub fn validate(self) -> Result<Self, FleetError> {
        check_text("name", &self.name)?;
        check_text("address", &self.address)?;
        check_text("phone", &self.phone)?;
        check_text("license", &self.license)?;
        Ok(self)
    }
}
