//! The static set of declared part attributes.
//!
//! Every key that is not one of these names is a location entry, both in
//! inbound payloads and in search criteria.

/// A declared part attribute, by its external field name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PartAttr {
    Id,
    SerialNumber,
    Name,
    Description,
    CategoryId,
    Quantity,
    Price,
    Location,
}

impl PartAttr {
    pub const ALL: [PartAttr; 8] = [
        PartAttr::Id,
        PartAttr::SerialNumber,
        PartAttr::Name,
        PartAttr::Description,
        PartAttr::CategoryId,
        PartAttr::Quantity,
        PartAttr::Price,
        PartAttr::Location,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartAttr::Id => "id",
            PartAttr::SerialNumber => "serial_number",
            PartAttr::Name => "name",
            PartAttr::Description => "description",
            PartAttr::CategoryId => "category_id",
            PartAttr::Quantity => "quantity",
            PartAttr::Price => "price",
            PartAttr::Location => "location",
        }
    }

    /// Look up a key; `None` means the key is not a declared attribute.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_attribute_round_trips_through_its_key() {
        for attr in PartAttr::ALL {
            assert_eq!(PartAttr::from_key(attr.as_str()), Some(attr));
        }
    }

    #[test]
    fn location_sub_fields_are_not_declared() {
        assert_eq!(PartAttr::from_key("room"), None);
        assert_eq!(PartAttr::from_key("Name"), None);
        assert_eq!(PartAttr::from_key("_id"), None);
    }
}
