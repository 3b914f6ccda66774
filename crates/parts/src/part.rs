
use warehouse_core::{CategoryId, DomainError, DomainResult, Entity, PartId};

use crate::location::Location;

/// Longest accepted serial number or part name, in characters.
pub const MAX_TEXT_LEN: usize = 100;

/// Everything about a part except its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PartAttributes {
    pub serial_number: String,
    pub name: String,
    pub description: String,
    pub category: CategoryId,
    pub quantity: u32,
    pub price: f64,
    pub location: Location,
}

/// A stored part.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    id: PartId,
    attrs: PartAttributes,
}

impl Part {
    /// Build a part record, validating field constraints.
    ///
    /// Category kind and serial number uniqueness need the stores and are
    /// checked there.
    pub fn new(id: PartId, attrs: PartAttributes) -> DomainResult<Self> {
        let serial_number = bounded_text("serial_number", &attrs.serial_number)?;
        let name = bounded_text("name", &attrs.name)?;
        if !attrs.price.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        Ok(Self {
            id,
            attrs: PartAttributes {
                serial_number,
                name,
                ..attrs
            },
        })
    }

    pub fn id_typed(&self) -> PartId {
        self.id
    }

    pub fn serial_number(&self) -> &str {
        &self.attrs.serial_number
    }

    pub fn name(&self) -> &str {
        &self.attrs.name
    }

    pub fn description(&self) -> &str {
        &self.attrs.description
    }

    pub fn category(&self) -> CategoryId {
        self.attrs.category
    }

    pub fn quantity(&self) -> u32 {
        self.attrs.quantity
    }

    pub fn price(&self) -> f64 {
        self.attrs.price
    }

    pub fn location(&self) -> &Location {
        &self.attrs.location
    }

    pub fn attributes(&self) -> &PartAttributes {
        &self.attrs
    }
}

impl Entity for Part {
    type Id = PartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn bounded_text(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(DomainError::validation(format!(
            "{field} cannot be longer than {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(value.to_string())
}
