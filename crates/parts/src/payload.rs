//! Inbound part payloads.
//!
//! A payload is an open JSON object. Each key is classified once, against the
//! static [`PartAttr`] set, into either a declared attribute or a location
//! entry; there is no other kind of field.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use warehouse_core::{CategoryId, DomainError, DomainResult};

use crate::field::PartAttr;
use crate::location::Location;
use crate::part::{Part, PartAttributes};

/// One classified payload entry.
#[derive(Debug, Clone, PartialEq)]
pub enum PartField {
    /// A declared part attribute with its raw value.
    Declared(PartAttr, Value),
    /// Anything else; it lands in the part's location map.
    Location(String, Value),
}

impl PartField {
    pub fn classify(key: String, value: Value) -> Self {
        match PartAttr::from_key(&key) {
            Some(attr) => PartField::Declared(attr, value),
            None => PartField::Location(key, value),
        }
    }
}

/// A typed view of a create/update payload.
///
/// Values are type-checked while parsing. Location keys are only checked
/// when the final location is assembled, so the caller controls where that
/// rejection happens relative to its other checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartPayload {
    pub serial_number: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
    /// Explicit `location` object, if one was sent.
    pub location: Option<BTreeMap<String, String>>,
    /// Undeclared top-level keys.
    pub extra_location: Vec<(String, String)>,
}

impl PartPayload {
    pub fn from_json(body: Map<String, Value>) -> DomainResult<Self> {
        let mut payload = PartPayload::default();
        for (key, value) in body {
            match PartField::classify(key, value) {
                PartField::Declared(attr, value) => payload.set_declared(attr, value)?,
                PartField::Location(key, value) => {
                    let value = location_value(&key, value)?;
                    payload.extra_location.push((key, value));
                }
            }
        }
        Ok(payload)
    }

    fn set_declared(&mut self, attr: PartAttr, value: Value) -> DomainResult<()> {
        match attr {
            // Identity is assigned by the store.
            PartAttr::Id => {}
            PartAttr::SerialNumber => self.serial_number = Some(string_value(attr, value)?),
            PartAttr::Name => self.name = Some(string_value(attr, value)?),
            PartAttr::Description => self.description = Some(string_value(attr, value)?),
            PartAttr::CategoryId => self.category_id = Some(string_value(attr, value)?),
            PartAttr::Quantity => self.quantity = Some(quantity_value(value)?),
            PartAttr::Price => self.price = Some(price_value(value)?),
            PartAttr::Location => {
                let Value::Object(map) = value else {
                    return Err(DomainError::validation("location must be an object"));
                };
                let mut entries = BTreeMap::new();
                for (key, value) in map {
                    let value = location_value(&key, value)?;
                    entries.insert(key, value);
                }
                self.location = Some(entries);
            }
        }
        Ok(())
    }

    /// The category reference, with blank strings treated as absent.
    pub fn category_ref(&self) -> Option<&str> {
        self.category_id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Assemble the resulting location: the explicit `location` object if
    /// present, otherwise `base`; then every extra key merged on top.
    pub fn location_over(&self, base: Option<&Location>) -> DomainResult<Location> {
        let mut location = match &self.location {
            Some(entries) => Location::new(entries.clone())?,
            None => base.cloned().unwrap_or_default(),
        };
        location.merge(self.extra_location.iter().cloned())?;
        Ok(location)
    }

    /// Attributes for a new part; every declared field except `location` is required.
    pub fn into_attributes(self, category: CategoryId, location: Location) -> DomainResult<PartAttributes> {
        Ok(PartAttributes {
            serial_number: required(self.serial_number, PartAttr::SerialNumber)?,
            name: required(self.name, PartAttr::Name)?,
            description: required(self.description, PartAttr::Description)?,
            category,
            quantity: required(self.quantity, PartAttr::Quantity)?,
            price: required(self.price, PartAttr::Price)?,
            location,
        })
    }

    /// Attributes for an update: fields present in the payload replace the
    /// current ones.
    pub fn overlay(self, current: &Part, category: CategoryId, location: Location) -> PartAttributes {
        let current = current.attributes();
        PartAttributes {
            serial_number: self.serial_number.unwrap_or_else(|| current.serial_number.clone()),
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self.description.unwrap_or_else(|| current.description.clone()),
            category,
            quantity: self.quantity.unwrap_or(current.quantity),
            price: self.price.unwrap_or(current.price),
            location,
        }
    }
}

fn required<T>(value: Option<T>, attr: PartAttr) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::validation(format!("{} is required", attr.as_str())))
}

fn string_value(attr: PartAttr, value: Value) -> DomainResult<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(DomainError::validation(format!("{} must be a string", attr.as_str()))),
    }
}

fn quantity_value(value: Value) -> DomainResult<u32> {
    let parsed = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|q| u32::try_from(q).ok())
        .ok_or_else(|| DomainError::validation("quantity must be a non-negative integer"))
}

fn price_value(value: Value) -> DomainResult<f64> {
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|p| p.is_finite())
        .ok_or_else(|| DomainError::validation("price must be a number"))
}

/// Location values are strings; numbers are accepted in their decimal form.
fn location_value(key: &str, value: Value) -> DomainResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(DomainError::validation(format!(
            "location value for {key:?} must be a string"
        ))),
    }
}
