//! Physical storage position of a part.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, ValueObject};

/// The only keys a location may carry.
pub const LOCATION_FIELDS: [&str; 6] = ["room", "bookcase", "shelf", "cuvette", "column", "row"];

/// Restricted key/value map describing where a part is stored.
///
/// Always holds a subset of [`LOCATION_FIELDS`]; construction and merging
/// reject anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Location(BTreeMap<String, String>);

impl Location {
    pub fn new(entries: BTreeMap<String, String>) -> DomainResult<Self> {
        for key in entries.keys() {
            check_key(key)?;
        }
        Ok(Self(entries))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the location maps `key` to exactly `value`.
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Overwrite entries with `entries`, rejecting the first unknown key.
    /// On error `self` is left untouched.
    pub fn merge<I>(&mut self, entries: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut next = self.0.clone();
        for (key, value) in entries {
            check_key(&key)?;
            next.insert(key, value);
        }
        self.0 = next;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for Location {}

impl TryFrom<BTreeMap<String, String>> for Location {
    type Error = DomainError;

    fn try_from(value: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Location> for BTreeMap<String, String> {
    fn from(value: Location) -> Self {
        value.0
    }
}

fn check_key(key: &str) -> DomainResult<()> {
    if LOCATION_FIELDS.contains(&key) {
        Ok(())
    } else {
        Err(DomainError::InvalidLocationField(key.to_string()))
    }
}
