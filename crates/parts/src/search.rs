//! Search criteria compiled into a predicate over parts.
//!
//! Keys naming a declared attribute filter that attribute by equality. Every
//! other key filters the location map: the part must map that key to exactly
//! that value. All criteria must hold.

use warehouse_core::{CategoryId, DomainResult, PartId};

use crate::field::PartAttr;
use crate::part::Part;

/// Equality filter on one declared attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    Id(PartId),
    SerialNumber(String),
    Name(String),
    Description(String),
    Category(CategoryId),
    Quantity(u32),
    Price(f64),
    /// The value can never equal the attribute (unparsable number, or a
    /// string compared against the location object).
    Unsatisfiable,
}

/// One compiled criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Field(FieldFilter),
    Location { key: String, value: String },
}

impl Criterion {
    /// Compile a single `key=value` pair. Identifier-typed attributes are
    /// parsed here, so a malformed id fails before any store is read.
    pub fn parse(key: &str, value: &str) -> DomainResult<Self> {
        let Some(attr) = PartAttr::from_key(key) else {
            return Ok(Criterion::Location {
                key: key.to_string(),
                value: value.to_string(),
            });
        };
        let filter = match attr {
            PartAttr::Id => FieldFilter::Id(PartId::parse(value)?),
            PartAttr::CategoryId => FieldFilter::Category(CategoryId::parse(value)?),
            PartAttr::SerialNumber => FieldFilter::SerialNumber(value.to_string()),
            PartAttr::Name => FieldFilter::Name(value.to_string()),
            PartAttr::Description => FieldFilter::Description(value.to_string()),
            PartAttr::Quantity => value
                .trim()
                .parse()
                .map(FieldFilter::Quantity)
                .unwrap_or(FieldFilter::Unsatisfiable),
            PartAttr::Price => value
                .trim()
                .parse()
                .map(FieldFilter::Price)
                .unwrap_or(FieldFilter::Unsatisfiable),
            PartAttr::Location => FieldFilter::Unsatisfiable,
        };
        Ok(Criterion::Field(filter))
    }

    pub fn matches(&self, part: &Part) -> bool {
        match self {
            Criterion::Location { key, value } => part.location().contains(key, value),
            Criterion::Field(filter) => match filter {
                FieldFilter::Id(id) => part.id_typed() == *id,
                FieldFilter::SerialNumber(s) => part.serial_number() == s,
                FieldFilter::Name(s) => part.name() == s,
                FieldFilter::Description(s) => part.description() == s,
                FieldFilter::Category(c) => part.category() == *c,
                FieldFilter::Quantity(q) => part.quantity() == *q,
                FieldFilter::Price(p) => part.price() == *p,
                FieldFilter::Unsatisfiable => false,
            },
        }
    }
}

/// A conjunction of criteria. Empty criteria match every part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    criteria: Vec<Criterion>,
}

impl SearchCriteria {
    pub fn parse<I, K, V>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let criteria = pairs
            .into_iter()
            .map(|(k, v)| Criterion::parse(k.as_ref(), v.as_ref()))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { criteria })
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, part: &Part) -> bool {
        self.criteria.iter().all(|c| c.matches(part))
    }

    /// Keep the parts that match, preserving order. Parts are keyed by id,
    /// so a part appears at most once.
    pub fn filter<'a, I>(&self, parts: I) -> Vec<Part>
    where
        I: IntoIterator<Item = &'a Part>,
    {
        let mut seen = std::collections::HashSet::new();
        parts
            .into_iter()
            .filter(|p| self.matches(p))
            .filter(|p| seen.insert(p.id_typed()))
            .cloned()
            .collect()
    }
}
