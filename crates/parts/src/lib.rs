//! Parts domain module.
//!
//! Business rules for parts that can be checked without a store: field
//! constraints, the restricted location map, how an inbound payload splits
//! into declared attributes and location entries, and how search criteria
//! compile into a predicate. Cross-entity rules (side-category assignment,
//! serial number uniqueness) live with the stores in `warehouse-infra`.

pub mod field;
pub mod location;
pub mod part;
pub mod payload;
pub mod search;

pub use field::PartAttr;
pub use location::{LOCATION_FIELDS, Location};
pub use part::{MAX_TEXT_LEN, Part, PartAttributes};
pub use payload::{PartField, PartPayload};
pub use search::{Criterion, FieldFilter, SearchCriteria};
