//! Invariant-enforcing stores for categories and parts.
//!
//! Each store owns handles to the repositories it needs, including the other
//! entity's repository for cross-entity checks (referential protection,
//! side-category assignment).

pub mod categories;
pub mod parts;

pub use categories::CategoryStore;
pub use parts::PartStore;
