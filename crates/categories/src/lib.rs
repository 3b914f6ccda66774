//! Categories domain module.
//!
//! Categories form a shallow hierarchy: a category without a parent is a
//! *base* category, one with a parent is a *side* category and may hold parts.
//! Records reference their parent by id only; the hierarchy is resolved by
//! whoever holds the store.

pub mod category;

pub use category::{
    Category, CreateCategory, MAX_NAME_LEN, ParentPatch, UpdateCategory, validate_name,
};
