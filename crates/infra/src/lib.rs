//! Infrastructure layer: record storage, invariant-enforcing stores, seeding.

pub mod catalog;
pub mod repository;
pub mod seed;
pub mod stores;

pub use catalog::Catalog;
pub use repository::{InMemoryRepository, Repository, WriteOutcome};
pub use stores::{CategoryStore, PartStore};
