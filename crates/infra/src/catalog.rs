//! Store wiring shared by the API and the seeder.

use std::sync::Arc;

use warehouse_categories::Category;
use warehouse_core::{CategoryId, PartId};
use warehouse_parts::Part;

use crate::repository::InMemoryRepository;
use crate::stores::{CategoryStore, PartStore};

pub type CategoryRepository = Arc<InMemoryRepository<CategoryId, Category>>;
pub type PartRepository = Arc<InMemoryRepository<PartId, Part>>;

/// Both stores, built over one shared pair of repositories.
#[derive(Debug)]
pub struct Catalog {
    pub categories: CategoryStore<CategoryRepository, PartRepository>,
    pub parts: PartStore<PartRepository, CategoryRepository>,
}

impl Catalog {
    /// In-memory wiring (dev/test and the default server).
    pub fn in_memory() -> Self {
        let categories: CategoryRepository = Arc::new(InMemoryRepository::new());
        let parts: PartRepository = Arc::new(InMemoryRepository::new());
        Self {
            categories: CategoryStore::new(categories.clone(), parts.clone()),
            parts: PartStore::new(parts, categories),
        }
    }
}
