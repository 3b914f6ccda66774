use warehouse_core::DomainResult;
use warehouse_infra::Catalog;
use warehouse_infra::seed::Seeder;

use crate::config::ApiConfig;

/// Shared state behind every handler.
#[derive(Debug)]
pub struct AppServices {
    catalog: Catalog,
}

impl AppServices {
    pub fn in_memory() -> Self {
        Self {
            catalog: Catalog::in_memory(),
        }
    }

    /// In-memory services, pre-filled with demo data when the config asks for it.
    pub fn from_config(config: &ApiConfig) -> DomainResult<Self> {
        let services = Self::in_memory();
        if config.seed_categories > 0 || config.seed_parts > 0 {
            let mut rng = rand::thread_rng();
            let seeder = Seeder::new(&services.catalog);
            seeder.seed_categories(config.seed_categories, &mut rng)?;
            seeder.seed_parts(config.seed_parts, &mut rng)?;
        }
        Ok(services)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
