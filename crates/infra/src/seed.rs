//! Demo data: fills the catalog with random categories and parts.
//!
//! Everything goes through the stores, so seeded data obeys the same rules
//! as data created over the API.

use std::collections::BTreeMap;

use rand::Rng;
use rand::distributions::{Alphanumeric, DistString};
use rand::seq::SliceRandom;

use warehouse_categories::{Category, CreateCategory};
use warehouse_core::DomainResult;
use warehouse_parts::{LOCATION_FIELDS, Part, PartPayload};

use crate::catalog::Catalog;

const PART_NAMES: [&str; 10] = [
    "Resistor",
    "Capacitor",
    "Inductor",
    "Diode",
    "Transistor",
    "Integrated Circuit",
    "Connector",
    "Sensor",
    "Microcontroller",
    "Power Supply",
];

const GROUPS: [&str; 6] = ["Passive", "Active", "Power", "Interconnect", "Sensing", "Logic"];

const DESCRIPTIONS: [&str; 5] = [
    "general purpose stock for bench assembly",
    "reel remainder from the last production run",
    "spare kept for field repairs",
    "sample batch awaiting qualification",
    "bulk pack, check datasheet before use",
];

pub struct Seeder<'a> {
    catalog: &'a Catalog,
}

impl<'a> Seeder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Create `n` side categories, each under a fresh base category.
    pub fn seed_categories<R: Rng>(&self, n: usize, rng: &mut R) -> DomainResult<Vec<Category>> {
        let mut created = Vec::with_capacity(n);
        for _ in 0..n {
            created.push(self.side_category(rng)?);
        }
        tracing::info!(count = n, "seeded categories");
        Ok(created)
    }

    /// Create `n` parts, each in a fresh side category.
    pub fn seed_parts<R: Rng>(&self, n: usize, rng: &mut R) -> DomainResult<Vec<Part>> {
        let mut created = Vec::with_capacity(n);
        for _ in 0..n {
            let category = self.side_category(rng)?;
            let payload = random_part(category.id_typed().to_string(), rng);
            created.push(self.catalog.parts.create(payload)?);
        }
        tracing::info!(count = n, "seeded parts");
        Ok(created)
    }

    fn side_category<R: Rng>(&self, rng: &mut R) -> DomainResult<Category> {
        let group = GROUPS.choose(rng).copied().unwrap_or("Misc");
        let base = self.catalog.categories.create(CreateCategory {
            name: format!("{group} {}", Alphanumeric.sample_string(rng, 8)),
            parent_id: None,
        })?;
        let part_name = PART_NAMES.choose(rng).copied().unwrap_or("Part");
        self.catalog.categories.create(CreateCategory {
            name: format!("{part_name}s {}", Alphanumeric.sample_string(rng, 4)),
            parent_id: Some(base.id_typed().to_string()),
        })
    }
}

fn random_part<R: Rng>(category_id: String, rng: &mut R) -> PartPayload {
    let serial_number: String = (0..10)
        .map(|_| {
            let c = rng.gen_range(0..52u8);
            if c < 26 { (b'a' + c) as char } else { (b'A' + c - 26) as char }
        })
        .collect();
    let location: BTreeMap<String, String> = LOCATION_FIELDS
        .iter()
        .map(|key| (key.to_string(), Alphanumeric.sample_string(rng, 1)))
        .collect();
    let price = (rng.gen_range(1.0..=100.0f64) * 100.0).round() / 100.0;

    PartPayload {
        serial_number: Some(serial_number),
        name: PART_NAMES.choose(rng).map(|s| s.to_string()),
        description: DESCRIPTIONS.choose(rng).map(|s| s.to_string()),
        category_id: Some(category_id),
        quantity: Some(rng.gen_range(0..=100)),
        price: Some(price),
        location: Some(location),
        extra_location: Vec::new(),
    }
}
