use warehouse_categories::Category;
use warehouse_core::{CategoryId, DomainError, DomainResult, EntityKind, PartId};
use warehouse_parts::{Part, PartPayload, SearchCriteria};

use crate::repository::Repository;

/// CRUD over parts, category compatibility and search.
#[derive(Debug)]
pub struct PartStore<P, C>
where
    P: Repository<PartId, Part>,
    C: Repository<CategoryId, Category>,
{
    parts: P,
    categories: C,
}

impl<P, C> PartStore<P, C>
where
    P: Repository<PartId, Part>,
    C: Repository<CategoryId, Category>,
{
    pub fn new(parts: P, categories: C) -> Self {
        Self { parts, categories }
    }

    pub fn list(&self) -> Vec<Part> {
        self.parts.list()
    }

    pub fn get(&self, id: PartId) -> DomainResult<Part> {
        self.parts.get(&id).ok_or(DomainError::NotFound(EntityKind::Part))
    }

    /// Checks run in order: category reference, location keys, field
    /// constraints, serial number uniqueness.
    pub fn create(&self, payload: PartPayload) -> DomainResult<Part> {
        let category = match payload.category_ref() {
            Some(raw) => self.side_category(raw)?,
            None => return Err(DomainError::validation("category_id is required")),
        };
        let location = payload.location_over(None)?;
        let part = Part::new(PartId::new(), payload.into_attributes(category, location)?)?;
        self.write(&part)?;

        tracing::info!(
            part_id = %part.id_typed(),
            serial_number = part.serial_number(),
            category_id = %category,
            "part created"
        );
        Ok(part)
    }

    /// Partial update. Undeclared payload keys are merged into the stored
    /// location before the location is re-validated.
    pub fn update(&self, id: PartId, payload: PartPayload) -> DomainResult<Part> {
        let current = self.get(id)?;

        let category = match payload.category_ref() {
            Some(raw) => self.side_category(raw)?,
            None => current.category(),
        };
        let location = payload.location_over(Some(current.location()))?;
        let part = Part::new(id, payload.overlay(&current, category, location))?;
        self.write(&part)?;

        tracing::info!(
            part_id = %id,
            serial_number = part.serial_number(),
            category_id = %category,
            "part updated"
        );
        Ok(part)
    }

    /// Parts have no dependents, so deletion is unconditional.
    pub fn delete(&self, id: PartId) -> DomainResult<()> {
        match self.parts.remove(&id) {
            Some(_) => {
                tracing::info!(part_id = %id, "part deleted");
                Ok(())
            }
            None => Err(DomainError::NotFound(EntityKind::Part)),
        }
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Part> {
        let found = criteria.filter(&self.parts.list());
        tracing::debug!(criteria = criteria.criteria().len(), found = found.len(), "part search");
        found
    }

    /// Resolve a category reference that must point at a side category.
    fn side_category(&self, raw: &str) -> DomainResult<CategoryId> {
        let id = CategoryId::parse(raw)?;
        let category = self
            .categories
            .get(&id)
            .ok_or(DomainError::NotFound(EntityKind::Category))?;
        if category.is_base() {
            tracing::debug!(category_id = %id, "part assignment to base category rejected");
            return Err(DomainError::BaseCategoryAssignment);
        }
        Ok(id)
    }

    /// Store `part` unless another record already carries its serial number.
    fn write(&self, part: &Part) -> DomainResult<()> {
        let id = part.id_typed();
        self.parts
            .save_unless(part.clone(), &|p: &Part| {
                p.id_typed() != id && p.serial_number() == part.serial_number()
            })
            .into_result(|| DomainError::DuplicateSerialNumber(part.serial_number().to_string()))
    }
}
