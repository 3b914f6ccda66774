use warehouse_categories::{Category, CreateCategory, ParentPatch, UpdateCategory};
use warehouse_core::{CategoryId, DomainError, DomainResult, EntityKind, PartId};
use warehouse_parts::Part;

use crate::repository::Repository;

/// Longest parent chain walked when checking for cycles.
const MAX_DEPTH: usize = 1024;

/// CRUD over categories plus the hierarchy rules.
#[derive(Debug)]
pub struct CategoryStore<C, P>
where
    C: Repository<CategoryId, Category>,
    P: Repository<PartId, Part>,
{
    categories: C,
    parts: P,
}

impl<C, P> CategoryStore<C, P>
where
    C: Repository<CategoryId, Category>,
    P: Repository<PartId, Part>,
{
    pub fn new(categories: C, parts: P) -> Self {
        Self { categories, parts }
    }

    pub fn list(&self) -> Vec<Category> {
        self.categories.list()
    }

    pub fn get(&self, id: CategoryId) -> DomainResult<Category> {
        self.categories
            .get(&id)
            .ok_or(DomainError::NotFound(EntityKind::Category))
    }

    pub fn create(&self, cmd: CreateCategory) -> DomainResult<Category> {
        let parent = match cmd.parent_ref() {
            Some(raw) => Some(self.resolve(raw)?.id_typed()),
            None => None,
        };
        let category = Category::new(CategoryId::new(), &cmd.name, parent)?;
        self.write(&category)?;

        tracing::info!(
            category_id = %category.id_typed(),
            name = category.name(),
            base = category.is_base(),
            "category created"
        );
        Ok(category)
    }

    /// Partial update.
    ///
    /// Unless the patch names a parent, the category must have no parts: a
    /// patch without a parent is treated as a request for a base category.
    /// Child categories do not block this.
    pub fn update(&self, id: CategoryId, cmd: UpdateCategory) -> DomainResult<Category> {
        let current = self.get(id)?;

        let parent = match &cmd.parent {
            ParentPatch::Set(raw) => {
                let parent = self.resolve(raw)?;
                self.ensure_not_descendant(id, &parent)?;
                Some(Some(parent.id_typed()))
            }
            ParentPatch::Unchanged | ParentPatch::Clear => {
                if self.has_parts(id) {
                    tracing::debug!(category_id = %id, "category with parts cannot become a base category");
                    return Err(DomainError::CategoryHasAssignedParts);
                }
                if matches!(cmd.parent, ParentPatch::Clear) {
                    Some(None)
                } else {
                    None
                }
            }
        };

        let next = current.patched(cmd.name.as_deref(), parent)?;
        self.write(&next)?;

        tracing::info!(
            category_id = %id,
            name = next.name(),
            base = next.is_base(),
            "category updated"
        );
        Ok(next)
    }

    /// Delete an unreferenced category. Nothing cascades.
    pub fn delete(&self, id: CategoryId) -> DomainResult<()> {
        self.get(id)?;

        let child_exists = self
            .categories
            .any(&|c: &Category| c.parent() == Some(id));
        if child_exists || self.has_parts(id) {
            tracing::debug!(category_id = %id, child_exists, "category still referenced");
            return Err(DomainError::ReferencedByOthers);
        }

        if self.categories.remove(&id).is_none() {
            return Err(DomainError::NotFound(EntityKind::Category));
        }
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    /// Parse and look up a category reference taken from a payload.
    fn resolve(&self, raw: &str) -> DomainResult<Category> {
        let id = CategoryId::parse(raw)?;
        self.get(id)
    }

    fn has_parts(&self, id: CategoryId) -> bool {
        self.parts.any(&|p: &Part| p.category() == id)
    }

    /// Store `category` unless another record already holds its `(name, parent)` slot.
    fn write(&self, category: &Category) -> DomainResult<()> {
        let id = category.id_typed();
        self.categories
            .save_unless(category.clone(), &|c: &Category| {
                c.id_typed() != id && c.occupies(category.name(), category.parent())
            })
            .into_result(|| {
                tracing::debug!(name = category.name(), "duplicate category rejected");
                DomainError::DuplicateCategory
            })
    }

    /// Reject moving `id` under itself or one of its own descendants.
    fn ensure_not_descendant(&self, id: CategoryId, new_parent: &Category) -> DomainResult<()> {
        let mut cursor = Some(new_parent.id_typed());
        let mut hops = 0usize;
        while let Some(current) = cursor {
            if current == id {
                return Err(DomainError::validation(
                    "category cannot be placed under itself or its own descendant",
                ));
            }
            hops += 1;
            if hops > MAX_DEPTH {
                return Err(DomainError::validation(format!(
                    "category hierarchy deeper than {MAX_DEPTH} levels"
                )));
            }
            cursor = self.categories.get(&current).and_then(|c| c.parent());
        }
        Ok(())
    }
}
