use warehouse_core::{CategoryId, DomainError, DomainResult, Entity};

/// Longest accepted category name, in characters.
pub const MAX_NAME_LEN: usize = 25;

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    parent: Option<CategoryId>,
}

impl Category {
    /// Build a category record, validating the name.
    pub fn new(id: CategoryId, name: &str, parent: Option<CategoryId>) -> DomainResult<Self> {
        let name = validate_name(name)?;
        if parent == Some(id) {
            return Err(DomainError::validation("category cannot be its own parent"));
        }
        Ok(Self { id, name, parent })
    }

    pub fn id_typed(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    /// A base category has no parent.
    pub fn is_base(&self) -> bool {
        self.parent.is_none()
    }

    /// A side category has a parent and may hold parts.
    pub fn is_side(&self) -> bool {
        self.parent.is_some()
    }

    /// Whether this record occupies the `(name, parent)` slot.
    pub fn occupies(&self, name: &str, parent: Option<CategoryId>) -> bool {
        self.name == name && self.parent == parent
    }

    /// Produce the record that results from applying `name` and an already
    /// resolved parent change. Does not touch `self`.
    pub fn patched(&self, name: Option<&str>, parent: Option<Option<CategoryId>>) -> DomainResult<Self> {
        let name = match name {
            Some(n) => n,
            None => self.name.as_str(),
        };
        let parent = parent.unwrap_or(self.parent);
        Self::new(self.id, name, parent)
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validate and normalise a category name (surrounding whitespace is dropped).
pub fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "name cannot be longer than {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Input: create a category. `parent_id` is the caller's raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategory {
    pub name: String,
    pub parent_id: Option<String>,
}

impl CreateCategory {
    /// The parent reference, with blank strings treated as absent.
    pub fn parent_ref(&self) -> Option<&str> {
        self.parent_id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// What an update does to the parent reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentPatch {
    /// `parent_id` was not sent; the parent stays as it is.
    Unchanged,
    /// `parent_id` was sent as `null` or an empty string.
    Clear,
    /// `parent_id` was sent with a value that still has to be resolved.
    Set(String),
}

impl ParentPatch {
    /// Interpret a tri-state JSON field (`absent` / `null` / value).
    pub fn from_field(field: Option<Option<String>>) -> Self {
        match field {
            None => ParentPatch::Unchanged,
            Some(None) => ParentPatch::Clear,
            Some(Some(s)) if s.trim().is_empty() => ParentPatch::Clear,
            Some(Some(s)) => ParentPatch::Set(s.trim().to_string()),
        }
    }

    /// Neither `Unchanged` nor `Clear` names a parent; both are guarded by the
    /// assigned-parts check on update.
    pub fn names_parent(&self) -> bool {
        matches!(self, ParentPatch::Set(_))
    }
}

/// Input: partially update a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub parent: ParentPatch,
}
