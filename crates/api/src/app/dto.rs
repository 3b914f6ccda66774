//! Request/response DTOs and JSON mapping helpers.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use warehouse_categories::{Category, CreateCategory, ParentPatch, UpdateCategory};
use warehouse_parts::Part;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Missing names reach the domain as blank and fail validation there.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl From<CreateCategoryRequest> for CreateCategory {
    fn from(req: CreateCategoryRequest) -> Self {
        CreateCategory {
            name: req.name,
            parent_id: req.parent_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Absent, `null` and a value mean different things here.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<String>>,
}

impl From<UpdateCategoryRequest> for UpdateCategory {
    fn from(req: UpdateCategoryRequest) -> Self {
        UpdateCategory {
            name: req.name,
            parent: ParentPatch::from_field(req.parent_id),
        }
    }
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

impl From<&Category> for CategoryView {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id_typed().to_string(),
            name: c.name().to_string(),
            parent_id: c.parent().map(|p| p.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartView {
    pub id: String,
    pub serial_number: String,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub quantity: u32,
    pub price: f64,
    pub location: BTreeMap<String, String>,
}

impl From<&Part> for PartView {
    fn from(p: &Part) -> Self {
        Self {
            id: p.id_typed().to_string(),
            serial_number: p.serial_number().to_string(),
            name: p.name().to_string(),
            description: p.description().to_string(),
            category_id: p.category().to_string(),
            quantity: p.quantity(),
            price: p.price(),
            location: p
                .location()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

pub fn category_views(categories: &[Category]) -> Vec<CategoryView> {
    categories.iter().map(CategoryView::from).collect()
}

pub fn part_views(parts: &[Part]) -> Vec<PartView> {
    parts.iter().map(PartView::from).collect()
}
