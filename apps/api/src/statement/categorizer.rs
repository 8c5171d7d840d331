//! Adjustment categorizer: groups selected adjustments under their catalog category.
//!
//! Group order is first-appearance order over `selected`, not catalog order.
//! Items the catalog doesn't know land in a synthetic "Other" group, which takes
//! its position the same way as any other group.

use serde::Serialize;

use crate::statement::catalog::AdjustmentCatalog;

pub const OTHER_CATEGORY: &str = "Other";

/// One category heading and its adjustments, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustmentGroup {
    pub category: &'static str,
    pub items: Vec<String>,
}

/// Insertion-ordered mapping of category → adjustments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategorizedAdjustments {
    groups: Vec<AdjustmentGroup>,
}

impl CategorizedAdjustments {
    fn push(&mut self, category: &'static str, item: &str) {
        match self.groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.items.push(item.to_string()),
            None => self.groups.push(AdjustmentGroup {
                category,
                items: vec![item.to_string()],
            }),
        }
    }

    pub fn groups(&self) -> &[AdjustmentGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<AdjustmentGroup> {
        self.groups
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.items.as_slice())
    }

    pub fn categories(&self) -> Vec<&'static str> {
        self.groups.iter().map(|g| g.category).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

/// Assigns each selected adjustment to the first catalog category listing it.
pub fn categorize(selected: &[String], catalog: &AdjustmentCatalog) -> CategorizedAdjustments {
    let mut categorized = CategorizedAdjustments::default();
    for item in selected {
        let category = catalog.category_of(item).unwrap_or(OTHER_CATEGORY);
        categorized.push(category, item);
    }
    categorized
}
