//! The root aggregate: modules, degree plan and requirement categories

use crate::error::{InvariantViolation, StoreError};
use modplan_model::{
    Code, CollectionError, DegreePlannerSlot, Identified, Module, RequirementCategory, SlotKey,
    UniqueCollection,
};
use serde::{Deserialize, Serialize};

/// The three collections that together form one consistent dataset
///
/// Every public operation that changes an aggregate returns a new value;
/// a snapshot taken by the versioned store is never touched again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub(crate) modules: UniqueCollection<Module>,
    pub(crate) slots: UniqueCollection<DegreePlannerSlot>,
    pub(crate) categories: UniqueCollection<RequirementCategory>,
}

/// Persistence shape of an aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub degree_plan: Vec<DegreePlannerSlot>,
    #[serde(default)]
    pub requirement_categories: Vec<RequirementCategory>,
}

impl Dataset {
    /// Every invariant violation in this dataset
    ///
    /// Fails only when a collection holds two entries with the same identity.
    pub fn violations(&self) -> Result<Vec<InvariantViolation>, CollectionError> {
        let aggregate = Aggregate::collect(self.clone())?;
        Ok(aggregate.check_all())
    }
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an aggregate from persisted data, checking every invariant
    pub fn from_dataset(dataset: Dataset) -> Result<Self, StoreError> {
        let aggregate = Self::collect(dataset)?;
        aggregate.validate()?;
        Ok(aggregate)
    }

    fn collect(dataset: Dataset) -> Result<Self, CollectionError> {
        Ok(Self {
            modules: UniqueCollection::from_items(dataset.modules)?,
            slots: UniqueCollection::from_items(dataset.degree_plan)?,
            categories: UniqueCollection::from_items(dataset.requirement_categories)?,
        })
    }

    /// Parse and validate a JSON dataset
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Ok(Self::from_dataset(dataset)?)
    }

    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            modules: self.modules.iter().cloned().collect(),
            degree_plan: self.slots.iter().cloned().collect(),
            requirement_categories: self.categories.iter().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(&self.to_dataset())?)
    }

    pub fn modules(&self) -> &UniqueCollection<Module> {
        &self.modules
    }

    pub fn slots(&self) -> &UniqueCollection<DegreePlannerSlot> {
        &self.slots
    }

    pub fn categories(&self) -> &UniqueCollection<RequirementCategory> {
        &self.categories
    }

    pub fn module(&self, code: &Code) -> Option<&Module> {
        self.modules.get(code)
    }

    pub fn slot(&self, key: SlotKey) -> Option<&DegreePlannerSlot> {
        self.slots.get(&key)
    }

    pub fn category(&self, name: &str) -> Option<&RequirementCategory> {
        self.categories.get(&name.to_string())
    }

    /// The slot `code` is planned in, if any
    pub fn slot_of(&self, code: &Code) -> Option<&DegreePlannerSlot> {
        self.slots.iter().find(|slot| slot.contains_code(code))
    }

    /// The requirement category `code` counts towards, if any
    pub fn category_of(&self, code: &Code) -> Option<&RequirementCategory> {
        self.categories.iter().find(|category| category.contains_code(code))
    }

    /// Total credits of the modules planned in one slot
    pub fn slot_credits(&self, key: SlotKey) -> Option<u32> {
        let slot = self.slot(key)?;
        Some(self.credits_of(slot.codes()))
    }

    /// Credits earned towards a category and its target, as `(earned, target)`
    pub fn category_progress(&self, name: &str) -> Option<(u32, u32)> {
        let category = self.category(name)?;
        Some((self.credits_of(category.codes()), category.credit_target()))
    }

    fn credits_of<'a>(&self, codes: impl IntoIterator<Item = &'a Code>) -> u32 {
        codes
            .into_iter()
            .filter_map(|code| self.module(code))
            .map(Module::credits)
            .sum()
    }

    pub(crate) fn module_or_err(&self, code: &Code) -> Result<&Module, StoreError> {
        self.module(code)
            .ok_or_else(|| StoreError::ModuleNotFound(code.clone()))
    }

    pub(crate) fn slot_or_err(&self, key: SlotKey) -> Result<&DegreePlannerSlot, StoreError> {
        self.slot(key).ok_or(StoreError::SlotNotFound(key))
    }

    pub(crate) fn category_or_err(&self, name: &str) -> Result<&RequirementCategory, StoreError> {
        self.category(name)
            .ok_or_else(|| StoreError::CategoryNotFound(name.to_string()))
    }

    /// Replace a slot by identity with an edited copy
    pub(crate) fn put_slot(&mut self, slot: DegreePlannerSlot) -> Result<(), StoreError> {
        let key = slot.key();
        self.slots.replace_key(&key, slot)?;
        Ok(())
    }

    /// Replace a category by identity with an edited copy
    pub(crate) fn put_category(&mut self, category: RequirementCategory) -> Result<(), StoreError> {
        let key = category.key();
        self.categories.replace_key(&key, category)?;
        Ok(())
    }

    /// Replace a module by identity with an edited copy
    pub(crate) fn put_module(&mut self, module: Module) -> Result<(), StoreError> {
        let key = module.key();
        self.modules.replace_key(&key, module)?;
        Ok(())
    }
}

/// Failure while reading or writing a persisted dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent dataset: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use modplan_model::Semester;

    fn dataset() -> Dataset {
        Dataset {
            modules: vec![
                Module::new("CS1010", "Programming Methodology", 4)
                    .with_semesters([Semester::One, Semester::Two]),
                Module::new("CS1231", "Discrete Structures", 4).with_semesters([Semester::One]),
            ],
            degree_plan: vec![
                DegreePlannerSlot::new(1, Semester::One).with_codes(["CS1010", "CS1231"])
            ],
            requirement_categories: vec![
                RequirementCategory::new("Foundations", 36).with_codes(["CS1010"])
            ],
        }
    }

    #[test]
    fn test_dataset_round_trip() {
        let aggregate = Aggregate::from_dataset(dataset()).unwrap();
        let json = aggregate.to_json().unwrap();
        let reloaded = Aggregate::from_json(&json).unwrap();
        assert_eq!(reloaded, aggregate);
        assert_eq!(reloaded.to_dataset(), dataset());
    }

    #[test]
    fn test_dataset_rejects_duplicates() {
        let mut data = dataset();
        data.modules.push(Module::new("CS1010", "Copy", 4));
        let err = Aggregate::from_dataset(data).unwrap_err();
        assert!(matches!(err, StoreError::Collection(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Aggregate::from_json("{\"modules\": 3}"),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn test_dataset_violations_are_all_reported() {
        let mut data = dataset();
        data.degree_plan
            .push(DegreePlannerSlot::new(1, Semester::Two).with_codes(["CS1231", "GHOST"]));
        let codes: Vec<_> = data.violations().unwrap().iter().map(|v| v.code()).collect();
        assert_eq!(codes, vec!["E-INV-004", "E-INV-005", "E-INV-008"]);
    }

    #[test]
    fn test_summaries() {
        let aggregate = Aggregate::from_dataset(dataset()).unwrap();
        assert_eq!(aggregate.slot_credits(SlotKey::new(1, Semester::One)), Some(8));
        assert_eq!(aggregate.slot_credits(SlotKey::new(1, Semester::Two)), None);
        assert_eq!(aggregate.category_progress("Foundations"), Some((4, 36)));
        assert_eq!(
            aggregate.slot_of(&Code::new("CS1231")).map(|s| s.slot_key()),
            Some(SlotKey::new(1, Semester::One))
        );
        assert!(aggregate.category_of(&Code::new("CS1231")).is_none());
    }
}
