//! Mutations over the aggregate
//!
//! Every operation validates all of its preconditions against the current
//! aggregate first and only then builds the edited copy, so a rejected
//! mutation never produces a partially edited aggregate.

use crate::aggregate::Aggregate;
use crate::cascade;
use crate::config::StoreConfig;
use crate::error::{InvariantViolation, StoreError};
use modplan_model::{
    Code, CollectionError, DegreePlannerSlot, Module, RequirementCategory, Semester, SlotKey,
};
use std::collections::BTreeSet;
use tracing::debug;

/// A requested change to the aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AddModule(Module),
    EditModule {
        target: Code,
        edited: Module,
    },
    DeleteModule(Code),
    AddSlot(SlotKey),
    RemoveSlot(SlotKey),
    AddCodesToSlot {
        slot: SlotKey,
        codes: BTreeSet<Code>,
    },
    RemoveCodesFromSlots(BTreeSet<Code>),
    MoveModuleBetweenSlots {
        from: SlotKey,
        to: SlotKey,
        code: Code,
    },
    AddCategory(RequirementCategory),
    RemoveCategory(String),
    AddCodesToCategory {
        category: String,
        codes: BTreeSet<Code>,
    },
    RemoveCodesFromCategory {
        category: String,
        codes: BTreeSet<Code>,
    },
    MoveCodesBetweenCategories {
        from: String,
        to: String,
        codes: BTreeSet<Code>,
    },
}

impl Mutation {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddModule(_) => "add-module",
            Mutation::EditModule { .. } => "edit-module",
            Mutation::DeleteModule(_) => "delete-module",
            Mutation::AddSlot(_) => "add-slot",
            Mutation::RemoveSlot(_) => "remove-slot",
            Mutation::AddCodesToSlot { .. } => "add-codes-to-slot",
            Mutation::RemoveCodesFromSlots(_) => "remove-codes-from-slots",
            Mutation::MoveModuleBetweenSlots { .. } => "move-module-between-slots",
            Mutation::AddCategory(_) => "add-category",
            Mutation::RemoveCategory(_) => "remove-category",
            Mutation::AddCodesToCategory { .. } => "add-codes-to-category",
            Mutation::RemoveCodesFromCategory { .. } => "remove-codes-from-category",
            Mutation::MoveCodesBetweenCategories { .. } => "move-codes-between-categories",
        }
    }

    /// Apply to `aggregate`, returning the edited copy
    pub fn apply(&self, aggregate: &Aggregate, config: &StoreConfig) -> Result<Aggregate, StoreError> {
        debug!(mutation = self.name(), "applying mutation");
        match self {
            Mutation::AddModule(module) => aggregate.add_module(module.clone()),
            Mutation::EditModule { target, edited } => aggregate.edit_module(target, edited.clone()),
            Mutation::DeleteModule(code) => aggregate.delete_module(code),
            Mutation::AddSlot(key) => {
                check_year(*key, config)?;
                aggregate.add_slot(key.year, key.semester)
            }
            Mutation::RemoveSlot(key) => aggregate.remove_slot(*key),
            Mutation::AddCodesToSlot { slot, codes } => {
                if aggregate.slot(*slot).is_none() {
                    check_year(*slot, config)?;
                }
                aggregate.add_codes_to_slot(slot.year, slot.semester, codes)
            }
            Mutation::RemoveCodesFromSlots(codes) => aggregate.remove_codes_from_slots(codes),
            Mutation::MoveModuleBetweenSlots { from, to, code } => {
                aggregate.move_module_between_slots(*from, *to, code)
            }
            Mutation::AddCategory(category) => aggregate.add_category(category.clone()),
            Mutation::RemoveCategory(name) => aggregate.remove_category(name),
            Mutation::AddCodesToCategory { category, codes } => {
                aggregate.add_codes_to_category(category, codes)
            }
            Mutation::RemoveCodesFromCategory { category, codes } => {
                aggregate.remove_codes_from_category(category, codes)
            }
            Mutation::MoveCodesBetweenCategories { from, to, codes } => {
                aggregate.move_codes_between_categories(from, to, codes)
            }
        }
    }
}

fn check_year(key: SlotKey, config: &StoreConfig) -> Result<(), InvariantViolation> {
    if key.year == 0 || key.year > config.max_year {
        return Err(InvariantViolation::YearOutOfRange { year: key.year });
    }
    Ok(())
}

impl Aggregate {
    // === Modules ===

    pub fn add_module(&self, module: Module) -> Result<Aggregate, StoreError> {
        if self.modules.contains(&module) {
            return Err(CollectionError::Duplicate {
                key: module.code().to_string(),
            }
            .into());
        }
        self.check_corequisites(&module, None)?;

        let mut next = self.clone();
        next.modules.add(module.clone())?;
        for corequisite in module.corequisites() {
            let other = next.module_or_err(corequisite)?.clone();
            next.put_module(other.with_corequisite(module.code().clone()))?;
        }
        Ok(next)
    }

    /// Replace the module `target` with `edited`, cascading a code change
    ///
    /// Corequisite links are kept symmetric: modules dropped from the
    /// corequisite set lose their back-reference, newly listed ones gain it.
    pub fn edit_module(&self, target: &Code, edited: Module) -> Result<Aggregate, StoreError> {
        let original = self.module_or_err(target)?;
        let new_code = edited.code().clone();
        if &new_code != target && self.modules.contains_key(&new_code) {
            return Err(CollectionError::Duplicate {
                key: new_code.to_string(),
            }
            .into());
        }
        self.check_corequisites(&edited, Some(target))?;

        if let Some(slot) = self.slot_of(target) {
            if !edited.is_offered_in(slot.semester()) {
                return Err(InvariantViolation::OfferedSemesterMismatch {
                    module: target.clone(),
                    semester: slot.semester(),
                }
                .into());
            }
            self.check_colocation(target, &edited, slot.slot_key())?;
        }

        let dropped: Vec<Code> = original
            .corequisites()
            .difference(edited.corequisites())
            .cloned()
            .collect();
        let added: Vec<Code> = edited
            .corequisites()
            .difference(original.corequisites())
            .cloned()
            .collect();

        let mut next = self.clone();
        for code in &dropped {
            if let Some(other) = next.module(code).cloned() {
                next.put_module(other.without_corequisite(target))?;
            }
        }
        for code in &added {
            let other = next.module_or_err(code)?.clone();
            next.put_module(other.with_corequisite(target.clone()))?;
        }
        next.modules.replace_key(target, edited)?;

        let (next, _) = cascade::rename_code(&next, target, &new_code)?;
        Ok(next)
    }

    pub fn delete_module(&self, code: &Code) -> Result<Aggregate, StoreError> {
        self.module_or_err(code)?;
        let (mut next, _) = cascade::delete_code(self, code)?;
        next.modules.remove_key(code)?;
        Ok(next)
    }

    /// Corequisites must name other, existing modules
    ///
    /// `renaming` is the code `module` is about to replace; listing it counts
    /// as listing itself.
    fn check_corequisites(&self, module: &Module, renaming: Option<&Code>) -> Result<(), InvariantViolation> {
        for corequisite in module.corequisites() {
            if corequisite == module.code() || Some(corequisite) == renaming {
                return Err(InvariantViolation::SelfCorequisite {
                    module: module.code().clone(),
                });
            }
            if self.module(corequisite).is_none() {
                return Err(InvariantViolation::NonexistentCorequisite {
                    module: module.code().clone(),
                    corequisite: corequisite.clone(),
                });
            }
        }
        Ok(())
    }

    /// Planned corequisites of `module` must sit in `slot`
    fn check_colocation(&self, code: &Code, module: &Module, slot: SlotKey) -> Result<(), InvariantViolation> {
        for corequisite in module.corequisites() {
            if let Some(other) = self.slot_of(corequisite) {
                if other.slot_key() != slot {
                    return Err(InvariantViolation::CorequisiteNotColocated {
                        module: code.clone(),
                        corequisite: corequisite.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    // === Degree plan ===

    pub fn add_slot(&self, year: u32, semester: Semester) -> Result<Aggregate, StoreError> {
        if year == 0 {
            return Err(InvariantViolation::YearOutOfRange { year }.into());
        }
        let mut next = self.clone();
        next.slots.add(DegreePlannerSlot::new(year, semester))?;
        Ok(next)
    }

    /// Remove a slot together with the codes planned in it
    pub fn remove_slot(&self, key: SlotKey) -> Result<Aggregate, StoreError> {
        self.slot_or_err(key)?;
        let mut next = self.clone();
        next.slots.remove_key(&key)?;
        Ok(next)
    }

    /// Plan `codes` in (year, semester), creating the slot if needed
    pub fn add_codes_to_slot(
        &self,
        year: u32,
        semester: Semester,
        codes: &BTreeSet<Code>,
    ) -> Result<Aggregate, StoreError> {
        if year == 0 {
            return Err(InvariantViolation::YearOutOfRange { year }.into());
        }
        let key = SlotKey::new(year, semester);

        for code in codes {
            let module = self.module_or_err(code)?;
            if !module.is_offered_in(semester) {
                return Err(InvariantViolation::OfferedSemesterMismatch {
                    module: code.clone(),
                    semester,
                }
                .into());
            }
            if let Some(existing) = self.slot_of(code) {
                return Err(InvariantViolation::AlreadyPlanned {
                    code: code.clone(),
                    slot: existing.slot_key(),
                }
                .into());
            }
            self.check_colocation(code, module, key)?;
        }

        let mut next = self.clone();
        match next.slot(key).cloned() {
            Some(slot) => next.put_slot(slot.with_codes(codes.iter().cloned()))?,
            None => next
                .slots
                .add(DegreePlannerSlot::new(year, semester).with_codes(codes.iter().cloned()))?,
        }
        Ok(next)
    }

    /// Unplan `codes`, wherever each one is planned
    pub fn remove_codes_from_slots(&self, codes: &BTreeSet<Code>) -> Result<Aggregate, StoreError> {
        for code in codes {
            if self.slot_of(code).is_none() {
                return Err(StoreError::CodeNotPlanned(code.clone()));
            }
        }

        let mut next = self.clone();
        for code in codes {
            if let Some(slot) = next.slot_of(code).cloned() {
                next.put_slot(slot.without_codes([code]))?;
            }
        }
        Ok(next)
    }

    /// Move `code` from one existing slot to another
    ///
    /// Every module linked to it through a chain of corequisites planned in
    /// the same slot moves too, so corequisites stay co-located. The
    /// destination slot must already exist.
    pub fn move_module_between_slots(
        &self,
        from: SlotKey,
        to: SlotKey,
        code: &Code,
    ) -> Result<Aggregate, StoreError> {
        let source = self.slot_or_err(from)?;
        let destination = self.slot_or_err(to)?;
        if !source.contains_code(code) {
            return Err(StoreError::CodeNotInSlot {
                code: code.clone(),
                slot: from,
            });
        }

        let module = self.module_or_err(code)?;
        let moving = self.corequisite_group(source, code);

        // The module first, then all of its corequisites, then the rest of the group
        let mut checked: Vec<&Code> = vec![code];
        checked.extend(module.corequisites());
        checked.extend(moving.iter());
        for candidate in checked {
            if !self.module_or_err(candidate)?.is_offered_in(to.semester) {
                return Err(InvariantViolation::OfferedSemesterMismatch {
                    module: candidate.clone(),
                    semester: to.semester,
                }
                .into());
            }
        }

        if from == to {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.put_slot(source.clone().without_codes(&moving))?;
        next.put_slot(destination.clone().with_codes(moving.iter().cloned()))?;
        Ok(next)
    }

    /// `code` plus every code in `slot` reachable from it through corequisites
    fn corequisite_group(&self, slot: &DegreePlannerSlot, code: &Code) -> BTreeSet<Code> {
        let mut group = BTreeSet::new();
        let mut pending = vec![code.clone()];
        while let Some(current) = pending.pop() {
            if !group.insert(current.clone()) {
                continue;
            }
            if let Some(module) = self.module(&current) {
                pending.extend(
                    module
                        .corequisites()
                        .iter()
                        .filter(|corequisite| slot.contains_code(corequisite) && !group.contains(*corequisite))
                        .cloned(),
                );
            }
        }
        group
    }

    // === Requirement categories ===

    pub fn add_category(&self, category: RequirementCategory) -> Result<Aggregate, StoreError> {
        if self.categories.contains(&category) {
            return Err(CollectionError::Duplicate {
                key: category.name().to_string(),
            }
            .into());
        }
        self.check_uncategorised(category.codes())?;

        let mut next = self.clone();
        next.categories.add(category)?;
        Ok(next)
    }

    /// Remove a category together with its code assignments
    pub fn remove_category(&self, name: &str) -> Result<Aggregate, StoreError> {
        self.category_or_err(name)?;
        let mut next = self.clone();
        next.categories.remove_key(&name.to_string())?;
        Ok(next)
    }

    pub fn add_codes_to_category(&self, name: &str, codes: &BTreeSet<Code>) -> Result<Aggregate, StoreError> {
        let category = self.category_or_err(name)?;
        self.check_uncategorised(codes)?;

        let mut next = self.clone();
        next.put_category(category.clone().with_codes(codes.iter().cloned()))?;
        Ok(next)
    }

    pub fn remove_codes_from_category(
        &self,
        name: &str,
        codes: &BTreeSet<Code>,
    ) -> Result<Aggregate, StoreError> {
        let category = self.category_or_err(name)?;
        check_members(category, codes)?;

        let mut next = self.clone();
        next.put_category(category.clone().without_codes(codes))?;
        Ok(next)
    }

    pub fn move_codes_between_categories(
        &self,
        from: &str,
        to: &str,
        codes: &BTreeSet<Code>,
    ) -> Result<Aggregate, StoreError> {
        let source = self.category_or_err(from)?;
        let destination = self.category_or_err(to)?;
        check_members(source, codes)?;

        if from == to {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.put_category(source.clone().without_codes(codes))?;
        next.put_category(destination.clone().with_codes(codes.iter().cloned()))?;
        Ok(next)
    }

    /// Every code must name a module that is not yet in any category
    fn check_uncategorised(&self, codes: &BTreeSet<Code>) -> Result<(), StoreError> {
        for code in codes {
            self.module_or_err(code)?;
            if let Some(existing) = self.category_of(code) {
                return Err(InvariantViolation::AlreadyCategorised {
                    code: code.clone(),
                    category: existing.name().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

fn check_members(category: &RequirementCategory, codes: &BTreeSet<Code>) -> Result<(), StoreError> {
    for code in codes {
        if !category.contains_code(code) {
            return Err(StoreError::CodeNotInCategory {
                code: code.clone(),
                category: category.name().to_string(),
            });
        }
    }
    Ok(())
}
