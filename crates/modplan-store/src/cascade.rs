//! Cascade engine: propagate a code rename or deletion to every reference
//!
//! Both operations scan all three collections and rewrite the entries that
//! mention the code. They take the aggregate by reference and return a new
//! one, so the caller decides whether the result is kept. A scan with no
//! matches returns an equal aggregate.

use crate::aggregate::Aggregate;
use crate::error::StoreError;
use modplan_model::{Code, DegreePlannerSlot, Module, RequirementCategory};
use tracing::debug;

/// Counts of entries rewritten by a cascade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub modules: usize,
    pub slots: usize,
    pub categories: usize,
}

impl CascadeReport {
    pub fn total(&self) -> usize {
        self.modules + self.slots + self.categories
    }
}

/// Substitute `new` for `old` in every corequisite set, slot and category
///
/// The module identified by `old` itself is not touched; replacing it is the
/// caller's job.
pub fn rename_code(
    aggregate: &Aggregate,
    old: &Code,
    new: &Code,
) -> Result<(Aggregate, CascadeReport), StoreError> {
    let mut next = aggregate.clone();
    let mut report = CascadeReport::default();
    if old == new {
        return Ok((next, report));
    }

    let dependents: Vec<Module> = next
        .modules
        .iter()
        .filter(|module| module.has_corequisite(old))
        .cloned()
        .collect();
    for module in dependents {
        next.put_module(module.with_corequisite_renamed(old, new))?;
        report.modules += 1;
    }

    let slots: Vec<DegreePlannerSlot> = next
        .slots
        .iter()
        .filter(|slot| slot.contains_code(old))
        .cloned()
        .collect();
    for slot in slots {
        next.put_slot(slot.with_code_renamed(old, new))?;
        report.slots += 1;
    }

    let categories: Vec<RequirementCategory> = next
        .categories
        .iter()
        .filter(|category| category.contains_code(old))
        .cloned()
        .collect();
    for category in categories {
        next.put_category(category.with_code_renamed(old, new))?;
        report.categories += 1;
    }

    debug!(
        old = %old,
        new = %new,
        modules = report.modules,
        slots = report.slots,
        categories = report.categories,
        "cascaded code rename"
    );
    Ok((next, report))
}

/// Drop every reference to `code` from corequisite sets, slots and categories
///
/// The module identified by `code` itself is not removed; the caller does
/// that.
pub fn delete_code(aggregate: &Aggregate, code: &Code) -> Result<(Aggregate, CascadeReport), StoreError> {
    let mut next = aggregate.clone();
    let mut report = CascadeReport::default();

    let dependents: Vec<Module> = next
        .modules
        .iter()
        .filter(|module| module.has_corequisite(code))
        .cloned()
        .collect();
    for module in dependents {
        next.put_module(module.without_corequisite(code))?;
        report.modules += 1;
    }

    let slots: Vec<DegreePlannerSlot> = next
        .slots
        .iter()
        .filter(|slot| slot.contains_code(code))
        .cloned()
        .collect();
    for slot in slots {
        next.put_slot(slot.without_codes([code]))?;
        report.slots += 1;
    }

    let categories: Vec<RequirementCategory> = next
        .categories
        .iter()
        .filter(|category| category.contains_code(code))
        .cloned()
        .collect();
    for category in categories {
        next.put_category(category.without_codes([code]))?;
        report.categories += 1;
    }

    debug!(
        code = %code,
        modules = report.modules,
        slots = report.slots,
        categories = report.categories,
        "cascaded code deletion"
    );
    Ok((next, report))
}
