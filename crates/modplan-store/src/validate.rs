//! Whole-aggregate invariant checks
//!
//! Mutations check only what they touch; this module re-checks everything and
//! is run when a persisted dataset is loaded.

use crate::aggregate::Aggregate;
use crate::error::InvariantViolation;
use modplan_model::{Code, SlotKey};
use std::collections::HashMap;

impl Aggregate {
    /// Fail with the first invariant violation found
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        match self.check_all().into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Collect every invariant violation, in a deterministic order
    pub fn check_all(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        // Step 1: Corequisite references
        check_corequisites(self, &mut violations);

        // Step 2: Degree plan references and placement
        let placements = check_degree_plan(self, &mut violations);

        // Step 3: Requirement category references
        check_categories(self, &mut violations);

        // Step 4: Corequisites that are both planned share a slot
        check_colocation(self, &placements, &mut violations);

        violations
    }
}

fn check_corequisites(aggregate: &Aggregate, violations: &mut Vec<InvariantViolation>) {
    for module in aggregate.modules.iter() {
        for corequisite in module.corequisites() {
            if corequisite == module.code() {
                violations.push(InvariantViolation::SelfCorequisite {
                    module: module.code().clone(),
                });
                continue;
            }
            match aggregate.module(corequisite) {
                None => violations.push(InvariantViolation::NonexistentCorequisite {
                    module: module.code().clone(),
                    corequisite: corequisite.clone(),
                }),
                Some(other) if !other.has_corequisite(module.code()) => {
                    violations.push(InvariantViolation::AsymmetricCorequisite {
                        module: module.code().clone(),
                        corequisite: corequisite.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }
}

/// Check slot contents and return where each code is planned
fn check_degree_plan(
    aggregate: &Aggregate,
    violations: &mut Vec<InvariantViolation>,
) -> HashMap<Code, SlotKey> {
    let mut placements: HashMap<Code, SlotKey> = HashMap::new();

    for slot in aggregate.slots.iter() {
        if slot.year() == 0 {
            violations.push(InvariantViolation::YearOutOfRange { year: slot.year() });
        }

        for code in slot.codes() {
            let Some(module) = aggregate.module(code) else {
                violations.push(InvariantViolation::UnknownModule {
                    code: code.clone(),
                    holder: format!("degree planner slot {}", slot.slot_key()),
                });
                continue;
            };

            if !module.is_offered_in(slot.semester()) {
                violations.push(InvariantViolation::OfferedSemesterMismatch {
                    module: code.clone(),
                    semester: slot.semester(),
                });
            }

            if let Some(first) = placements.get(code) {
                violations.push(InvariantViolation::AlreadyPlanned {
                    code: code.clone(),
                    slot: *first,
                });
            } else {
                placements.insert(code.clone(), slot.slot_key());
            }
        }
    }

    placements
}

fn check_categories(aggregate: &Aggregate, violations: &mut Vec<InvariantViolation>) {
    let mut owners: HashMap<&Code, &str> = HashMap::new();

    for category in aggregate.categories.iter() {
        for code in category.codes() {
            if aggregate.module(code).is_none() {
                violations.push(InvariantViolation::UnknownModule {
                    code: code.clone(),
                    holder: format!("requirement category '{}'", category.name()),
                });
            }

            if let Some(first) = owners.get(code) {
                violations.push(InvariantViolation::AlreadyCategorised {
                    code: code.clone(),
                    category: first.to_string(),
                });
            } else {
                owners.insert(code, category.name());
            }
        }
    }
}

fn check_colocation(
    aggregate: &Aggregate,
    placements: &HashMap<Code, SlotKey>,
    violations: &mut Vec<InvariantViolation>,
) {
    for module in aggregate.modules.iter() {
        let Some(slot) = placements.get(module.code()) else {
            continue;
        };
        for corequisite in module.corequisites() {
            // Each unordered pair is reported once
            if corequisite <= module.code() {
                continue;
            }
            if let Some(other) = placements.get(corequisite) {
                if other != slot {
                    violations.push(InvariantViolation::CorequisiteNotColocated {
                        module: module.code().clone(),
                        corequisite: corequisite.clone(),
                    });
                }
            }
        }
    }
}
