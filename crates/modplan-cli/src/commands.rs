//! Read-only commands over a loaded dataset
//!
//! Each command returns the text to print so the binary stays a thin shell.

use modplan_model::{DegreePlannerSlot, Module};
use modplan_query::{filter, PlannedSlot, Predicate};
use modplan_store::{Aggregate, Dataset, InvariantViolation, StoreConfig};

/// Every problem in a dataset, including slots beyond the configured year range
pub fn check(dataset: &Dataset, config: &StoreConfig) -> anyhow::Result<Vec<InvariantViolation>> {
    let mut violations = dataset.violations()?;
    for slot in &dataset.degree_plan {
        if slot.year() > config.max_year {
            violations.push(InvariantViolation::YearOutOfRange { year: slot.year() });
        }
    }
    Ok(violations)
}

pub fn render_violations(violations: &[InvariantViolation]) -> String {
    if violations.is_empty() {
        return "dataset is consistent\n".to_string();
    }
    lines(
        violations
            .iter()
            .map(|violation| format!("[{}] {}", violation.code(), violation))
            .chain([format!("{} problem(s) found", violations.len())]),
    )
}

pub fn query_modules(aggregate: &Aggregate, predicate: &Predicate) -> String {
    lines(
        filter(aggregate.modules().iter(), predicate)
            .into_iter()
            .map(module_line),
    )
}

pub fn query_slots(aggregate: &Aggregate, predicate: &Predicate) -> String {
    let planned: Vec<PlannedSlot<'_>> = aggregate
        .slots()
        .iter()
        .map(|slot| PlannedSlot::resolve(slot, |code| aggregate.module(code)))
        .collect();
    lines(
        filter(&planned, predicate)
            .into_iter()
            .map(|slot| slot_line(aggregate, slot.slot)),
    )
}

/// Degree plan in (year, semester) order with per-slot credit totals
pub fn plan(aggregate: &Aggregate) -> String {
    let mut slots: Vec<_> = aggregate.slots().iter().collect();
    slots.sort_by_key(|slot| slot.slot_key());

    let total: u32 = slots
        .iter()
        .filter_map(|slot| aggregate.slot_credits(slot.slot_key()))
        .sum();
    lines(
        slots
            .into_iter()
            .map(|slot| slot_line(aggregate, slot))
            .chain([format!("total: {} MCs", total)]),
    )
}

/// Credit progress towards each requirement category
pub fn categories(aggregate: &Aggregate) -> String {
    lines(aggregate.categories().iter().map(|category| {
        let (earned, target) = aggregate
            .category_progress(category.name())
            .unwrap_or((0, category.credit_target()));
        let mark = if earned >= target { "done" } else { "open" };
        format!("{}: {}/{} MCs [{}]", category.name(), earned, target, mark)
    }))
}

/// Newline-terminate every line and concatenate
fn lines(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn module_line(module: &Module) -> String {
    format!("{}  {} ({} MCs)", module.code(), module.name(), module.credits())
}

fn slot_line(aggregate: &Aggregate, slot: &DegreePlannerSlot) -> String {
    let key = slot.slot_key();
    let codes: Vec<&str> = slot.codes().iter().map(|code| code.as_str()).collect();
    format!(
        "{} ({} MCs): {}",
        key,
        aggregate.slot_credits(key).unwrap_or(0),
        codes.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use modplan_model::{DegreePlannerSlot, RequirementCategory, Semester};

    fn dataset() -> Dataset {
        Dataset {
            modules: vec![
                Module::new("CS1231", "Discrete Structures", 4).with_semesters([Semester::One]),
                Module::new("CS2040", "Data Structures and Algorithms", 4)
                    .with_semesters([Semester::Two]),
                Module::new("MA1521", "Calculus for Computing", 4).with_semesters([Semester::One]),
            ],
            degree_plan: vec![
                DegreePlannerSlot::new(1, Semester::Two).with_codes(["CS2040"]),
                DegreePlannerSlot::new(1, Semester::One).with_codes(["CS1231", "MA1521"]),
            ],
            requirement_categories: vec![
                RequirementCategory::new("Foundations", 8).with_codes(["CS1231", "CS2040"]),
                RequirementCategory::new("Maths", 12).with_codes(["MA1521"]),
            ],
        }
    }

    fn aggregate() -> Aggregate {
        Aggregate::from_dataset(dataset()).unwrap()
    }

    #[test]
    fn test_check_reports_years_beyond_config() {
        let mut data = dataset();
        data.degree_plan.push(DegreePlannerSlot::new(9, Semester::One));
        let violations = check(&data, &StoreConfig::default()).unwrap();
        assert_eq!(violations, vec![InvariantViolation::YearOutOfRange { year: 9 }]);
        assert!(render_violations(&violations).contains("E-INV-009"));
        assert_eq!(render_violations(&[]), "dataset is consistent\n");
    }

    #[test]
    fn test_query_modules() {
        let predicate = modplan_query::compile("name:structures").unwrap();
        let out = query_modules(&aggregate(), &predicate);
        assert_eq!(
            out,
            "CS1231  Discrete Structures (4 MCs)\nCS2040  Data Structures and Algorithms (4 MCs)\n"
        );
    }

    #[test]
    fn test_query_slots() {
        let predicate = modplan_query::compile("code:MA1521").unwrap();
        assert_eq!(query_slots(&aggregate(), &predicate), "Y1S1 (8 MCs): CS1231, MA1521\n");
    }

    #[test]
    fn test_plan_is_sorted() {
        assert_eq!(
            plan(&aggregate()),
            "Y1S1 (8 MCs): CS1231, MA1521\nY1S2 (4 MCs): CS2040\ntotal: 12 MCs\n"
        );
    }

    #[test]
    fn test_empty_outputs() {
        let empty = Aggregate::new();
        let predicate = modplan_query::compile("credits:4").unwrap();
        assert_eq!(query_modules(&empty, &predicate), "");
        assert_eq!(plan(&empty), "total: 0 MCs\n");
        assert_eq!(categories(&empty), "");
    }

    #[test]
    fn test_category_progress() {
        assert_eq!(
            categories(&aggregate()),
            "Foundations: 8/8 MCs [done]\nMaths: 4/12 MCs [open]\n"
        );
    }
}
