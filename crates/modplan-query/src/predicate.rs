//! Compiled predicates and the values they are evaluated against

use modplan_model::{DegreePlannerSlot, Module};
use std::fmt;

/// Fields an operand can match on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Code,
    Credits,
}

impl Field {
    pub fn parse(prefix: &str) -> Option<Field> {
        match prefix.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Field::Name),
            "code" => Some(Field::Code),
            "credits" => Some(Field::Credits),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Code => "code",
            Field::Credits => "credits",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `field:keyword` test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: Field,
    pub keyword: String,
}

impl FieldMatch {
    pub fn new(field: Field, keyword: impl Into<String>) -> Self {
        Self {
            field,
            keyword: keyword.into(),
        }
    }

    /// Test one field value against the keyword
    ///
    /// Credits compare as exact strings. For text fields a single-word keyword
    /// matches any whole word of the value, case-insensitively; a multi-word
    /// keyword must equal the whole value, case-insensitively.
    pub fn matches_value(&self, value: &str) -> bool {
        if self.field == Field::Credits {
            return value == self.keyword;
        }

        let keyword = self.keyword.to_lowercase();
        let value = value.to_lowercase();
        if keyword.split_whitespace().nth(1).is_some() {
            value.trim() == keyword
        } else {
            value.split_whitespace().any(|word| word == keyword)
        }
    }
}

/// A composable boolean filter
///
/// Composition builds a new tree; neither operand is modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Match(FieldMatch),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn field(field: Field, keyword: impl Into<String>) -> Self {
        Predicate::Match(FieldMatch::new(field, keyword))
    }

    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    pub fn matches<T: Queryable + ?Sized>(&self, item: &T) -> bool {
        match self {
            Predicate::Match(test) => item
                .field_values(test.field)
                .iter()
                .any(|value| test.matches_value(value)),
            Predicate::And(left, right) => left.matches(item) && right.matches(item),
            Predicate::Or(left, right) => left.matches(item) || right.matches(item),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Match(test) => write!(f, "{}:{}", test.field, test.keyword),
            Predicate::And(left, right) => write!(f, "({} AND {})", left, right),
            Predicate::Or(left, right) => write!(f, "({} OR {})", left, right),
        }
    }
}

/// Anything a predicate can be evaluated against
pub trait Queryable {
    /// All values of `field` on this item; an operand matches if any does
    fn field_values(&self, field: Field) -> Vec<String>;
}

impl Queryable for Module {
    fn field_values(&self, field: Field) -> Vec<String> {
        match field {
            Field::Name => vec![self.name().to_string()],
            Field::Code => vec![self.code().to_string()],
            Field::Credits => vec![self.credits().to_string()],
        }
    }
}

/// A degree planner slot joined with the modules planned in it
///
/// A slot matches an operand when any of its modules does. Codes are taken
/// from the slot itself, so a code matches even without a module lookup.
#[derive(Debug, Clone)]
pub struct PlannedSlot<'a> {
    pub slot: &'a DegreePlannerSlot,
    pub modules: Vec<&'a Module>,
}

impl<'a> PlannedSlot<'a> {
    /// Join `slot` with its modules using `lookup`
    pub fn resolve<F>(slot: &'a DegreePlannerSlot, lookup: F) -> Self
    where
        F: Fn(&modplan_model::Code) -> Option<&'a Module>,
    {
        let modules = slot.codes().iter().filter_map(|code| lookup(code)).collect();
        Self { slot, modules }
    }
}

impl Queryable for PlannedSlot<'_> {
    fn field_values(&self, field: Field) -> Vec<String> {
        match field {
            Field::Code => self.slot.codes().iter().map(ToString::to_string).collect(),
            Field::Name | Field::Credits => self
                .modules
                .iter()
                .flat_map(|module| module.field_values(field))
                .collect(),
        }
    }
}

/// Keep the items matching `predicate`, in their original order
pub fn filter<'a, T, I>(items: I, predicate: &Predicate) -> Vec<&'a T>
where
    T: Queryable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| predicate.matches(*item))
        .collect()
}
