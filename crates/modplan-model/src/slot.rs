//! Degree planner slots

use crate::code::{Code, Semester};
use crate::collection::Identified;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identity of a degree planner slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub year: u32,
    pub semester: Semester,
}

impl SlotKey {
    pub fn new(year: u32, semester: Semester) -> Self {
        Self { year, semester }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}S{}", self.year, self.semester)
    }
}

/// The module codes planned for one (year, semester)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreePlannerSlot {
    year: u32,
    semester: Semester,
    #[serde(default)]
    codes: BTreeSet<Code>,
}

impl DegreePlannerSlot {
    pub fn new(year: u32, semester: Semester) -> Self {
        Self {
            year,
            semester,
            codes: BTreeSet::new(),
        }
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn semester(&self) -> Semester {
        self.semester
    }

    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(self.year, self.semester)
    }

    pub fn codes(&self) -> &BTreeSet<Code> {
        &self.codes
    }

    pub fn contains_code(&self, code: &Code) -> bool {
        self.codes.contains(code)
    }

    pub fn with_codes<C: Into<Code>>(mut self, codes: impl IntoIterator<Item = C>) -> Self {
        self.codes.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn without_codes<'a>(mut self, codes: impl IntoIterator<Item = &'a Code>) -> Self {
        for code in codes {
            self.codes.remove(code);
        }
        self
    }

    pub fn with_code_renamed(mut self, old: &Code, new: &Code) -> Self {
        if self.codes.remove(old) {
            self.codes.insert(new.clone());
        }
        self
    }
}

impl Identified for DegreePlannerSlot {
    type Key = SlotKey;

    fn key(&self) -> SlotKey {
        self.slot_key()
    }
}
