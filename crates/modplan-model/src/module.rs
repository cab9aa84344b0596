//! Module entity

use crate::code::{Code, Semester};
use crate::collection::Identified;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A course module, identified by its code
///
/// Modules are immutable values: the `with_*` methods consume the module and
/// return an edited copy, leaving any stored original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    code: Code,
    name: String,
    credits: u32,
    #[serde(default)]
    semesters: BTreeSet<Semester>,
    #[serde(default)]
    corequisites: BTreeSet<Code>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    tags: BTreeSet<String>,
}

impl Module {
    /// Create a module with no offered semesters, corequisites or tags
    pub fn new(code: impl Into<Code>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits,
            semesters: BTreeSet::new(),
            corequisites: BTreeSet::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn semesters(&self) -> &BTreeSet<Semester> {
        &self.semesters
    }

    pub fn corequisites(&self) -> &BTreeSet<Code> {
        &self.corequisites
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn is_offered_in(&self, semester: Semester) -> bool {
        self.semesters.contains(&semester)
    }

    pub fn has_corequisite(&self, code: &Code) -> bool {
        self.corequisites.contains(code)
    }

    pub fn with_code(mut self, code: impl Into<Code>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    pub fn with_semesters(mut self, semesters: impl IntoIterator<Item = Semester>) -> Self {
        self.semesters = semesters.into_iter().collect();
        self
    }

    pub fn with_corequisites<C: Into<Code>>(mut self, codes: impl IntoIterator<Item = C>) -> Self {
        self.corequisites = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Add `code` to the corequisite set (no-op if already present)
    pub fn with_corequisite(mut self, code: Code) -> Self {
        self.corequisites.insert(code);
        self
    }

    /// Drop `code` from the corequisite set (no-op if absent)
    pub fn without_corequisite(mut self, code: &Code) -> Self {
        self.corequisites.remove(code);
        self
    }

    /// Substitute `old` with `new` in the corequisite set, if present
    pub fn with_corequisite_renamed(mut self, old: &Code, new: &Code) -> Self {
        if self.corequisites.remove(old) {
            self.corequisites.insert(new.clone());
        }
        self
    }
}

impl Identified for Module {
    type Key = Code;

    fn key(&self) -> Code {
        self.code.clone()
    }
}
