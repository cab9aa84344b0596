//! Requirement categories

use crate::code::Code;
use crate::collection::Identified;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named graduation requirement satisfied by the credits of its codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementCategory {
    name: String,
    credit_target: u32,
    #[serde(default)]
    codes: BTreeSet<Code>,
}

impl RequirementCategory {
    pub fn new(name: impl Into<String>, credit_target: u32) -> Self {
        Self {
            name: name.into(),
            credit_target,
            codes: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credit_target(&self) -> u32 {
        self.credit_target
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

impl Identified for RequirementCategory {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }
}
