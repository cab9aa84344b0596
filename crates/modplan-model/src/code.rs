//! Module codes and semesters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier naming a module (e.g. `CS1010`)
///
/// Pattern validation happens before a code reaches this type; the model
/// treats it as an opaque string and compares it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Code {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Code {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// One of the four teaching periods of an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Semester {
    One,
    Two,
    SpecialTermOne,
    SpecialTermTwo,
}

impl Semester {
    pub const ALL: [Semester; 4] = [
        Semester::One,
        Semester::Two,
        Semester::SpecialTermOne,
        Semester::SpecialTermTwo,
    ];

    /// Numeric form used in persisted data and user input (1-4)
    pub fn number(self) -> u8 {
        match self {
            Semester::One => 1,
            Semester::Two => 2,
            Semester::SpecialTermOne => 3,
            Semester::SpecialTermTwo => 4,
        }
    }
}

impl TryFrom<u8> for Semester {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Semester::One),
            2 => Ok(Semester::Two),
            3 => Ok(Semester::SpecialTermOne),
            4 => Ok(Semester::SpecialTermTwo),
            other => Err(format!("invalid semester {}: expected 1-4", other)),
        }
    }
}

impl From<Semester> for u8 {
    fn from(semester: Semester) -> Self {
        semester.number()
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
