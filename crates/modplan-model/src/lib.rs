//! modplan-model: Entity model for the module planner
//!
//! This crate provides the value types the rest of the workspace operates on:
//! - `Module`: a course module with credits, offered semesters and corequisites
//! - `DegreePlannerSlot`: the codes planned for one (year, semester)
//! - `RequirementCategory`: a named credit bucket satisfied by a set of codes
//! - `UniqueCollection`: an insertion-ordered container keyed by entity identity
//!
//! All entities are immutable values. Edits build a new value through the
//! `with_*` methods; nothing is changed in place once it lives in a collection.

mod category;
mod code;
mod collection;
mod error;
mod module;
mod slot;

pub use category::RequirementCategory;
pub use code::{Code, Semester};
pub use collection::{Identified, UniqueCollection};
pub use error::CollectionError;
pub use module::Module;
pub use slot::{DegreePlannerSlot, SlotKey};
