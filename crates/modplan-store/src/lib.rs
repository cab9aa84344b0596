//! modplan-store: consistency-preserving versioned store
//!
//! Holds the three collections of a degree planner (modules, degree plan
//! slots and requirement categories) as one [`Aggregate`] and keeps them
//! consistent:
//!
//! - corequisite links are symmetric and point at existing modules
//! - a code is planned in at most one slot and counted in at most one category
//! - planned modules are offered in their slot's semester
//! - planned corequisites share a slot
//!
//! Renaming or deleting a module code cascades through every collection.
//! [`VersionedStore`] layers commit, undo and redo over the aggregate.

mod aggregate;
mod cascade;
mod config;
mod error;
mod history;
mod mutation;
mod validate;

pub use aggregate::{Aggregate, Dataset, DatasetError};
pub use cascade::{delete_code, rename_code, CascadeReport};
pub use config::{StoreConfig, DEFAULT_MAX_YEAR};
pub use error::{ErrorKind, InvariantViolation, StoreError};
pub use history::VersionedStore;
pub use mutation::Mutation;
