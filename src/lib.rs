//! modplan: degree planning over a consistency-preserving versioned store
//!
//! Re-exports the workspace crates:
//!
//! - [`model`]: codes, semesters, modules, slots, categories and `UniqueCollection`
//! - [`query`]: the `AND`/`OR` filter expression compiler
//! - [`store`]: the aggregate, cascades, mutations and undo/redo history

pub use modplan_model as model;
pub use modplan_query as query;
pub use modplan_store as store;

pub use modplan_model::{Code, Module, Semester};
pub use modplan_query::{compile, filter, Predicate};
pub use modplan_store::{Aggregate, Mutation, StoreConfig, StoreError, VersionedStore};
