use modplan_model::{Code, CollectionError, Semester, SlotKey};
use thiserror::Error;

/// Cross-entity rules a mutation or dataset would break
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// E-INV-001: Corequisite names a module that does not exist
    #[error("module '{module}' lists nonexistent corequisite '{corequisite}'")]
    NonexistentCorequisite { module: Code, corequisite: Code },

    /// E-INV-002: Module lists itself as a corequisite
    #[error("module '{module}' cannot be its own corequisite")]
    SelfCorequisite { module: Code },

    /// E-INV-003: A lists B but B does not list A
    #[error("module '{module}' lists '{corequisite}' as corequisite, but not the other way round")]
    AsymmetricCorequisite { module: Code, corequisite: Code },

    /// E-INV-004: Module placed in (or moved to) a semester it is not offered in
    #[error("module '{module}' is not offered in semester {semester}")]
    OfferedSemesterMismatch { module: Code, semester: Semester },

    /// E-INV-005: Code already occupies a degree planner slot
    #[error("module '{code}' is already planned in {slot}")]
    AlreadyPlanned { code: Code, slot: SlotKey },

    /// E-INV-006: Code already belongs to a requirement category
    #[error("module '{code}' already belongs to requirement category '{category}'")]
    AlreadyCategorised { code: Code, category: String },

    /// E-INV-007: Corequisites planned in different slots
    #[error("corequisites '{module}' and '{corequisite}' must be planned in the same semester")]
    CorequisiteNotColocated { module: Code, corequisite: Code },

    /// E-INV-008: A slot or category references a module that does not exist
    #[error("{holder} references nonexistent module '{code}'")]
    UnknownModule { code: Code, holder: String },

    /// E-INV-009: Planner year outside the accepted range
    #[error("year {year} is outside the planner range")]
    YearOutOfRange { year: u32 },
}

impl InvariantViolation {
    /// Stable identifier for display
    pub fn code(&self) -> &'static str {
        match self {
            InvariantViolation::NonexistentCorequisite { .. } => "E-INV-001",
            InvariantViolation::SelfCorequisite { .. } => "E-INV-002",
            InvariantViolation::AsymmetricCorequisite { .. } => "E-INV-003",
            InvariantViolation::OfferedSemesterMismatch { .. } => "E-INV-004",
            InvariantViolation::AlreadyPlanned { .. } => "E-INV-005",
            InvariantViolation::AlreadyCategorised { .. } => "E-INV-006",
            InvariantViolation::CorequisiteNotColocated { .. } => "E-INV-007",
            InvariantViolation::UnknownModule { .. } => "E-INV-008",
            InvariantViolation::YearOutOfRange { .. } => "E-INV-009",
        }
    }
}

/// Everything a store operation can fail with
///
/// All failures are recoverable: the aggregate and history are left exactly
/// as they were before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("module '{0}' not found")]
    ModuleNotFound(Code),

    #[error("degree planner slot {0} not found")]
    SlotNotFound(SlotKey),

    #[error("requirement category '{0}' not found")]
    CategoryNotFound(String),

    #[error("module '{0}' is not in the degree plan")]
    CodeNotPlanned(Code),

    #[error("module '{code}' is not planned in {slot}")]
    CodeNotInSlot { code: Code, slot: SlotKey },

    #[error("module '{code}' is not in requirement category '{category}'")]
    CodeNotInCategory { code: Code, category: String },

    #[error("no undoable state")]
    NoUndoableState,

    #[error("no redoable state")]
    NoRedoableState,
}

impl StoreError {
    /// Stable identifier for display
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Collection(err) => err.code(),
            StoreError::Invariant(err) => err.code(),
            StoreError::ModuleNotFound(_) => "E-STO-001",
            StoreError::SlotNotFound(_) => "E-STO-002",
            StoreError::CategoryNotFound(_) => "E-STO-003",
            StoreError::CodeNotPlanned(_) => "E-STO-004",
            StoreError::CodeNotInSlot { .. } => "E-STO-005",
            StoreError::CodeNotInCategory { .. } => "E-STO-006",
            StoreError::NoUndoableState => "E-HIS-001",
            StoreError::NoRedoableState => "E-HIS-002",
        }
    }
}

/// Broad category of a [`StoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Duplicate or missing collection entry
    Identity,
    /// Cross-entity rule violation
    Invariant,
    /// A referenced module, slot or category assignment does not exist
    Lookup,
    /// Undo or redo past the end of history
    History,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Collection(_) => ErrorKind::Identity,
            StoreError::Invariant(_) => ErrorKind::Invariant,
            StoreError::ModuleNotFound(_)
            | StoreError::SlotNotFound(_)
            | StoreError::CategoryNotFound(_)
            | StoreError::CodeNotPlanned(_)
            | StoreError::CodeNotInSlot { .. }
            | StoreError::CodeNotInCategory { .. } => ErrorKind::Lookup,
            StoreError::NoUndoableState | StoreError::NoRedoableState => ErrorKind::History,
        }
    }
}
