//! End-to-end scenarios through the versioned store

use modplan_model::{Code, Module, RequirementCategory, Semester, SlotKey};
use modplan_store::{
    Aggregate, InvariantViolation, Mutation, StoreConfig, StoreError, VersionedStore,
};
use std::collections::BTreeSet;

fn codes(items: &[&str]) -> BTreeSet<Code> {
    items.iter().map(|c| Code::new(*c)).collect()
}

fn store() -> VersionedStore {
    VersionedStore::new(Aggregate::new(), StoreConfig::default())
}

fn cs1010() -> Module {
    Module::new("CS1010", "Programming Methodology", 4).with_semesters([Semester::One, Semester::Two])
}

fn cs2030() -> Module {
    Module::new("CS2030", "Programming Methodology II", 4)
        .with_semesters([Semester::One, Semester::Two])
        .with_corequisites(["CS1010"])
}

#[test]
fn test_plan_only_in_offered_semesters() {
    let mut store = store();
    store.apply(&Mutation::AddModule(cs1010())).unwrap();
    store
        .apply(&Mutation::AddCodesToSlot {
            slot: SlotKey::new(1, Semester::One),
            codes: codes(&["CS1010"]),
        })
        .unwrap();

    let err = store
        .apply(&Mutation::AddCodesToSlot {
            slot: SlotKey::new(1, Semester::SpecialTermOne),
            codes: codes(&["CS1010"]),
        })
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::Invariant(InvariantViolation::OfferedSemesterMismatch {
            module: Code::new("CS1010"),
            semester: Semester::SpecialTermOne,
        })
    );
    assert!(store.working().slot(SlotKey::new(1, Semester::SpecialTermOne)).is_none());
}

#[test]
fn test_delete_corequisite_cascades() {
    let mut store = store();
    store.apply(&Mutation::AddModule(cs1010())).unwrap();
    store.apply(&Mutation::AddModule(cs2030())).unwrap();
    store
        .apply(&Mutation::DeleteModule(Code::new("CS1010")))
        .unwrap();

    let cs2030 = store.working().module(&Code::new("CS2030")).unwrap();
    assert!(cs2030.corequisites().is_empty());
    assert!(store.working().validate().is_ok());
}

#[test]
fn test_edit_code_cascades_everywhere() {
    let mut store = store();
    for mutation in [
        Mutation::AddModule(cs1010()),
        Mutation::AddModule(cs2030()),
        Mutation::AddCodesToSlot {
            slot: SlotKey::new(1, Semester::One),
            codes: codes(&["CS1010", "CS2030"]),
        },
        Mutation::AddCategory(RequirementCategory::new("Foundations", 40)),
        Mutation::AddCodesToCategory {
            category: "Foundations".into(),
            codes: codes(&["CS1010"]),
        },
    ] {
        store.apply(&mutation).unwrap();
    }
    store.commit();

    let edited = store
        .working()
        .module(&Code::new("CS1010"))
        .unwrap()
        .clone()
        .with_code("CS1010X");
    store
        .apply(&Mutation::EditModule {
            target: Code::new("CS1010"),
            edited,
        })
        .unwrap();
    store.commit();

    let current = store.current();
    let renamed = Code::new("CS1010X");
    assert!(current.module(&Code::new("CS1010")).is_none());
    assert!(current.module(&renamed).is_some());
    assert!(current
        .module(&Code::new("CS2030"))
        .unwrap()
        .has_corequisite(&renamed));
    assert!(current
        .module(&renamed)
        .unwrap()
        .has_corequisite(&Code::new("CS2030")));
    assert!(current
        .slot(SlotKey::new(1, Semester::One))
        .unwrap()
        .contains_code(&renamed));
    assert!(current.category("Foundations").unwrap().contains_code(&renamed));
    assert!(current.validate().is_ok());

    // Undo brings the old code back in every collection
    store.undo().unwrap();
    let previous = store.current();
    assert!(previous.module(&Code::new("CS1010")).is_some());
    assert!(previous
        .category("Foundations")
        .unwrap()
        .contains_code(&Code::new("CS1010")));
}

#[test]
fn test_history_boundaries() {
    let mut store = store();
    assert_eq!(store.undo().unwrap_err(), StoreError::NoUndoableState);

    store.apply(&Mutation::AddModule(cs1010())).unwrap();
    store.commit();
    assert_eq!(store.redo().unwrap_err(), StoreError::NoRedoableState);
    assert!(store.can_undo());
    assert!(!store.can_redo());

    store.undo().unwrap();
    assert!(store.can_redo());
    assert!(store.working().modules().is_empty());
}

#[test]
fn test_move_requires_existing_destination() {
    let mut store = store();
    store.apply(&Mutation::AddModule(cs1010())).unwrap();
    store
        .apply(&Mutation::AddCodesToSlot {
            slot: SlotKey::new(1, Semester::One),
            codes: codes(&["CS1010"]),
        })
        .unwrap();

    let move_it = Mutation::MoveModuleBetweenSlots {
        from: SlotKey::new(1, Semester::One),
        to: SlotKey::new(2, Semester::Two),
        code: Code::new("CS1010"),
    };
    assert_eq!(
        store.apply(&move_it).unwrap_err(),
        StoreError::SlotNotFound(SlotKey::new(2, Semester::Two))
    );

    store
        .apply(&Mutation::AddSlot(SlotKey::new(2, Semester::Two)))
        .unwrap();
    store.apply(&move_it).unwrap();
    assert_eq!(
        store
            .working()
            .slot_of(&Code::new("CS1010"))
            .map(|slot| slot.slot_key()),
        Some(SlotKey::new(2, Semester::Two))
    );
}

#[test]
fn test_remove_slot_and_category_drop_assignments() {
    let mut store = store();
    for mutation in [
        Mutation::AddModule(cs1010()),
        Mutation::AddCodesToSlot {
            slot: SlotKey::new(1, Semester::One),
            codes: codes(&["CS1010"]),
        },
        Mutation::AddCategory(RequirementCategory::new("Foundations", 40).with_codes(["CS1010"])),
        Mutation::RemoveSlot(SlotKey::new(1, Semester::One)),
        Mutation::RemoveCategory("Foundations".into()),
    ] {
        store.apply(&mutation).unwrap();
    }

    let working = store.working();
    assert!(working.slot_of(&Code::new("CS1010")).is_none());
    assert!(working.category_of(&Code::new("CS1010")).is_none());
    assert!(working.module(&Code::new("CS1010")).is_some());
}

#[test]
fn test_dataset_round_trip_through_store() {
    let mut store = store();
    store.apply(&Mutation::AddModule(cs1010())).unwrap();
    store.apply(&Mutation::AddModule(cs2030())).unwrap();
    store
        .apply(&Mutation::AddCodesToSlot {
            slot: SlotKey::new(1, Semester::Two),
            codes: codes(&["CS1010", "CS2030"]),
        })
        .unwrap();
    store.commit();

    let json = store.current().to_json().unwrap();
    let reloaded = Aggregate::from_json(&json).unwrap();
    assert_eq!(&reloaded, store.current());

    let fresh = VersionedStore::new(reloaded, StoreConfig::default());
    assert_eq!(fresh.history_len(), 1);
    assert!(!fresh.can_undo());
}
