//! Load a dataset, edit it through the store, query it, and write it back

use modplan::model::{DegreePlannerSlot, RequirementCategory, SlotKey};
use modplan::query::PlannedSlot;
use modplan::store::Dataset;
use modplan::{compile, filter, Aggregate, Code, Module, Mutation, Semester, StoreConfig, VersionedStore};

const DATASET: &str = r#"{
  "modules": [
    {"code": "CS1231", "name": "Data Structures", "credits": 4, "semesters": [1]},
    {"code": "CS9999", "name": "Data Mining", "credits": 4, "semesters": [1, 2]},
    {"code": "CS1010", "name": "Programming Methodology", "credits": 4, "semesters": [1, 2],
     "corequisites": ["CS1231"]}
  ],
  "degree_plan": [],
  "requirement_categories": []
}"#;

#[test]
fn test_asymmetric_dataset_is_rejected() {
    assert!(Aggregate::from_json(DATASET).is_err());
}

#[test]
fn test_workflow() {
    let mut dataset: Dataset = serde_json::from_str(DATASET).unwrap();
    dataset.modules[0] = dataset.modules[0].clone().with_corequisites(["CS1010"]);
    let aggregate = Aggregate::from_dataset(dataset).unwrap();

    let predicate = compile("name:Data AND (code:CS1231 OR code:CS1010)").unwrap();
    let matched: Vec<&str> = filter(aggregate.modules().iter(), &predicate)
        .into_iter()
        .map(|module| module.code().as_str())
        .collect();
    assert_eq!(matched, vec!["CS1231"]);

    let mut store = VersionedStore::new(aggregate, StoreConfig::default());
    let year_one = SlotKey::new(1, Semester::One);
    store
        .apply(&Mutation::AddCodesToSlot {
            slot: year_one,
            codes: [Code::new("CS1010"), Code::new("CS1231")].into_iter().collect(),
        })
        .unwrap();
    store
        .apply(&Mutation::AddCategory(
            RequirementCategory::new("Foundations", 8).with_codes(["CS1010", "CS1231"]),
        ))
        .unwrap();
    store.commit();
    assert_eq!(store.version(), 1);

    let working = store.working();
    let slots: Vec<PlannedSlot<'_>> = working
        .slots()
        .iter()
        .map(|slot| PlannedSlot::resolve(slot, |code| working.module(code)))
        .collect();
    let predicate = compile("code:CS1010").unwrap();
    let hits: Vec<&DegreePlannerSlot> = filter(&slots, &predicate)
        .into_iter()
        .map(|planned| planned.slot)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slot_key(), year_one);
    assert_eq!(working.category_progress("Foundations"), Some((8, 8)));

    // Deleting CS1231 cascades out of CS1010, the slot and the category
    store
        .apply(&Mutation::DeleteModule(Code::new("CS1231")))
        .unwrap();
    store.commit();
    let current = store.current();
    assert!(current
        .module(&Code::new("CS1010"))
        .unwrap()
        .corequisites()
        .is_empty());
    assert_eq!(current.slot_credits(year_one), Some(4));
    assert_eq!(current.category_progress("Foundations"), Some((4, 8)));

    let json = current.to_json().unwrap();
    assert_eq!(&Aggregate::from_json(&json).unwrap(), current);

    store.undo().unwrap();
    assert!(store.current().module(&Code::new("CS1231")).is_some());
}

#[test]
fn test_module_builder_matches_json_shape() {
    let module = Module::new("CS2030", "Programming Methodology II", 4)
        .with_semesters([Semester::One, Semester::Two]);
    let value = serde_json::to_value(&module).unwrap();
    assert_eq!(value["code"], "CS2030");
    assert_eq!(value["semesters"], serde_json::json!([1, 2]));
}
