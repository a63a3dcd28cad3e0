//! End-to-end walk through the canonical add/move/remove sequence.

use crate::common::*;
use serde_json::json;

#[test]
fn add_move_remove_scenario() {
    let t = TestRecorder::new();
    let r = &t.recorder;

    r.add(id("a"), Parent::Root, vec![]).unwrap();
    r.add(id("b"), Parent::Root, vec![]).unwrap();
    r.add(id("c"), Parent::Root, ids(&["b"])).unwrap();
    assert_eq!(t.dump(), tree(json!({"a": {}, "c": {"b": {}}})));

    r.move_node(id("a"), under("c"), vec![]).unwrap();
    assert_eq!(t.dump(), tree(json!({"c": {"a": {}, "b": {}}})));

    r.remove(id("c"), false).unwrap();
    assert_eq!(t.dump(), tree(json!({"a": {}, "b": {}})));

    assert_eq!(r.history().unwrap().len(), 5);
}

#[test]
fn scenario_survives_reopen() {
    let mut t = TestRecorder::new_strict();
    t.recorder.add(id("a"), Parent::Root, vec![]).unwrap();
    t.recorder.add(id("b"), under("a"), vec![]).unwrap();
    let before = t.dump();

    t.reopen();

    assert_eq!(t.dump(), before);
    assert_eq!(before, tree(json!({"a": {"b": {}}})));
}

#[test]
fn insert_between_parent_and_children() {
    let t = TestRecorder::new();
    let r = &t.recorder;
    r.add(id("top"), Parent::Root, vec![]).unwrap();
    for leaf in ["x", "y", "z"] {
        r.add(id(leaf), under("top"), vec![]).unwrap();
    }

    r.add(id("mid"), under("top"), ids(&["x", "z"])).unwrap();

    assert_eq!(
        t.dump(),
        tree(json!({"top": {"mid": {"x": {}, "z": {}}, "y": {}}}))
    );
    t.forest().check_invariants().unwrap();
}

#[test]
fn recursive_remove_clears_subtree() {
    let t = TestRecorder::new();
    let r = &t.recorder;
    r.add(id("p"), Parent::Root, vec![]).unwrap();
    r.add(id("q"), under("p"), vec![]).unwrap();
    r.add(id("s"), under("q"), vec![]).unwrap();
    r.add(id("keep"), Parent::Root, vec![]).unwrap();

    r.remove(id("p"), true).unwrap();

    assert_eq!(t.dump(), tree(json!({"keep": {}})));
    let forest = t.forest();
    assert_eq!(forest.len(), 1);
    assert!(!forest.contains(&id("s")));
}
