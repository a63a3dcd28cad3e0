//! Reads never write: lookup, export, history and dump leave both the forest
//! and the log unchanged.

use crate::common::*;

#[test]
fn reads_leave_log_unchanged() {
    let t = TestRecorder::new();
    let r = &t.recorder;
    r.add(id("a"), Parent::Root, vec![]).unwrap();
    r.add(id("b"), under("a"), vec![]).unwrap();
    let before = t.log_bytes();

    for _ in 0..3 {
        r.dump().unwrap();
        r.history().unwrap();
        r.replay_with_stats().unwrap();
    }

    assert_eq!(t.log_bytes(), before);
}

#[test]
fn reads_on_missing_log_do_not_create_it() {
    let t = TestRecorder::new();
    assert!(t.dump().is_empty());
    assert!(t.recorder.history().unwrap().is_empty());
    assert!(!t.log_path().exists());
}

#[test]
fn lookups_leave_forest_unchanged() {
    let forest = forest_of(&[
        add("a", Parent::Root, &[]),
        add("b", under("a"), &[]),
        add("c", under("b"), &[]),
    ]);
    let snapshot = forest.clone();

    let c = forest.get(&id("c")).unwrap();
    assert_eq!(c.ancestors(), vec![Parent::Root, under("a"), under("b")]);
    assert_eq!(c.depth(), 3);
    assert!(c.export().is_empty());

    let root = forest.lookup(&Parent::Root).unwrap();
    assert!(root.is_root());
    assert!(root.parent().is_none());
    assert!(root.ancestors().is_empty());
    assert_eq!(root.export(), forest.export());

    assert!(forest.lookup(&under("missing")).is_none());
    assert_eq!(forest, snapshot);
}
