//! Property tests: replaying a log equals applying its actions in order.
//!
//! Random command sequences over a small name pool are run against an
//! in-memory forest. Valid commands are encoded into a growing log; invalid
//! ones are expected to fail without changing anything.

use crate::common::*;
use forestrecorder::replay_from;
use proptest::prelude::*;
use std::io::Cursor;

const POOL: &[&str] = &["a", "b", "c", "d", "e", "f", "g", "h"];

// =============================================================================
// Strategies
// =============================================================================

fn name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(POOL)
}

fn parent() -> impl Strategy<Value = Parent> {
    prop::option::weighted(0.7, name()).prop_map(|p| match p {
        Some(p) => under(p),
        None => Parent::Root,
    })
}

fn children() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(name(), 0..3)
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (name(), parent(), children()).prop_map(|(n, p, c)| add(n, p, &c)),
        2 => (name(), parent(), children()).prop_map(|(n, p, c)| mv(n, p, &c)),
        1 => (name(), any::<bool>()).prop_map(|(n, r)| remove(n, r)),
    ]
}

fn actions(max: usize) -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(action(), 1..max)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Replay(L ++ encode(M)) == apply(M, Replay(L)) for every accepted M,
    /// and a rejected M leaves the forest untouched.
    #[test]
    fn replay_matches_incremental_application(cmds in actions(40)) {
        let mut forest = Forest::new();
        let mut log = String::new();

        for cmd in &cmds {
            let mut next = forest.clone();
            match cmd.apply(&mut next) {
                Ok(()) => {
                    next.check_invariants().unwrap();
                    log.push_str(&log_of(std::slice::from_ref(cmd)));
                    let (replayed, _) = replay_from(Cursor::new(log.as_bytes())).unwrap();
                    prop_assert_eq!(&replayed, &next);
                    prop_assert_eq!(replayed.export(), next.export());
                    forest = next;
                }
                Err(_) => prop_assert_eq!(&next, &forest),
            }
        }
    }

    /// Splice removal drops exactly one node; recursive removal drops the
    /// node and all of its descendants.
    #[test]
    fn remove_size_laws(cmds in actions(30), target in name(), recursive in any::<bool>()) {
        let mut forest = Forest::new();
        for cmd in &cmds {
            let _ = cmd.apply(&mut forest);
        }
        let target = id(target);
        let Some(descendants) = forest.descendants(&target) else {
            return Ok(());
        };
        let children: Vec<NodeId> = forest.get(&target).unwrap().children().iter().cloned().collect();
        let former_parent = forest.get(&target).unwrap().parent().cloned().unwrap();
        let before = forest.len();

        let removed = forest.remove(&target, recursive).unwrap();
        forest.check_invariants().unwrap();

        if recursive {
            prop_assert_eq!(removed, descendants.len() + 1);
            prop_assert_eq!(forest.len(), before - descendants.len() - 1);
        } else {
            prop_assert_eq!(removed, 1);
            prop_assert_eq!(forest.len(), before - 1);
            for child in &children {
                prop_assert_eq!(forest.get(child).unwrap().parent(), Some(&former_parent));
            }
        }
    }

    /// Ancestors of every node end at the root and never repeat.
    #[test]
    fn ancestor_chains_reach_root(cmds in actions(40)) {
        let mut forest = Forest::new();
        for cmd in &cmds {
            let _ = cmd.apply(&mut forest);
        }
        for node in forest.node_ids() {
            let chain = forest.get(node).unwrap().ancestors();
            prop_assert_eq!(chain.first(), Some(&Parent::Root));
            prop_assert!(!chain.contains(&Parent::Node(node.clone())));
            let mut seen = std::collections::BTreeSet::new();
            prop_assert!(chain.iter().all(|p| seen.insert(p.as_field().to_string())));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Same property through the recorder and a real log file: the log only
    /// ever grows by the accepted commands.
    #[test]
    fn recorder_log_tracks_model(cmds in actions(20)) {
        let t = TestRecorder::new();
        let mut model = Forest::new();

        for cmd in &cmds {
            let before = t.log_bytes();
            let expected = cmd.apply(&mut model.clone()).is_ok();
            let result = t.recorder.apply(cmd.clone());
            prop_assert_eq!(result.is_ok(), expected);
            if expected {
                cmd.apply(&mut model).unwrap();
            } else {
                prop_assert_eq!(t.log_bytes(), before);
            }
        }

        prop_assert_eq!(t.forest(), model);
    }
}
