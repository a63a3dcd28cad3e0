//! Replay of damaged or hand-edited logs.
//!
//! Any bad line aborts replay with no forest, and the recorder refuses to
//! append on top of a log it cannot replay.

use crate::common::*;
use forestrecorder::{replay_from, ReplayError};
use std::io::Cursor;

#[test]
fn unknown_action_fails_replay() {
    let t = TestRecorder::new();
    t.write_log("1\tUTC\tadd\ta\t\n2\tUTC\tprune\ta\n");

    let err = t.recorder.replay().unwrap_err();
    assert_eq!(err.code(), "invalid_action");
    assert!(err.to_string().contains("line 2"), "{}", err);
}

#[test]
fn replay_failure_blocks_every_command() {
    let t = TestRecorder::new();
    let bad = "1\tUTC\tadd\ta\t\nnonsense\n";
    t.write_log(bad);

    assert!(t.recorder.dump().is_err());
    assert!(t.recorder.history().is_err());
    assert!(t.recorder.add(id("b"), Parent::Root, vec![]).is_err());
    assert!(t.recorder.remove(id("a"), false).is_err());
    assert_eq!(t.log_text(), bad);
}

#[test]
fn precondition_violation_in_log_names_the_line() {
    let log = log_of(&[add("a", Parent::Root, &[]), remove("a", false)])
        + &log_of(&[mv("a", Parent::Root, &[])]);

    let err = replay_from(Cursor::new(log)).unwrap_err();
    assert_eq!(err.code(), "move_nonexisting");
    assert_eq!(err.line(), Some(3));
    assert!(matches!(err, ReplayError::Forest { line: 3, .. }));
}

#[test]
fn blank_line_is_corruption() {
    let err = replay_from(Cursor::new("1\tUTC\tadd\ta\t\n\n2\tUTC\tadd\tb\t\n")).unwrap_err();
    assert_eq!(err.code(), "invalid_action");
    assert_eq!(err.line(), Some(2));
}

#[test]
fn wrong_arity_is_corruption() {
    for line in [
        "1\tUTC\tadd\ta\n",
        "1\tUTC\tmove\ta\n",
        "1\tUTC\tremove\ta\trecursive\textra\n",
        "1\tUTC\tadd\n",
    ] {
        let err = replay_from(Cursor::new(line)).unwrap_err();
        assert_eq!(err.code(), "invalid_action", "line {:?}", line);
    }
}

#[test]
fn crlf_line_endings_are_accepted() {
    let (forest, stats) =
        replay_from(Cursor::new("1\tUTC\tadd\ta\t\r\n2\tUTC\tadd\tb\ta\r\n")).unwrap();
    assert_eq!(stats.records_applied, 2);
    assert_eq!(
        forest.get(&id("b")).unwrap().parent(),
        Some(&under("a"))
    );
}
