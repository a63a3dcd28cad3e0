//! On-disk line format written by the recorder.

use crate::common::*;

#[test]
fn recorder_writes_tab_delimited_lines() {
    let t = TestRecorder::new();
    let r = &t.recorder;
    r.add(id("a"), Parent::Root, vec![]).unwrap();
    r.add(id("b"), Parent::Root, vec![]).unwrap();
    r.add(id("c"), Parent::Root, ids(&["a", "b"])).unwrap();
    r.move_node(id("b"), Parent::Root, vec![]).unwrap();
    r.remove(id("c"), true).unwrap();

    let expected = [
        "1700000000\tUTC\tadd\ta\t",
        "1700000000\tUTC\tadd\tb\t",
        "1700000000\tUTC\tadd\tc\t\ta\tb",
        "1700000000\tUTC\tmove\tb\t",
        "1700000000\tUTC\tremove\tc\trecursive",
    ];
    assert_eq!(t.log_text().lines().collect::<Vec<_>>(), expected);
}

#[test]
fn hand_written_remove_flags_are_honored() {
    let t = TestRecorder::new();
    t.write_log(
        "1\tUTC\tadd\tp\t\n\
         2\tUTC\tadd\tq\tp\n\
         3\tUTC\tadd\tr\tq\n\
         4\tUTC\tremove\tq\t\n\
         5\tUTC\tremove\tp\tyes\n",
    );

    // q was spliced (empty flag), then p went with everything under it.
    assert!(t.dump().is_empty());
    let history = t.recorder.history().unwrap();
    assert!(matches!(
        history[3].action,
        Action::Remove {
            recursive: false,
            ..
        }
    ));
    assert!(matches!(
        history[4].action,
        Action::Remove {
            recursive: true,
            ..
        }
    ));
}

#[test]
fn timestamps_are_descriptive_only() {
    let t = TestRecorder::new();
    t.write_log("900\tAsia/Tokyo\tadd\tlate\t\n100\tUTC\tadd\tearly\tlate\n");

    let forest = t.forest();
    assert_eq!(
        forest.get(&id("early")).unwrap().parent(),
        Some(&under("late"))
    );
    let history = t.recorder.history().unwrap();
    assert_eq!(history[0].timezone, "Asia/Tokyo");
    assert_eq!(history[1].timestamp, 100);
}

#[test]
fn appends_follow_hand_written_content() {
    let t = TestRecorder::new();
    let existing = "5\tUTC\tadd\tx\t\n";
    t.write_log(existing);

    t.recorder.add(id("y"), under("x"), vec![]).unwrap();

    let text = t.log_text();
    assert!(text.starts_with(existing));
    assert_eq!(text.lines().nth(1), Some("1700000000\tUTC\tadd\ty\tx"));
}

#[test]
fn append_after_unterminated_last_line_keeps_records_apart() {
    let t = TestRecorder::new();
    t.write_log("5\tUTC\tadd\tx\t");
    assert!(t.recorder.replay().is_ok());

    t.recorder.add(id("y"), under("x"), vec![]).unwrap();

    assert_eq!(
        t.log_text(),
        "5\tUTC\tadd\tx\t\n1700000000\tUTC\tadd\ty\tx\n"
    );
    assert_eq!(t.dump(), tree(serde_json::json!({"x": {"y": {}}})));
    t.recorder.add(id("z"), Parent::Root, vec![]).unwrap();
    assert_eq!(t.recorder.history().unwrap().len(), 3);
}
